//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("URL error: {0}")]
	Url(#[from] url::ParseError),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("package not found: {0}")]
	PackageNotFound(String),
	#[error("dependency cycle: {}", .0.join(" -> "))]
	DependencyCycle(Vec<String>),
}
