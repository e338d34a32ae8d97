//! Package records scraped from the catalogue.

use indexmap::IndexMap;
use serde::{Serialize, Deserialize};

mod urls;

/// A reference to a package, the url may be relative to the page it was scraped from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageRef {
	pub name: String,
	pub url: String,
}

impl PackageRef {
	pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
		Self { name: name.into(), url: url.into() }
	}
}

impl std::fmt::Display for PackageRef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} ({})", self.name, self.url)
	}
}

/// One row of the catalogue listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageListing {
	pub name: String,
	pub url: String,
	pub description: String,
}

impl PackageListing {
	pub fn to_ref(&self) -> PackageRef {
		PackageRef::new(self.name.clone(), self.url.clone())
	}
}

/// Binary download urls keyed by release channel, in the order the channels are listed.
pub type ChannelUrls = IndexMap<String, String>;

/// Entry of a dependency list.
///
/// Starts out as a bare reference and is replaced in place by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Dependency {
	Unresolved(PackageRef),
	Resolved(Box<ResolvedPackage>),
}

impl Dependency {
	pub fn name(&self) -> &str {
		match self {
			Dependency::Unresolved(r) => &r.name,
			Dependency::Resolved(p) => &p.name,
		}
	}

	pub fn url(&self) -> &str {
		match self {
			Dependency::Unresolved(r) => &r.url,
			Dependency::Resolved(p) => &p.url,
		}
	}

	pub fn is_resolved(&self) -> bool {
		matches!(self, Dependency::Resolved(_))
	}

	pub fn as_resolved(&self) -> Option<&ResolvedPackage> {
		match self {
			Dependency::Resolved(p) => Some(p),
			Dependency::Unresolved(_) => None,
		}
	}

	pub(crate) fn url_mut(&mut self) -> &mut String {
		match self {
			Dependency::Unresolved(r) => &mut r.url,
			Dependency::Resolved(p) => &mut p.url,
		}
	}
}

impl From<PackageRef> for Dependency {
	fn from(r: PackageRef) -> Self {
		Dependency::Unresolved(r)
	}
}

impl From<ResolvedPackage> for Dependency {
	fn from(p: ResolvedPackage) -> Self {
		Dependency::Resolved(Box::new(p))
	}
}

/// A package populated from its own detail page.
///
/// Fields missing from the page hold their empty default rather than failing the parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPackage {
	pub name: String,
	/// Canonical url of the detail page this record was read from.
	pub url: String,
	pub description: String,
	pub long_description: String,
	pub version: String,
	pub depends: Vec<Dependency>,
	pub imports: Vec<Dependency>,
	pub suggests: Vec<PackageRef>,
	pub publish_date: Option<chrono::NaiveDate>,
	pub author: String,
	pub maintainer: String,
	pub license: String,
	pub needs_compilation: bool,
	pub citation_url: String,
	pub manual_url: String,
	/// Source archive, what the generated scripts install.
	pub source_url: String,
	pub windows_binaries: ChannelUrls,
	pub osx_binaries: ChannelUrls,
	pub old_sources_url: String,
}

impl ResolvedPackage {
	/// `depends` followed by `imports`.
	pub fn requirements(&self) -> impl Iterator<Item = &Dependency> {
		self.depends.iter().chain(self.imports.iter())
	}

	/// True once every entry of `depends`, and of their own `depends`, is resolved.
	pub fn is_fully_resolved(&self) -> bool {
		self.depends.iter().all(|d| d.as_resolved().is_some_and(|p| p.is_fully_resolved()))
	}
}
