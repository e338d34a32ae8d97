//! Expands a package's dependency list into fully populated packages.
//!
//! # Usage
//! 1. Get a package with [`CranParser::get_package()`] and make its urls absolute with [`ResolvedPackage::fix_urls()`].
//! 1. [`CranParser::resolve()`] or [`CranParser::resolve_with()`] to replace its dependency references with packages read from their own pages.
//!
//! In [`ResolveMode::Tree`] the dependencies are treated as a tree, a package required by two parents is fetched twice
//! and a cycle in the catalogue recurses until the stack runs out.
//! [`ResolveMode::Shared`] fetches each url once and fails on cycles instead.

use std::collections::HashMap;

use crate::catalogue::CranParser;
use crate::fetch::DocumentSource;
use crate::package::{Dependency, PackageRef, ResolvedPackage};

/// How repeated dependencies are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolveMode {
	/// Every reference is fetched and expanded on its own.
	#[default] Tree,
	/// Packages are memoized by absolute url and cloned into every parent requiring them.
	Shared,
}

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
	/// Expand the dependencies of dependencies as well.
	pub recursive: bool,
	/// Treat `imports` the same as `depends`.
	pub include_imports: bool,
	pub mode: ResolveMode,
}

impl ResolveOptions {
	pub fn recursive() -> Self {
		Self { recursive: true, ..Default::default() }
	}

	pub fn include_imports(mut self, include_imports: bool) -> Self {
		self.include_imports = include_imports;
		self
	}

	pub fn mode(mut self, mode: ResolveMode) -> Self {
		self.mode = mode;
		self
	}
}

/// `reference` as an absolute url, relative references are taken against `base`.
fn absolute(base: &str, reference: &str) -> crate::Result<url::Url> {
	match url::Url::parse(reference) {
		Err(url::ParseError::RelativeUrlWithoutBase) => Ok(url::Url::parse(base)?.join(reference)?),
		other => Ok(other?),
	}
}

/// State of a single resolve call.
struct Resolution<'a, S> {
	parser: &'a CranParser<S>,
	options: &'a ResolveOptions,
	/// Url and name of every package currently being expanded, outermost first.
	path: Vec<(String, String)>,
	/// Only filled in [`ResolveMode::Shared`].
	resolved: HashMap<url::Url, ResolvedPackage>,
	fetched: usize,
}

impl<'a, S: DocumentSource> Resolution<'a, S> {
	fn expand(&mut self, package: &mut ResolvedPackage) -> crate::Result<()> {
		self.path.push((package.url.clone(), package.name.clone()));
		let mut result = self.expand_list(&package.url, &mut package.depends);
		if result.is_ok() && self.options.include_imports {
			result = self.expand_list(&package.url, &mut package.imports);
		}
		self.path.pop();
		result
	}

	fn expand_list(&mut self, base: &str, dependencies: &mut [Dependency]) -> crate::Result<()> {
		for dependency in dependencies.iter_mut() {
			match dependency {
				Dependency::Unresolved(reference) => {
					let package = self.fetch(base, reference)?;
					*dependency = Dependency::from(package);
				},
				Dependency::Resolved(package) => {
					if self.options.recursive {
						self.expand(package)?;
					}
				},
			}
		}
		Ok(())
	}

	fn fetch(&mut self, base: &str, reference: &PackageRef) -> crate::Result<ResolvedPackage> {
		let url = absolute(base, &reference.url)?;

		if self.options.mode == ResolveMode::Shared {
			if self.path.iter().any(|(u, _)| u == url.as_str()) {
				let mut cycle = self.path.iter()
					.skip_while(|(u, _)| u != url.as_str())
					.map(|(_, name)| name.clone())
					.collect::<Vec<_>>();
				cycle.push(reference.name.clone());
				return Err(crate::Error::DependencyCycle(cycle));
			}
			if let Some(package) = self.resolved.get(&url) {
				log::trace!("Reusing resolved package {}", package.name);
				return Ok(package.clone());
			}
		}

		log::debug!("Resolving {} required by {}", reference.name, self.path.last().map_or("", |(_, name)| name.as_str()));
		let mut package = self.parser.fetch_package(&url)?;
		self.fetched += 1;
		package.fix_urls(None)?;

		if self.options.recursive {
			self.expand(&mut package)?;
		}

		if self.options.mode == ResolveMode::Shared {
			self.resolved.insert(url, package.clone());
		}
		Ok(package)
	}
}

impl<S: DocumentSource> CranParser<S> {
	/// Replaces every entry of `package.depends` with the package read from its page.
	///
	/// # Parameters
	/// - `package` - Package whose dependency urls are absolute, see [`ResolvedPackage::fix_urls()`].
	/// - `recursive` - Also resolve the dependencies of each dependency, depth first.
	///
	/// # Errors
	/// The first fetch or parse failure aborts the whole resolve, `package` may be left partially resolved.
	pub fn resolve(&self, package: &mut ResolvedPackage, recursive: bool) -> crate::Result<()> {
		self.resolve_with(package, &ResolveOptions { recursive, ..Default::default() })
	}

	/// [`CranParser::resolve()`] with the full set of options.
	pub fn resolve_with(&self, package: &mut ResolvedPackage, options: &ResolveOptions) -> crate::Result<()> {
		let mut resolution = Resolution {
			parser: self,
			options,
			path: Vec::new(),
			resolved: HashMap::new(),
			fetched: 0,
		};
		resolution.expand(package)?;
		log::info!("Resolved dependencies of {} with {} page fetches", package.name, resolution.fetched);
		Ok(())
	}
}
