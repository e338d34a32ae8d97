//! Package detail pages.

use scraper::{ElementRef, Html};

use super::*;
use crate::package::{Dependency, ResolvedPackage};
use crate::Error::Parse;

/// The table following the `Downloads:` heading.
fn downloads_table(root: ElementRef) -> Option<ElementRef> {
	let mut elements = root.descendants().filter_map(ElementRef::wrap);
	elements.find(|e| e.value().name() == "h4" && text_of(*e) == "Downloads:")?;
	elements.find(|e| e.value().name() == "table")
}

impl ResolvedPackage {
	/// Reads a package out of its detail page.
	///
	/// # Parameters
	/// - `html` - The detail page.
	/// - `url` - Where the page was fetched from, stored as the package's canonical url.
	///
	/// Scraped urls are kept as found, call [`ResolvedPackage::fix_urls`] to make them absolute.
	///
	/// # Errors
	/// [`crate::Error::Parse`] when the page has no `h2` heading or no details table.
	pub fn from_html(html: &str, url: &str) -> crate::Result<Self> {
		let document = Html::parse_document(html);
		let root = document.root_element();

		let heading = elements_named(root, "h2").next()
			.map(text_of)
			.ok_or_else(|| Parse(format!("package page {} has no heading", url)))?;
		let (name, description) = match heading.split_once(':') {
			Some((name, description)) => (name.to_string(), description.trim().to_string()),
			None => (heading.clone(), String::new()),
		};

		let details = elements_named(root, "table").next()
			.map(LabelledTable::new)
			.ok_or_else(|| Parse(format!("package page {} has no details table", url)))?;

		let downloads = downloads_table(root).map(LabelledTable::new);
		if downloads.is_none() {
			log::warn!("Package page {} has no downloads section", url);
		}
		let downloads = downloads.as_ref();

		let refs = |field: Field| -> Vec<Dependency> {
			field.extract(&details).into_refs().into_iter().map(Dependency::from).collect()
		};

		let long_description = elements_named(root, "p").next().map(text_of).unwrap_or_default();

		let package = Self {
			long_description,
			version: VERSION.extract(&details).into_string(),
			depends: refs(DEPENDS),
			imports: refs(IMPORTS),
			suggests: SUGGESTS.extract(&details).into_refs(),
			publish_date: PUBLISHED.extract(&details).into_date(),
			author: AUTHOR.extract(&details).into_string(),
			maintainer: MAINTAINER.extract(&details).into_string(),
			license: LICENSE.extract(&details).into_string(),
			needs_compilation: NEEDS_COMPILATION.extract(&details).into_flag(),
			citation_url: CITATION.extract(&details).into_string(),
			manual_url: REFERENCE_MANUAL.extract_from(downloads).into_string(),
			source_url: PACKAGE_SOURCE.extract_from(downloads).into_string(),
			windows_binaries: WINDOWS_BINARIES.extract_from(downloads).into_channels(),
			osx_binaries: OSX_BINARIES.extract_from(downloads).into_channels(),
			old_sources_url: OLD_SOURCES.extract_from(downloads).into_string(),
			name,
			url: url.to_string(),
			description,
		};
		Ok(package)
	}
}
