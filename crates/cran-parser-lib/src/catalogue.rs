//! Client for one CRAN snapshot.

use crate::fetch::{DocumentSource, HttpSource, ResponseCache};
use crate::package::{PackageListing, PackageRef, ResolvedPackage};

/// Location of the listing relative to the snapshot root.
pub const PACKAGE_LIST_PATH: &str = "web/packages/available_packages_by_name.html";

/// Reads packages from a CRAN snapshot such as `https://cran.microsoft.com/snapshot/2019-05-24/`.
///
/// The listing page is fetched at most once per parser, package pages are fetched every time they are asked for.
pub struct CranParser<S = HttpSource> {
	cran_source: String,
	package_list_url: url::Url,
	source: S,
	cache: ResponseCache,
}

/// Joins the listing path onto the snapshot root, treating the root as a directory even without a trailing slash.
fn package_list_url(cran_source: &str) -> crate::Result<url::Url> {
	let mut base = url::Url::parse(cran_source)?;
	if !base.path().ends_with('/') {
		let path = format!("{}/", base.path());
		base.set_path(&path);
	}
	Ok(base.join(PACKAGE_LIST_PATH)?)
}

impl CranParser<HttpSource> {
	/// Parser talking to the snapshot named in `options` over HTTP.
	pub fn from_options(options: &crate::CranParserOptions) -> crate::Result<Self> {
		Self::new(options.cran_source(), HttpSource::new(options)?)
	}
}

impl<S: DocumentSource> CranParser<S> {
	/// # Parameters
	/// - `cran_source` - Root url of the snapshot.
	/// - `source` - Where documents are fetched from.
	pub fn new(cran_source: impl Into<String>, source: S) -> crate::Result<Self> {
		let cran_source = cran_source.into();
		Ok(Self {
			package_list_url: package_list_url(&cran_source)?,
			cran_source,
			source,
			cache: Default::default(),
		})
	}

	pub fn cran_source(&self) -> &str {
		&self.cran_source
	}

	pub fn package_list_url(&self) -> &url::Url {
		&self.package_list_url
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	/// Raw listing page, fetched on first use and served from the cache afterwards.
	pub fn get_package_list_html(&mut self) -> crate::Result<&[u8]> {
		self.cache.get_or_fetch(&self.source, &self.package_list_url)
	}

	/// Every package in the snapshot, urls relative to [`CranParser::package_list_url`].
	pub fn get_package_list(&mut self) -> crate::Result<Vec<PackageListing>> {
		let html = String::from_utf8_lossy(self.get_package_list_html()?).into_owned();
		let listings = crate::extract::catalogue::parse_catalogue(&html)?;
		log::debug!("Catalogue lists {} packages", listings.len());
		Ok(listings)
	}

	/// The listing row named exactly `name`.
	pub fn find_listing(&mut self, name: &str) -> crate::Result<PackageListing> {
		self.get_package_list()?
			.into_iter()
			.find(|l| l.name == name)
			.ok_or_else(|| crate::Error::PackageNotFound(name.to_string()))
	}

	/// Fetches the detail page of `package`, whose url may be relative to the listing page.
	///
	/// Urls inside the returned package are left as scraped.
	pub fn get_package(&self, package: &PackageRef) -> crate::Result<ResolvedPackage> {
		let url = self.package_list_url.join(&package.url)?;
		self.fetch_package(&url)
	}

	/// Fetches and parses the detail page at `url`.
	pub fn fetch_package(&self, url: &url::Url) -> crate::Result<ResolvedPackage> {
		log::debug!("Fetching package page {}", url);
		let body = self.source.fetch(url)?;
		ResolvedPackage::from_html(&String::from_utf8_lossy(&body), url.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn listing_url_under_snapshot() {
		assert_eq!(
			package_list_url("https://cran.microsoft.com/snapshot/2019-05-24/").unwrap().as_str(),
			"https://cran.microsoft.com/snapshot/2019-05-24/web/packages/available_packages_by_name.html"
		);
	}

	#[test]
	fn listing_url_without_trailing_slash() {
		assert_eq!(
			package_list_url("https://cran.microsoft.com/snapshot/2019-05-24").unwrap().as_str(),
			"https://cran.microsoft.com/snapshot/2019-05-24/web/packages/available_packages_by_name.html"
		);
	}

	#[test]
	fn relative_source_is_rejected() {
		assert!(matches!(package_list_url("snapshot/2019-05-24/"), Err(crate::Error::Url(_))));
	}
}
