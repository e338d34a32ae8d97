//! Various helper functions for testing
//!
//! Builds fake snapshots in memory so resolving can be tested without a mirror.

use std::cell::RefCell;
use std::collections::HashMap;

/// Root of every fake snapshot.
pub const SNAPSHOT: &str = "https://cran.example.org/snapshot/2019-05-24/";

/// Url of the listing page of [`SNAPSHOT`].
pub fn listing_url() -> url::Url {
	url::Url::parse(SNAPSHOT).expect("snapshot url is valid").join(cran_parser::catalogue::PACKAGE_LIST_PATH).expect("listing path is valid")
}

/// Url of the detail page of `name` in [`SNAPSHOT`].
pub fn package_url(name: &str) -> url::Url {
	url::Url::parse(SNAPSHOT).expect("snapshot url is valid").join(&format!("web/packages/{}/index.html", name)).expect("package path is valid")
}

/// Url the detail page of `name` gives for its source archive once made absolute.
pub fn source_url(name: &str) -> String {
	format!("{}src/contrib/{}_1.0.tar.gz", SNAPSHOT, name)
}

/// Document source serving fixed pages and recording every request.
#[derive(Debug, Default)]
pub struct MemorySource {
	pages: HashMap<url::Url, String>,
	requests: RefCell<Vec<url::Url>>,
}

impl MemorySource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, url: url::Url, html: impl Into<String>) {
		self.pages.insert(url, html.into());
	}

	pub fn with_page(mut self, url: url::Url, html: impl Into<String>) -> Self {
		self.insert(url, html);
		self
	}

	pub fn remove(&mut self, url: &url::Url) {
		self.pages.remove(url);
	}

	/// Every url fetched so far, in order.
	pub fn requests(&self) -> Vec<url::Url> {
		self.requests.borrow().clone()
	}

	pub fn request_count(&self, url: &url::Url) -> usize {
		self.requests.borrow().iter().filter(|u| *u == url).count()
	}
}

impl cran_parser::DocumentSource for MemorySource {
	fn fetch(&self, url: &url::Url) -> cran_parser::Result<Vec<u8>> {
		self.requests.borrow_mut().push(url.clone());
		self.pages.get(url)
			.map(|html| html.as_bytes().to_vec())
			.ok_or_else(|| cran_parser::Error::IO(std::io::Error::new(std::io::ErrorKind::NotFound, format!("no page at {}", url))))
	}
}

/// Listing page with one row per `(name, description)`, split under letter headings like the real page.
pub fn catalogue_page(packages: &[(&str, &str)]) -> String {
	let mut rows = String::new();
	let mut letter = None;
	for (name, description) in packages {
		let first = name.chars().next().map(|c| c.to_ascii_uppercase());
		if first != letter {
			letter = first;
			let id = format!("available-packages-{}", first.unwrap_or('_'));
			rows += &format!("<tr id=\"{id}\"><td colspan=\"2\"><a name=\"{id}\"></a></td></tr>\n");
		}
		rows += &format!("<tr><td><a href=\"../../web/packages/{name}/index.html\"><span class=\"CRAN\">{name}</span></a></td><td>{description}</td></tr>\n");
	}
	format!(r#"<!DOCTYPE html>
<html><head><title>CRAN: Available Packages By Name</title></head>
<body>
<h1>Available CRAN Packages By Name</h1>
<table summary="Available CRAN packages by name.">
{rows}</table>
</body></html>"#)
}

/// Detail page for `name` depending on `depends` and importing `imports`.
pub fn package_page(name: &str, depends: &[&str], imports: &[&str]) -> String {
	let links = |names: &[&str]| names.iter()
		.map(|n| format!("<a href=\"../{n}/index.html\">{n}</a>"))
		.collect::<Vec<_>>()
		.join(", ");
	let depends = if depends.is_empty() { "R (&ge; 3.0.0)".to_string() } else { format!("R (&ge; 3.0.0), {}", links(depends)) };
	let imports = links(imports);

	format!(r#"<!DOCTYPE html>
<html><head><title>CRAN - Package {name}</title></head>
<body>
<h2>{name}: The {name} Package</h2>
<p>Does what {name} does.</p>
<table summary="Package {name} summary">
<tr><td>Version:</td><td>1.0</td></tr>
<tr><td>Depends:</td><td>{depends}</td></tr>
<tr><td>Imports:</td><td>{imports}</td></tr>
<tr><td>Published:</td><td>2019-05-01</td></tr>
<tr><td>Author:</td><td>Someone [aut, cre]</td></tr>
<tr><td>Maintainer:</td><td>Someone &lt;someone at example.org&gt;</td></tr>
<tr><td>License:</td><td><a href="../../licenses/GPL-2">GPL-2</a></td></tr>
<tr><td>NeedsCompilation:</td><td>no</td></tr>
</table>
<h4>Downloads:</h4>
<table summary="Package {name} downloads">
<tr><td> Reference&nbsp;manual: </td><td> <a href="{name}.pdf"> {name}.pdf </a> </td></tr>
<tr><td> Package&nbsp;source: </td><td> <a href="../../../src/contrib/{name}_1.0.tar.gz"> {name}_1.0.tar.gz </a> </td></tr>
<tr><td> Windows&nbsp;binaries: </td><td> r-devel: <a href="../../../bin/windows/contrib/3.7/{name}_1.0.zip">{name}_1.0.zip</a>, r-release: <a href="../../../bin/windows/contrib/3.6/{name}_1.0.zip">{name}_1.0.zip</a>, r-oldrel: <a href="../../../bin/windows/contrib/3.5/{name}_1.0.zip">{name}_1.0.zip</a> </td></tr>
<tr><td> OS&nbsp;X&nbsp;binaries: </td><td> r-release: <a href="../../../bin/macosx/el-capitan/contrib/3.6/{name}_1.0.tgz">{name}_1.0.tgz</a> </td></tr>
<tr><td> Old&nbsp;sources: </td><td> <a href="https://CRAN.R-project.org/src/contrib/Archive/{name}"> {name} archive </a> </td></tr>
</table>
</body></html>"#)
}

/// A snapshot holding the listing and a detail page for each `(name, depends)`.
pub fn snapshot(packages: &[(&str, &[&str])]) -> MemorySource {
	let listing = packages.iter()
		.map(|(name, _)| (*name, "A package"))
		.collect::<Vec<_>>();
	let mut source = MemorySource::new().with_page(listing_url(), catalogue_page(&listing));
	for (name, depends) in packages {
		source.insert(package_url(name), package_page(name, depends, &[]));
	}
	source
}
