use cran_parser::CranParser;
use cran_parser_test_utils::*;

#[test]
fn listing_url_from_snapshot() {
	let parser = CranParser::new(SNAPSHOT, MemorySource::new()).expect("failed to create parser");
	assert_eq!(parser.cran_source(), SNAPSHOT);
	assert_eq!(
		parser.package_list_url().as_str(),
		"https://cran.example.org/snapshot/2019-05-24/web/packages/available_packages_by_name.html"
	);
}

#[test]
fn one_listing_per_package_row() {
	let packages = [
		("A3", "Accurate, Adaptive, and Scalable Predictive Models"),
		("abc", "Tools for Approximate Bayesian Computation (ABC)"),
		("abc.data", "Data Only: Tools for Approximate Bayesian Computation (ABC)"),
		("BayesDA", "Functions and Datasets for the book \"Bayesian Data Analysis\""),
		("zoo", "S3 Infrastructure for Regular and Irregular Time Series"),
	];
	let source = MemorySource::new().with_page(listing_url(), catalogue_page(&packages));
	let mut parser = CranParser::new(SNAPSHOT, source).expect("failed to create parser");

	let listings = parser.get_package_list().expect("failed to read listing");
	assert_eq!(listings.len(), packages.len());
	for (listing, (name, description)) in listings.iter().zip(packages) {
		assert_eq!(listing.name, name);
		assert_eq!(listing.url, format!("../../web/packages/{}/index.html", name));
		assert_eq!(listing.description, description);
	}
}

#[test]
fn listing_is_fetched_once() {
	let source = snapshot(&[("abc", &[]), ("nnet", &[])]);
	let mut parser = CranParser::new(SNAPSHOT, source).expect("failed to create parser");

	let first = parser.get_package_list().expect("failed to read listing");
	let second = parser.get_package_list().expect("failed to read listing");
	parser.find_listing("nnet").expect("nnet should be listed");

	assert_eq!(first, second);
	assert_eq!(parser.source().request_count(&listing_url()), 1);
}

#[test]
fn unknown_package_not_found() {
	let mut parser = CranParser::new(SNAPSHOT, snapshot(&[("abc", &[])])).expect("failed to create parser");
	assert!(matches!(parser.find_listing("ABC"), Err(cran_parser::Error::PackageNotFound(name)) if name == "ABC"));
}

#[test]
fn package_from_listing() {
	let mut parser = CranParser::new(SNAPSHOT, snapshot(&[("abc", &["nnet"]), ("nnet", &[])])).expect("failed to create parser");
	let listing = parser.find_listing("abc").expect("abc should be listed");

	let package = parser.get_package(&listing.to_ref()).expect("failed to get package");
	assert_eq!(package.url, package_url("abc").as_str());
	assert_eq!(package.name, "abc");
	assert_eq!(package.description, "The abc Package");
	assert_eq!(package.version, "1.0");
	assert_eq!(package.depends.len(), 1);
	/* Still as scraped */
	assert_eq!(package.depends[0].url(), "../nnet/index.html");
	assert_eq!(package.source_url, "../../../src/contrib/abc_1.0.tar.gz");
	assert_eq!(package.windows_binaries.len(), 3);
	assert_eq!(package.osx_binaries.keys().collect::<Vec<_>>(), ["r-release"]);
}

#[test]
fn missing_listing_is_fatal() {
	let mut parser = CranParser::new(SNAPSHOT, MemorySource::new()).expect("failed to create parser");
	assert!(matches!(parser.get_package_list(), Err(cran_parser::Error::IO(_))));
}
