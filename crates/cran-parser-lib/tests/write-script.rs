use cran_parser::*;
use cran_parser::script::ScriptOptions;
use cran_parser_test_utils::*;

fn resolved_a() -> ResolvedPackage {
	let parser = CranParser::new(SNAPSHOT, snapshot(&[("A", &["B"]), ("B", &[])])).expect("failed to create parser");
	let mut a = parser.get_package(&PackageRef::new("A", "../../web/packages/A/index.html")).expect("failed to get package");
	a.fix_urls(None).expect("failed to fix urls");
	parser.resolve(&mut a, true).expect("failed to resolve");
	a
}

#[test]
fn script_saved_to_disk() {
	let dir = tempfile::tempdir().expect("failed to create temp dir");
	let path = dir.path().join("install.R");

	ScriptOptions::default().script(&resolved_a()).save_to_disk(&path).expect("failed to save script");

	let written = std::fs::read_to_string(&path).expect("failed to read script");
	assert_eq!(written, format!(
		"# Dependencies of A: B\n\
		install.packages(\"{}\", repos = NULL, type = \"source\", method = \"libcurl\")\n\
		install.packages(\"{}\", repos = NULL, type = \"source\", method = \"libcurl\")\n",
		source_url("B"), source_url("A")
	));
}

#[test]
fn batched_script_saved_to_disk() {
	let dir = tempfile::tempdir().expect("failed to create temp dir");
	let path = dir.path().join("install.R");

	ScriptOptions::new("wget", false).batched_script(&resolved_a()).save_to_disk(&path).expect("failed to save script");

	let written = std::fs::read_to_string(&path).expect("failed to read script");
	assert_eq!(written, format!(
		"# A and its dependencies\nfor (url in c(\"{}\", \"{}\")) install.packages(url, repos = NULL, type = \"source\", method = \"wget\")\n",
		source_url("B"), source_url("A")
	));
}

#[test]
fn saving_into_missing_directory_fails() {
	let dir = tempfile::tempdir().expect("failed to create temp dir");
	let path = dir.path().join("missing").join("install.R");
	assert!(matches!(InstallScript::default().save_to_disk(path), Err(Error::IO(_))));
}
