//! Generation of R install scripts from a resolved dependency tree.
//!
//! Dependencies are always emitted before the package requiring them, so running the script top to bottom installs a tree in a valid order.
//! Packages reached through more than one parent are emitted once per parent.

use crate::package::{Dependency, ResolvedPackage};

#[derive(Debug, Clone)]
pub struct ScriptOptions {
	/// Download method passed to `install.packages`.
	pub method: String,
	/// Walk `imports` after `depends`.
	pub include_imports: bool,
}

impl Default for ScriptOptions {
	fn default() -> Self {
		Self {
			method: crate::config::DEFAULT_TRANSPORT_METHOD.to_string(),
			include_imports: false,
		}
	}
}

/// Quotes `s` as an R string literal.
fn r_string(s: &str) -> String {
	format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl ScriptOptions {
	pub fn new(method: impl Into<String>, include_imports: bool) -> Self {
		Self { method: method.into(), include_imports }
	}

	fn dependencies<'p>(&self, package: &'p ResolvedPackage) -> Vec<&'p Dependency> {
		if self.include_imports {
			package.requirements().collect()
		} else {
			package.depends.iter().collect()
		}
	}

	/// Statement installing the source archive at `url` without consulting a repository.
	pub fn install_statement(&self, url: &str) -> String {
		format!("install.packages({}, repos = NULL, type = \"source\", method = {})", r_string(url), r_string(&self.method))
	}

	/// One statement per package, dependencies first.
	///
	/// A package with dependencies is preceded by a comment naming them.
	/// Packages without a source archive and unresolved dependencies produce no statement.
	pub fn install_commands(&self, package: &ResolvedPackage) -> Vec<String> {
		let mut lines = Vec::new();
		self.push_commands(package, &mut lines);
		lines
	}

	fn push_commands(&self, package: &ResolvedPackage, lines: &mut Vec<String>) {
		let dependencies = self.dependencies(package);
		if !dependencies.is_empty() {
			let names = dependencies.iter().map(|d| d.name()).collect::<Vec<_>>();
			lines.push(format!("# Dependencies of {}: {}", package.name, names.join(", ")));
			for dependency in dependencies {
				match dependency.as_resolved() {
					Some(dependency) => self.push_commands(dependency, lines),
					None => log::warn!("Dependency {} of {} is not resolved, leaving it out of the script", dependency.name(), package.name),
				}
			}
		}

		if package.source_url.is_empty() {
			log::warn!("{} has no source archive", package.name);
		} else {
			lines.push(self.install_statement(&package.source_url));
		}
	}

	/// Every source archive url in the tree, in the same order as [`ScriptOptions::install_commands`].
	pub fn flat_source_urls(&self, package: &ResolvedPackage) -> Vec<String> {
		let mut urls = Vec::new();
		self.push_source_urls(package, &mut urls);
		urls
	}

	fn push_source_urls(&self, package: &ResolvedPackage, urls: &mut Vec<String>) {
		for dependency in self.dependencies(package) {
			if let Some(dependency) = dependency.as_resolved() {
				self.push_source_urls(dependency, urls);
			}
		}
		if !package.source_url.is_empty() {
			urls.push(package.source_url.clone());
		}
	}

	/// A single statement installing each of `urls` in turn.
	pub fn batched_install_command(&self, urls: &[String]) -> String {
		let urls = urls.iter().map(|u| r_string(u)).collect::<Vec<_>>();
		format!("for (url in c({})) {}", urls.join(", "), self.install_statement_for_variable("url"))
	}

	fn install_statement_for_variable(&self, variable: &str) -> String {
		format!("install.packages({}, repos = NULL, type = \"source\", method = {})", variable, r_string(&self.method))
	}

	/// The line per package script.
	pub fn script(&self, package: &ResolvedPackage) -> InstallScript {
		InstallScript::new(self.install_commands(package))
	}

	/// The single statement script.
	pub fn batched_script(&self, package: &ResolvedPackage) -> InstallScript {
		InstallScript::new(vec![
			format!("# {} and its dependencies", package.name),
			self.batched_install_command(&self.flat_source_urls(package)),
		])
	}
}

/// [`ScriptOptions::install_commands`] with the default options.
pub fn install_commands(package: &ResolvedPackage) -> Vec<String> {
	ScriptOptions::default().install_commands(package)
}

/// [`ScriptOptions::flat_source_urls`] with the default options.
pub fn flat_source_urls(package: &ResolvedPackage) -> Vec<String> {
	ScriptOptions::default().flat_source_urls(package)
}

/// A generated script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallScript {
	lines: Vec<String>,
}

impl InstallScript {
	pub fn new(lines: Vec<String>) -> Self {
		Self { lines }
	}

	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	pub fn save_to_disk(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
		let path = path.as_ref();
		log::info!("Writing install script to {}", path.display());
		std::fs::write(path, self.to_string())?;
		Ok(())
	}
}

impl std::fmt::Display for InstallScript {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for line in &self.lines {
			writeln!(f, "{}", line)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::package::PackageRef;

	fn package(name: &str, depends: Vec<ResolvedPackage>) -> ResolvedPackage {
		ResolvedPackage {
			name: name.to_string(),
			url: format!("https://cran.example.org/web/packages/{}/index.html", name),
			source_url: format!("https://cran.example.org/src/contrib/{}_1.0.tar.gz", name),
			depends: depends.into_iter().map(Dependency::from).collect(),
			..Default::default()
		}
	}

	/// A -> {B, C}, B -> {D}
	fn tree() -> ResolvedPackage {
		package("A", vec![
			package("B", vec![package("D", vec![])]),
			package("C", vec![]),
		])
	}

	fn statement(name: &str) -> String {
		format!("install.packages(\"https://cran.example.org/src/contrib/{}_1.0.tar.gz\", repos = NULL, type = \"source\", method = \"libcurl\")", name)
	}

	#[test]
	fn dependencies_precede_dependents() {
		assert_eq!(install_commands(&tree()), vec![
			"# Dependencies of A: B, C".to_string(),
			"# Dependencies of B: D".to_string(),
			statement("D"),
			statement("B"),
			statement("C"),
			statement("A"),
		]);
	}

	#[test]
	fn flat_urls_in_dependency_order() {
		let urls = flat_source_urls(&tree());
		let names = urls.iter()
			.map(|u| u.trim_start_matches("https://cran.example.org/src/contrib/").trim_end_matches("_1.0.tar.gz"))
			.collect::<Vec<_>>();
		assert_eq!(names, ["D", "B", "C", "A"]);
	}

	#[test]
	fn leaf_has_no_header() {
		assert_eq!(install_commands(&package("D", vec![])), vec![statement("D")]);
	}

	#[test]
	fn missing_source_and_unresolved_are_skipped() {
		let mut root = package("A", vec![]);
		root.source_url.clear();
		root.depends.push(PackageRef::new("B", "https://cran.example.org/web/packages/B/index.html").into());
		assert_eq!(install_commands(&root), vec!["# Dependencies of A: B".to_string()]);
		assert!(flat_source_urls(&root).is_empty());
	}

	#[test]
	fn imports_only_when_asked() {
		let mut root = package("A", vec![package("B", vec![])]);
		root.imports.push(package("I", vec![]).into());

		assert_eq!(flat_source_urls(&root).len(), 2);
		let with_imports = ScriptOptions::new("libcurl", true);
		assert_eq!(with_imports.install_commands(&root)[0], "# Dependencies of A: B, I");
		assert_eq!(with_imports.flat_source_urls(&root).len(), 3);
	}

	#[test]
	fn batched_statement() {
		let options = ScriptOptions::new("wget", false);
		let command = options.batched_install_command(&["a.tar.gz".to_string(), "b \"quoted\".tar.gz".to_string()]);
		assert_eq!(command, r#"for (url in c("a.tar.gz", "b \"quoted\".tar.gz")) install.packages(url, repos = NULL, type = "source", method = "wget")"#);
	}

	#[test]
	fn script_renders_lines() {
		let script = ScriptOptions::default().batched_script(&tree());
		assert_eq!(script.lines().len(), 2);
		let rendered = script.to_string();
		assert!(rendered.starts_with("# A and its dependencies\nfor (url in c("));
		assert!(rendered.ends_with(")\n"));
	}
}
