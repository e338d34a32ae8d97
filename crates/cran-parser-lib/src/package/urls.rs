//! Rewriting of scraped urls to absolute form.

use super::*;

/// Resolves `reference` against `base`, empty references stay empty.
fn join(base: &url::Url, reference: &mut String) -> crate::Result<()> {
	if !reference.is_empty() {
		*reference = base.join(reference)?.to_string();
	}
	Ok(())
}

impl ResolvedPackage {
	/// Rewrites every stored url to absolute form.
	///
	/// # Parameters
	/// - `base_url` - Url the stored urls are relative to, defaults to the package's own `url`.
	///
	/// Dependencies that are already resolved only have their own `url` rewritten, their contents were fixed against their own page.
	/// Applying this again with the same base changes nothing.
	pub fn fix_urls(&mut self, base_url: Option<&url::Url>) -> crate::Result<()> {
		let base = match base_url {
			Some(base) => base.clone(),
			None => url::Url::parse(&self.url)?,
		};

		for dependency in self.depends.iter_mut().chain(self.imports.iter_mut()) {
			join(&base, dependency.url_mut())?;
		}
		for suggestion in &mut self.suggests {
			join(&base, &mut suggestion.url)?;
		}

		join(&base, &mut self.citation_url)?;
		join(&base, &mut self.manual_url)?;
		join(&base, &mut self.source_url)?;
		for url in self.windows_binaries.values_mut() {
			join(&base, url)?;
		}
		for url in self.osx_binaries.values_mut() {
			join(&base, url)?;
		}
		join(&base, &mut self.old_sources_url)?;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scraped() -> ResolvedPackage {
		ResolvedPackage {
			name: "abc".to_string(),
			url: "https://cran.example.org/snapshot/web/packages/abc/index.html".to_string(),
			depends: vec![
				PackageRef::new("abc.data", "../abc.data/index.html").into(),
				PackageRef::new("nnet", "../nnet/index.html").into(),
			],
			suggests: vec![PackageRef::new("knitr", "../knitr/index.html")],
			citation_url: "citation.html".to_string(),
			manual_url: "abc.pdf".to_string(),
			source_url: "../../../src/contrib/abc_2.1.tar.gz".to_string(),
			windows_binaries: [
				("r-devel".to_string(), "../../../bin/windows/contrib/3.7/abc_2.1.zip".to_string()),
				("r-release".to_string(), "../../../bin/windows/contrib/3.6/abc_2.1.zip".to_string()),
			].into_iter().collect(),
			old_sources_url: "https://cran.example.org/snapshot/src/contrib/Archive/abc".to_string(),
			..Default::default()
		}
	}

	#[test]
	fn resolves_against_own_url() {
		let mut package = scraped();
		package.fix_urls(None).unwrap();

		assert_eq!(package.depends[0].url(), "https://cran.example.org/snapshot/web/packages/abc.data/index.html");
		assert_eq!(package.suggests[0].url, "https://cran.example.org/snapshot/web/packages/knitr/index.html");
		assert_eq!(package.citation_url, "https://cran.example.org/snapshot/web/packages/abc/citation.html");
		assert_eq!(package.source_url, "https://cran.example.org/snapshot/src/contrib/abc_2.1.tar.gz");
		assert_eq!(package.windows_binaries["r-release"], "https://cran.example.org/snapshot/bin/windows/contrib/3.6/abc_2.1.zip");
		assert_eq!(package.old_sources_url, "https://cran.example.org/snapshot/src/contrib/Archive/abc");
	}

	#[test]
	fn idempotent_with_same_base() {
		let base = url::Url::parse("https://cran.example.org/snapshot/web/packages/abc/index.html").unwrap();
		let mut once = scraped();
		once.fix_urls(Some(&base)).unwrap();
		let mut twice = once.clone();
		twice.fix_urls(Some(&base)).unwrap();
		assert_eq!(once, twice);
	}

	#[test]
	fn empty_urls_stay_empty() {
		let mut package = scraped();
		package.manual_url.clear();
		package.fix_urls(None).unwrap();
		assert_eq!(package.manual_url, "");
		assert!(package.osx_binaries.is_empty());
	}

	#[test]
	fn relative_own_url_is_an_error() {
		let mut package = scraped();
		package.url = "abc/index.html".to_string();
		assert!(matches!(package.fix_urls(None), Err(crate::Error::Url(_))));
	}
}
