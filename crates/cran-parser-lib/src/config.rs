/// Snapshot the tool points at when none is given.
pub const DEFAULT_CRAN_SOURCE: &str = "https://cran.microsoft.com/snapshot/2019-05-24/";

/// User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:101.0) Gecko/20100101 Firefox/101.0";

/// `method` argument handed to `install.packages` in generated scripts.
pub const DEFAULT_TRANSPORT_METHOD: &str = "libcurl";

pub struct CranParserOptions {
	cran_source: String,
	user_agent: String,
	transport_method: String,
}

impl Default for CranParserOptions {
	fn default() -> Self {
		Self {
			cran_source: DEFAULT_CRAN_SOURCE.to_string(),
			user_agent: DEFAULT_USER_AGENT.to_string(),
			transport_method: DEFAULT_TRANSPORT_METHOD.to_string(),
		}
	}
}

impl CranParserOptions {
	pub fn cran_source(&self) -> &str {
		&self.cran_source
	}
	/// returns if the source is a valid absolute url or not.
	pub fn set_cran_source(&mut self, cran_source: impl Into<String>) -> bool {
		let cran_source = cran_source.into();
		if url::Url::parse(&cran_source).is_ok() {
			self.cran_source = cran_source;
			true
		} else {
			false
		}
	}

	pub fn user_agent(&self) -> &str {
		&self.user_agent
	}
	pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
		self.user_agent = user_agent.into();
	}

	pub fn transport_method(&self) -> &str {
		&self.transport_method
	}
	pub fn set_transport_method(&mut self, transport_method: impl Into<String>) {
		self.transport_method = transport_method.into();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_relative_source() {
		let mut options = CranParserOptions::default();
		assert!(!options.set_cran_source("snapshot/2019-05-24/"));
		assert_eq!(options.cran_source(), DEFAULT_CRAN_SOURCE);
		assert!(options.set_cran_source("https://cloud.r-project.org/"));
		assert_eq!(options.cran_source(), "https://cloud.r-project.org/");
	}
}
