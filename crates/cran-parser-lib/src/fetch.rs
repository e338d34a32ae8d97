//! Retrieval of raw documents.
//!
//! Everything that touches the network goes through [`DocumentSource`] so the
//! rest of the crate can be driven by something other than a live mirror.

pub mod cache;
pub use cache::ResponseCache;

/// Something that can hand back the bytes found at a url.
pub trait DocumentSource {
	/// Fetches the document at `url`.
	///
	/// Failures are fatal to the caller, there is no retrying at any layer.
	fn fetch(&self, url: &url::Url) -> crate::Result<Vec<u8>>;
}

/// Blocking HTTP source.
///
/// Sends a fixed User-Agent and follows redirects, no other headers are set and no timeout is configured.
pub struct HttpSource {
	client: reqwest::blocking::Client,
}

impl HttpSource {
	pub fn new(options: &crate::CranParserOptions) -> crate::Result<Self> {
		let client = reqwest::blocking::Client::builder()
			.user_agent(options.user_agent())
			.redirect(reqwest::redirect::Policy::default())
			.build()?;
		Ok(Self { client })
	}
}

impl DocumentSource for HttpSource {
	fn fetch(&self, url: &url::Url) -> crate::Result<Vec<u8>> {
		log::trace!("GET {}", url);
		let bytes = self.client
			.get(url.clone())
			.send()?
			.error_for_status()?
			.bytes()?
			.to_vec();
		log::trace!("Fetched {} bytes from {}", bytes.len(), url);
		Ok(bytes)
	}
}
