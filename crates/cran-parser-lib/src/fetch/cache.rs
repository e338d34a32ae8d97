//! Response memoization.

use std::collections::HashMap;

use super::DocumentSource;

/// Keeps response bodies by request url.
///
/// Unbounded and never invalidated. In practice only the catalogue listing is stored here.
#[derive(Debug, Default)]
pub struct ResponseCache {
	entries: HashMap<url::Url, Vec<u8>>,
}

impl ResponseCache {
	pub fn contains(&self, url: &url::Url) -> bool {
		self.entries.contains_key(url)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the cached body for `url`, fetching it through `source` on a miss.
	pub fn get_or_fetch(&mut self, source: &impl DocumentSource, url: &url::Url) -> crate::Result<&[u8]> {
		if self.entries.contains_key(url) {
			log::trace!("Cache hit for {}", url);
		} else {
			let body = source.fetch(url)?;
			self.entries.insert(url.clone(), body);
		}
		/* Present either way by now */
		Ok(self.entries.get(url).map(|v| v.as_slice()).unwrap_or_default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;

	struct CountingSource {
		calls: Cell<usize>,
	}

	impl DocumentSource for CountingSource {
		fn fetch(&self, url: &url::Url) -> crate::Result<Vec<u8>> {
			self.calls.set(self.calls.get() + 1);
			Ok(url.as_str().as_bytes().to_vec())
		}
	}

	#[test]
	fn fetches_once_per_url() {
		let source = CountingSource { calls: Cell::new(0) };
		let mut cache = ResponseCache::default();
		let url = url::Url::parse("https://example.org/index.html").unwrap();

		let first = cache.get_or_fetch(&source, &url).unwrap().to_vec();
		let second = cache.get_or_fetch(&source, &url).unwrap().to_vec();

		assert_eq!(first, second);
		assert_eq!(source.calls.get(), 1);
		assert_eq!(cache.len(), 1);
		assert!(cache.contains(&url));
	}

	#[test]
	fn failed_fetch_is_not_cached() {
		struct Failing;
		impl DocumentSource for Failing {
			fn fetch(&self, _url: &url::Url) -> crate::Result<Vec<u8>> {
				Err(crate::Error::Parse("unreachable mirror".to_string()))
			}
		}

		let mut cache = ResponseCache::default();
		let url = url::Url::parse("https://example.org/index.html").unwrap();
		assert!(cache.get_or_fetch(&Failing, &url).is_err());
		assert!(cache.is_empty());
	}
}
