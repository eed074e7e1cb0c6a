//! Adapter for fetching the server-provided settings document

use async_trait::async_trait;
use std::fmt::Debug;
use url::Url;

use crate::prelude::*;

/// A completed HTTP response, body already read as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
	pub status: u16,
	pub content_type: Option<String>,
	pub body: String,
}

impl FetchResponse {
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, content_type: None, body: body.into() }
	}

	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// True when the server answered with an HTML page instead of the document,
	/// typically a SPA fallback or an error page.
	pub fn is_markup(&self) -> bool {
		self.content_type.as_deref().is_some_and(|ct| {
			let ct = ct.to_ascii_lowercase();
			ct.starts_with("text/html") || ct.starts_with("application/xhtml+xml")
		})
	}
}

#[async_trait]
pub trait FetchAdapter: Debug + Send + Sync {
	/// Performs a GET request.
	///
	/// Transport failures (DNS, connection refused, TLS) are reported as
	/// `Error::Network`. Any HTTP status, including 404, is a successful fetch.
	async fn fetch(&self, url: &Url) -> StResult<FetchResponse>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_markup_detection() {
		let res = FetchResponse::new(200, "<html>").with_content_type("text/html; charset=utf-8");
		assert!(res.is_markup());

		let res = FetchResponse::new(200, "<html/>").with_content_type("Application/XHTML+XML");
		assert!(res.is_markup());

		let res = FetchResponse::new(200, "a = 1").with_content_type("application/toml");
		assert!(!res.is_markup());

		assert!(!FetchResponse::new(200, "").is_markup());
	}

	#[test]
	fn test_success_range() {
		assert!(FetchResponse::new(204, "").is_success());
		assert!(!FetchResponse::new(404, "").is_success());
		assert!(!FetchResponse::new(301, "").is_success());
	}
}

// vim: ts=4
