//! Settings file retrieval over HTTP(S)

#![forbid(unsafe_code)]

use async_trait::async_trait;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use url::Url;

use studio_types::fetch_adapter::{self, FetchResponse};
use studio_types::prelude::*;

const ACCEPT_TYPES: &str = "application/toml, text/plain;q=0.9, */*;q=0.1";

#[derive(Debug, Clone)]
pub struct FetchAdapterHyper {
	client: Client<HttpsConnector<HttpConnector>, Empty<Bytes>>,
}

impl FetchAdapterHyper {
	pub fn new() -> Self {
		let builder = match HttpsConnectorBuilder::new().with_native_roots() {
			Ok(builder) => builder,
			Err(e) => {
				warn!(error = %e, "No native root certificates, using the bundled ones");
				HttpsConnectorBuilder::new().with_webpki_roots()
			}
		};
		let connector = builder.https_or_http().enable_http1().build();

		let client = Client::builder(TokioExecutor::new()).build(connector);
		Self { client }
	}
}

impl Default for FetchAdapterHyper {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl fetch_adapter::FetchAdapter for FetchAdapterHyper {
	async fn fetch(&self, url: &Url) -> StResult<FetchResponse> {
		let request = hyper::Request::builder()
			.method(hyper::Method::GET)
			.uri(url.as_str())
			.header(hyper::header::ACCEPT, ACCEPT_TYPES)
			.body(Empty::new())
			.map_err(|e| Error::ConfigError(format!("invalid request for {}: {}", url, e)))?;

		debug!("GET {}", url);
		let response =
			self.client.request(request).await.map_err(|e| Error::Network(e.to_string()))?;

		let status = response.status().as_u16();
		let content_type = response
			.headers()
			.get(hyper::header::CONTENT_TYPE)
			.and_then(|v| v.to_str().ok())
			.map(str::to_string);

		let bytes = response
			.into_body()
			.collect()
			.await
			.map_err(|e| Error::Network(e.to_string()))?
			.to_bytes();
		let body = String::from_utf8_lossy(&bytes).into_owned();
		debug!("GET {} -> {} ({} bytes)", url, status, bytes.len());

		let response = FetchResponse::new(status, body);
		Ok(match content_type {
			Some(content_type) => response.with_content_type(content_type),
			None => response,
		})
	}
}

// vim: ts=4
