//! In-memory adapters shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

use studio_types::fetch_adapter::{FetchAdapter, FetchResponse};
use studio_types::storage_adapter::StorageAdapter;
use studio_types::{Error, StResult};

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
	items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn with_item(key: &str, value: &str) -> Arc<Self> {
		let storage = Self::default();
		storage.items.lock().unwrap().insert(key.to_string(), value.to_string());
		Arc::new(storage)
	}

	pub fn item(&self, key: &str) -> Option<String> {
		self.items.lock().unwrap().get(key).cloned()
	}
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
	async fn read_item(&self, key: &str) -> StResult<Option<String>> {
		Ok(self.items.lock().unwrap().get(key).cloned())
	}

	async fn write_item(&self, key: &str, value: &str) -> StResult<()> {
		self.items.lock().unwrap().insert(key.to_string(), value.to_string());
		Ok(())
	}

	async fn remove_item(&self, key: &str) -> StResult<()> {
		self.items.lock().unwrap().remove(key);
		Ok(())
	}
}

/// Storage that fails every operation
#[derive(Debug, Default)]
pub struct BrokenStorage;

#[async_trait]
impl StorageAdapter for BrokenStorage {
	async fn read_item(&self, _key: &str) -> StResult<Option<String>> {
		Err(Error::Storage("disk on fire".into()))
	}

	async fn write_item(&self, _key: &str, _value: &str) -> StResult<()> {
		Err(Error::Storage("disk on fire".into()))
	}

	async fn remove_item(&self, _key: &str) -> StResult<()> {
		Err(Error::Storage("disk on fire".into()))
	}
}

/// Serves a fixed response and records the requested URLs
#[derive(Debug)]
pub struct StaticFetcher {
	response: Option<FetchResponse>,
	requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
	pub fn toml(body: &str) -> Self {
		Self::respond(FetchResponse::new(200, body).with_content_type("application/toml"))
	}

	pub fn not_found() -> Self {
		Self::respond(FetchResponse::new(404, "not found").with_content_type("text/plain"))
	}

	pub fn respond(response: FetchResponse) -> Self {
		Self { response: Some(response), requests: Mutex::new(Vec::new()) }
	}

	/// Fails at the transport level
	pub fn unreachable() -> Self {
		Self { response: None, requests: Mutex::new(Vec::new()) }
	}

	pub fn requests(&self) -> Vec<String> {
		self.requests.lock().unwrap().clone()
	}
}

#[async_trait]
impl FetchAdapter for StaticFetcher {
	async fn fetch(&self, url: &Url) -> StResult<FetchResponse> {
		self.requests.lock().unwrap().push(url.to_string());
		match &self.response {
			Some(response) => Ok(response.clone()),
			None => Err(Error::Network("connection refused".into())),
		}
	}
}

pub fn location(url: &str) -> Url {
	Url::parse(url).unwrap()
}

// vim: ts=4
