//! Adapter for durable key/value storage of settings
//!
//! Mirrors the browser's local storage: one string blob per key, no
//! transactions, a single writer.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait StorageAdapter: Debug + Send + Sync {
	/// Reads the blob stored under `key`, `None` if nothing was stored yet
	async fn read_item(&self, key: &str) -> StResult<Option<String>>;

	/// Stores `value` under `key`, replacing any previous blob
	async fn write_item(&self, key: &str, value: &str) -> StResult<()>;

	/// Removes the blob stored under `key`. Removing a missing key is not an error.
	async fn remove_item(&self, key: &str) -> StResult<()>;
}

// vim: ts=4
