//! Settings persisted by the user in local storage

use serde_json::Value;

use super::empty_object;
use crate::prelude::*;
use studio_types::storage_adapter::StorageAdapter;

/// Reads the persisted user settings.
///
/// Missing, unreadable or unparseable entries all yield an empty object.
pub async fn load_local(storage: &dyn StorageAdapter, key: &str) -> Value {
	let text = match storage.read_item(key).await {
		Ok(Some(text)) => text,
		Ok(None) => {
			debug!("No settings stored under '{}'", key);
			return empty_object();
		}
		Err(e) => {
			warn!(error = %e, "Failed to read local settings '{}', ignoring them", key);
			return empty_object();
		}
	};

	match serde_json::from_str::<Value>(&text) {
		Ok(raw) => raw,
		Err(e) => {
			warn!(error = %e, "Stored settings '{}' are not valid JSON, ignoring them", key);
			empty_object()
		}
	}
}

// vim: ts=4
