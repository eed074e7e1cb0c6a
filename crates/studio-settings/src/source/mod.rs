//! Loaders for the three settings sources
//!
//! Each loader produces a raw, untrusted JSON object. Validation happens
//! afterwards in the settings manager.

pub mod local;
pub mod query;
pub mod server_file;

use serde_json::{Map, Value};

use crate::prelude::*;

pub use local::load_local;
pub use query::{CONFIG_PARAM, QuerySettings, SETTINGS_FILE_PARAM, load_query};
pub use server_file::{load_server_file, settings_file_url};

/// Parses TOML text into a raw JSON object
pub fn parse_toml(text: &str) -> StResult<Value> {
	let table: toml::Table = toml::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
	serde_json::to_value(table).map_err(|e| Error::Parse(e.to_string()))
}

pub(crate) fn empty_object() -> Value {
	Value::Object(Map::new())
}


// vim: ts=4
