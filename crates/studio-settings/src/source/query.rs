//! Settings passed as URL query parameters
//!
//! Two forms are supported: `?config=<hex>` carrying a whole hex-encoded TOML
//! document, or discrete dotted parameters like `?recording.videoBitrate=5000`.

use serde_json::{Map, Value};
use url::Url;

use super::{empty_object, parse_toml};
use crate::prelude::*;

/// Selects an alternative server settings file, never a setting itself
pub const SETTINGS_FILE_PARAM: &str = "settingsFile";
/// Carries the packed, hex-encoded TOML form
pub const CONFIG_PARAM: &str = "config";

/// Raw settings read from the query string
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySettings {
	pub raw: Value,
	/// Discrete parameters are always strings and need coercion, the packed
	/// form is typed TOML
	pub allow_coercion: bool,
}

impl QuerySettings {
	fn packed(raw: Value) -> Self {
		Self { raw, allow_coercion: false }
	}
}

/// Reads settings from the query string of `location`
pub fn load_query(location: &Url) -> QuerySettings {
	let params: Vec<(String, String)> = location
		.query_pairs()
		.filter(|(key, _)| key != SETTINGS_FILE_PARAM)
		.map(|(key, value)| (key.into_owned(), value.into_owned()))
		.collect();

	let Some(pos) = params.iter().position(|(key, _)| key == CONFIG_PARAM) else {
		return QuerySettings { raw: from_dotted(&params), allow_coercion: true };
	};

	for (i, (key, _)) in params.iter().enumerate() {
		if i != pos {
			warn!(
				"URL parameter '{}' is ignored: '{}' can't be mixed with other settings",
				key, CONFIG_PARAM
			);
		}
	}

	QuerySettings::packed(decode_packed(&params[pos].1))
}

fn decode_packed(hex_text: &str) -> Value {
	let bytes = match hex::decode(hex_text) {
		Ok(bytes) => bytes,
		Err(e) => {
			warn!(error = %e, "'{}' URL parameter is not valid hex, ignoring it", CONFIG_PARAM);
			return empty_object();
		}
	};
	let text = match String::from_utf8(bytes) {
		Ok(text) => text,
		Err(e) => {
			warn!(error = %e, "'{}' URL parameter is not valid UTF-8, ignoring it", CONFIG_PARAM);
			return empty_object();
		}
	};
	match parse_toml(&text) {
		Ok(raw) => raw,
		Err(e) => {
			warn!(error = %e, "'{}' URL parameter is not valid TOML, ignoring it", CONFIG_PARAM);
			empty_object()
		}
	}
}

/// Builds a nested object from dotted keys. On collisions the later
/// parameter wins, replacing a value or a whole namespace.
fn from_dotted(params: &[(String, String)]) -> Value {
	let mut root = Map::new();
	for (key, value) in params {
		let segments: Vec<&str> = key.split('.').collect();
		insert_dotted(&mut root, &segments, value);
	}
	Value::Object(root)
}

fn insert_dotted(obj: &mut Map<String, Value>, segments: &[&str], value: &str) {
	match segments {
		[] => {}
		[leaf] => {
			obj.insert((*leaf).to_string(), Value::String(value.to_string()));
		}
		[head, rest @ ..] => {
			let entry = obj.entry(*head).or_insert_with(empty_object);
			if !entry.is_object() {
				*entry = empty_object();
			}
			if let Value::Object(next) = entry {
				insert_dotted(next, rest, value);
			}
		}
	}
}


// vim: ts=4
