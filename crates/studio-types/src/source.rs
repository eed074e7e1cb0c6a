//! Trust sources of settings fragments

use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a settings fragment
///
/// The server file is deployed by the administrator and is the only fully
/// trusted source. URL parameters and locally persisted values come from the
/// user and are subject to `onlyFromServer` restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
	#[serde(rename = "server-file")]
	ServerFile,
	#[serde(rename = "url")]
	Url,
	#[serde(rename = "local-storage")]
	LocalStorage,
}

impl Source {
	pub fn is_trusted(self) -> bool {
		self == Source::ServerFile
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Source::ServerFile => "server-file",
			Source::Url => "url",
			Source::LocalStorage => "local-storage",
		}
	}
}

impl fmt::Display for Source {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

// vim: ts=4
