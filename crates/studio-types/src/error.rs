//! Error type shared by the settings engine and its adapters

use std::fmt;

pub type StResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	/// The transport could not reach the server
	Network(String),
	/// A present document could not be parsed
	Parse(String),
	/// Persistence backend failure
	Storage(String),
	ConfigError(String),

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::Network(msg) => write!(f, "network error: {}", msg),
			Error::Parse(msg) => write!(f, "parse error: {}", msg),
			Error::Storage(msg) => write!(f, "storage error: {}", msg),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::Io(e) => write!(f, "io error: {}", e),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(e) => Some(e),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		if err.kind() == std::io::ErrorKind::NotFound {
			return Self::NotFound;
		}
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Parse(err.to_string())
	}
}

impl From<url::ParseError> for Error {
	fn from(err: url::ParseError) -> Self {
		Self::ConfigError(format!("invalid url: {}", err))
	}
}


// vim: ts=4
