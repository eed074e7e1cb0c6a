//! Built-in defaults used to pre-fill the settings form

use std::sync::LazyLock;

use crate::value::{Document, FieldState};

static DEFAULT_SETTINGS: LazyLock<Document> = LazyLock::new(|| {
	Document::new()
		.with("opencast.serverUrl", "https://develop.opencast.org")
		.with("opencast.loginName", "admin")
		.with("opencast.loginPassword", "opencast")
		.with("upload.titleField", FieldState::Required)
		.with("upload.presenterField", FieldState::Required)
});

/// Form defaults. Never used as the effective configuration.
pub fn default_settings() -> &'static Document {
	&DEFAULT_SETTINGS
}

// vim: ts=4
