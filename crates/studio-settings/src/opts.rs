//! Settings manager options

/// Local storage key holding the user's settings
pub const DEFAULT_STORAGE_KEY: &str = "ocStudioSettings";

/// Settings file path, overridable when building a deployment
pub const DEFAULT_SETTINGS_PATH: &str = match option_env!("STUDIO_SETTINGS_PATH") {
	Some(path) => path,
	None => "settings.toml",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsOpts {
	pub storage_key: String,
	/// Path of the server settings document. Relative paths are resolved
	/// against `public_path`, absolute ones against the server root.
	pub settings_path: String,
	/// Path the application is deployed under
	pub public_path: String,
	/// Buffered change notifications per subscriber
	pub change_capacity: usize,
}

impl Default for SettingsOpts {
	fn default() -> Self {
		Self {
			storage_key: DEFAULT_STORAGE_KEY.to_string(),
			settings_path: DEFAULT_SETTINGS_PATH.to_string(),
			public_path: "/".to_string(),
			change_capacity: 16,
		}
	}
}

impl SettingsOpts {
	pub fn storage_key(mut self, key: impl Into<String>) -> Self {
		self.storage_key = key.into();
		self
	}

	pub fn settings_path(mut self, path: impl Into<String>) -> Self {
		self.settings_path = path.into();
		self
	}

	pub fn public_path(mut self, path: impl Into<String>) -> Self {
		self.public_path = path.into();
		self
	}

	pub fn change_capacity(mut self, capacity: usize) -> Self {
		self.change_capacity = capacity.max(1);
		self
	}
}

// vim: ts=4
