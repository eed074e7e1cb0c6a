//! Settings manager
//!
//! Owns the three validated fragments and derives every view of the
//! configuration from them. Precedence for the effective configuration is
//! user settings, then the server settings file, then the URL.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;
use url::Url;

use crate::defaults::default_settings;
use crate::merge::{merge, merge_into};
use crate::opts::SettingsOpts;
use crate::prelude::*;
use crate::source::{load_local, load_query, load_server_file, settings_file_url};
use crate::validate::validate;
use crate::value::Document;
use studio_types::fetch_adapter::FetchAdapter;
use studio_types::storage_adapter::StorageAdapter;

#[derive(Debug)]
pub struct SettingsManager {
	opts: SettingsOpts,
	storage: Arc<dyn StorageAdapter>,
	/// Page the settings were loaded for
	location: Url,
	/// Settings from the server settings file
	context: Document,
	/// Settings from the page URL
	url: Document,
	/// Settings stored by the user
	user: Document,
	tx: broadcast::Sender<Document>,
}

impl SettingsManager {
	/// Loads and validates all sources for the page at `location`.
	///
	/// Only a settings file that is served but malformed makes this fail,
	/// every other problem leaves the affected fragment empty.
	pub async fn init(
		opts: SettingsOpts,
		storage: Arc<dyn StorageAdapter>,
		fetcher: &dyn FetchAdapter,
		location: &Url,
	) -> StResult<Self> {
		let raw = load_local(storage.as_ref(), &opts.storage_key).await;
		let user = validate(&raw, false, Source::LocalStorage, "local storage");

		let context = match settings_file_url(location, &opts) {
			Ok(url) => match load_server_file(fetcher, &url).await? {
				Some(raw) => validate(&raw, false, Source::ServerFile, url.as_str()),
				None => Document::new(),
			},
			Err(e) => {
				warn!(error = %e, "Could not determine settings file location, skipping it");
				Document::new()
			}
		};

		let query = load_query(location);
		let url = validate(&query.raw, query.allow_coercion, Source::Url, "URL parameters");

		let (tx, _rx) = broadcast::channel(opts.change_capacity.max(1));
		info!(
			user = user.len(),
			context = context.len(),
			url = url.len(),
			"Settings initialized"
		);

		Ok(Self { opts, storage, location: location.clone(), context, url, user, tx })
	}

	pub fn opts(&self) -> &SettingsOpts {
		&self.opts
	}

	pub fn context_settings(&self) -> &Document {
		&self.context
	}

	pub fn url_settings(&self) -> &Document {
		&self.url
	}

	pub fn user_settings(&self) -> &Document {
		&self.user
	}

	/// The configuration the application must use
	pub fn effective_settings(&self) -> Document {
		merge([&self.user, &self.context, &self.url])
	}

	/// Defaults overlaid with user settings, only for pre-filling forms
	pub fn form_defaults(&self) -> Document {
		merge([default_settings(), &self.user])
	}

	/// Settings outside of the user's control
	pub fn fixed_settings(&self) -> Document {
		merge([&self.context, &self.url])
	}

	/// False once the server file or the URL pins `path`
	pub fn is_configurable(&self, path: &str) -> bool {
		!self.fixed_settings().contains_path(path)
	}

	fn login_provided(&self) -> bool {
		self.fixed_settings().get_bool("opencast.loginProvided") == Some(true)
	}

	pub fn is_username_configurable(&self) -> bool {
		!self.login_provided() && self.is_configurable("opencast.loginName")
	}

	pub fn is_password_configurable(&self) -> bool {
		!self.login_provided() && self.is_configurable("opencast.loginPassword")
	}

	pub fn is_server_url_configurable(&self) -> bool {
		self.is_configurable("opencast.serverUrl")
	}

	/// Effective `return.target`, if it points somewhere we may send the user.
	///
	/// The target is resolved against the page location the way a browser
	/// would. It must stay on the page's origin or land on one of the
	/// `return.allowedDomains`.
	pub fn return_target(&self) -> Option<String> {
		let effective = self.effective_settings();
		let target = effective.get_str("return.target")?;

		// Browsers strip control characters and read `\` as `/`
		if target.chars().any(|c| c.is_ascii_control()) || target.starts_with("/\\") {
			warn!(target = ?target, "Return target is malformed, ignoring it");
			return None;
		}
		let resolved = match self.location.join(target) {
			Ok(resolved) if matches!(resolved.scheme(), "http" | "https") => resolved,
			_ => {
				warn!(target = %target, "Return target is not an http(s) location, ignoring it");
				return None;
			}
		};
		if resolved.origin() == self.location.origin() {
			return Some(target.to_string());
		}

		let allowed: Vec<&str> = effective
			.value("return.allowedDomains")
			.and_then(|v| v.as_list())
			.map(|list| list.iter().filter_map(|v| v.as_str()).collect())
			.unwrap_or_default();
		let host_allowed = resolved
			.host_str()
			.is_some_and(|host| allowed.iter().any(|domain| domain_matches(host, domain)));

		if host_allowed {
			Some(target.to_string())
		} else {
			warn!(target = %target, "Return target is not in the allowed domains, ignoring it");
			None
		}
	}

	/// Registers for changes of the effective configuration.
	/// Dropping the receiver unregisters it.
	pub fn subscribe(&self) -> broadcast::Receiver<Document> {
		self.tx.subscribe()
	}

	/// Validates `raw`, merges it into the user settings and persists them.
	///
	/// Returns the new effective configuration, which is also sent to all
	/// subscribers.
	pub async fn save_settings(&mut self, raw: &Value) -> StResult<Document> {
		let update = validate(raw, false, Source::LocalStorage, "saved settings");
		let mut user = self.user.clone();
		merge_into(&mut user, &update);

		let text = serde_json::to_string(&user)?;
		self.storage.write_item(&self.opts.storage_key, &text).await?;
		self.user = user;
		debug!(key = %self.opts.storage_key, "User settings saved");

		let effective = self.effective_settings();
		// No receivers is fine
		let _ = self.tx.send(effective.clone());
		Ok(effective)
	}
}

fn domain_matches(host: &str, domain: &str) -> bool {
	let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
	if domain.is_empty() {
		return false;
	}
	host == domain || host.strip_suffix(&domain).is_some_and(|rest| rest.ends_with('.'))
}


// vim: ts=4
