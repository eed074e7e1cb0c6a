//! Settings document deployed next to the application

use serde_json::Value;
use url::Url;

use super::{SETTINGS_FILE_PARAM, parse_toml};
use crate::opts::SettingsOpts;
use crate::prelude::*;
use studio_types::fetch_adapter::FetchAdapter;

/// Computes the URL of the settings document for the page at `location`.
///
/// A path starting with `/` is resolved against the server root, anything else
/// against the public path. The `settingsFile` query parameter may replace the
/// file name, but only with a bare name.
pub fn settings_file_url(location: &Url, opts: &SettingsOpts) -> StResult<Url> {
	let mut path = opts.settings_path.clone();

	let requested = location
		.query_pairs()
		.find(|(key, _)| key == SETTINGS_FILE_PARAM)
		.map(|(_, value)| value.into_owned());
	if let Some(file) = requested {
		if file.is_empty() || file.contains(['/', '\\']) {
			warn!(
				"Ignoring '{}' parameter {:?}: only a file name is allowed, using {:?}",
				SETTINGS_FILE_PARAM, file, path
			);
		} else {
			path = match path.rsplit_once('/') {
				Some((dir, _)) => format!("{}/{}", dir, file),
				None => file,
			};
		}
	}

	let url = if path.starts_with('/') {
		location.join(&path)?
	} else {
		let mut public = opts.public_path.clone();
		if !public.starts_with('/') {
			public.insert(0, '/');
		}
		if !public.ends_with('/') {
			public.push('/');
		}
		location.join(&format!("{}{}", public, path))?
	};
	Ok(url)
}

/// Fetches and parses the settings document.
///
/// An absent or unreachable file yields `None`. A file that is served but
/// can't be parsed is a deployment error and is returned as `Error::Parse`.
pub async fn load_server_file(fetcher: &dyn FetchAdapter, url: &Url) -> StResult<Option<Value>> {
	let response = match fetcher.fetch(url).await {
		Ok(response) => response,
		Err(e) => {
			warn!(error = %e, "Could not fetch settings file {}, continuing without it", url);
			return Ok(None);
		}
	};

	if response.status == 404 {
		debug!("No settings file at {}", url);
		return Ok(None);
	}
	if !response.is_success() {
		error!("Fetching settings file {} failed with status {}", url, response.status);
		return Ok(None);
	}
	if response.is_markup() {
		error!(
			"Settings file {} was served as {:?}, probably an error page; ignoring it",
			url,
			response.content_type.as_deref().unwrap_or_default()
		);
		return Ok(None);
	}

	match parse_toml(&response.body) {
		Ok(raw) => {
			info!("Loaded settings file {}", url);
			Ok(Some(raw))
		}
		Err(e) => {
			error!(error = %e, "Settings file {} is not valid TOML", url);
			Err(Error::Parse(format!("settings file {}: {}", url, e)))
		}
	}
}


// vim: ts=4
