//! Resolves the settings for a page location and prints them
//!
//! `STUDIO_LOCATION` is the page URL including its query string,
//! `STUDIO_DATA_DIR` holds the locally stored user settings.

use std::{env, path, sync::Arc};

use serde_json::json;
use studio_fetch_adapter_hyper::FetchAdapterHyper;
use studio_settings::{Error, SettingsManager, SettingsOpts, StResult};
use studio_storage_adapter_fs::StorageAdapterFs;
use tracing_subscriber::EnvFilter;
use url::Url;

pub struct Config {
	pub location: Url,
	pub data_dir: path::PathBuf,
	pub public_path: String,
}

impl Config {
	fn from_env() -> StResult<Self> {
		let location = env::var("STUDIO_LOCATION").unwrap_or("http://localhost:3000/".to_string());
		Ok(Self {
			location: Url::parse(&location)
				.map_err(|e| Error::ConfigError(format!("STUDIO_LOCATION {:?}: {}", location, e)))?,
			data_dir: path::PathBuf::from(
				env::var("STUDIO_DATA_DIR").unwrap_or("./data".to_string()),
			),
			public_path: env::var("STUDIO_PUBLIC_PATH").unwrap_or("/".to_string()),
		})
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> StResult<()> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();

	let config = Config::from_env()?;
	let storage = Arc::new(StorageAdapterFs::new(config.data_dir.into()).await?);
	let fetcher = FetchAdapterHyper::new();
	let opts = SettingsOpts::default().public_path(config.public_path);

	let settings = SettingsManager::init(opts, storage, &fetcher, &config.location).await?;

	let out = json!({
		"effective": settings.effective_settings().to_json(),
		"fixed": settings.fixed_settings().to_json(),
		"formDefaults": settings.form_defaults().to_json(),
		"configurable": {
			"serverUrl": settings.is_server_url_configurable(),
			"loginName": settings.is_username_configurable(),
			"loginPassword": settings.is_password_configurable(),
		},
		"returnTarget": settings.return_target(),
	});
	let text = serde_json::to_string_pretty(&out)?;
	println!("{}", text);

	Ok(())
}

// vim: ts=4
