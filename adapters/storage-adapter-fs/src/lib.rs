//! Local settings storage in plain files, one file per key

#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{
	fs::{File, create_dir_all, read_to_string, remove_file, rename},
	io::AsyncWriteExt,
};

use studio_types::{prelude::*, storage_adapter};

/// Keys become file names, so only a conservative character set is accepted
fn check_key(key: &str) -> StResult<()> {
	let valid = !key.is_empty()
		&& !key.starts_with('.')
		&& key.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'));
	if valid { Ok(()) } else { Err(Error::Storage(format!("invalid storage key {:?}", key))) }
}

fn item_path(base_dir: &Path, key: &str) -> StResult<PathBuf> {
	check_key(key)?;
	Ok(base_dir.join(key))
}

fn item_tmp_path(base_dir: &Path, key: &str) -> StResult<PathBuf> {
	check_key(key)?;
	Ok(base_dir.join(format!(".{}.tmp", key)))
}

#[derive(Debug)]
pub struct StorageAdapterFs {
	base_dir: Box<Path>,
}

impl StorageAdapterFs {
	pub async fn new(base_dir: Box<Path>) -> StResult<Self> {
		create_dir_all(&base_dir).await?;
		Ok(Self { base_dir })
	}
}

#[async_trait]
impl storage_adapter::StorageAdapter for StorageAdapterFs {
	async fn read_item(&self, key: &str) -> StResult<Option<String>> {
		let path = item_path(&self.base_dir, key)?;
		match read_to_string(&path).await {
			Ok(text) => Ok(Some(text)),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(e.into()),
		}
	}

	/// Writes through a temporary file so a crash never leaves a torn blob
	async fn write_item(&self, key: &str, value: &str) -> StResult<()> {
		let path = item_path(&self.base_dir, key)?;
		let tmp_path = item_tmp_path(&self.base_dir, key)?;
		debug!("write_item: {:?}", &path);

		let res = async {
			let mut file = File::create(&tmp_path).await?;
			file.write_all(value.as_bytes()).await?;
			file.sync_all().await?;
			rename(&tmp_path, &path).await?;
			Ok::<(), Error>(())
		}
		.await;
		if let Err(e) = res {
			warn!(error = %e, "Writing {:?} failed, removing tmpfile", &path);
			let _ = remove_file(&tmp_path).await;
			return Err(e);
		}
		Ok(())
	}

	async fn remove_item(&self, key: &str) -> StResult<()> {
		let path = item_path(&self.base_dir, key)?;
		match remove_file(&path).await {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(e.into()),
		}
	}
}


// vim: ts=4
