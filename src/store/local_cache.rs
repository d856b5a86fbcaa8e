// src/store/local_cache.rs

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::config::LOCAL_CACHE_KEY;
use crate::error::AppError;
use crate::models::resource::{Resource, resources_from_value};

/// File-backed slot holding the user-submitted resource list.
///
/// One named slot, one JSON array. Reads are lenient: a missing slot is
/// empty, a corrupt slot is logged and treated as empty, so the catalog load
/// never fails on cache problems. Writes go through a temp file and a rename;
/// a concurrent writer in another process can still win the rename race
/// (single-writer is the intended flow).
#[derive(Debug, Clone)]
pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{LOCAL_CACHE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the submitted-resource list.
    pub async fn read(&self) -> Vec<Resource> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(
                    "failed to read local cache {}: {err}",
                    self.path.display()
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => resources_from_value(&value, "local cache"),
            Err(err) => {
                tracing::warn!("local cache is not valid JSON, treating as empty: {err}");
                Vec::new()
            }
        }
    }

    /// Appends one resource (read-modify-write on the single slot) and returns
    /// the new total.
    pub async fn append(&self, resource: &Resource) -> Result<usize, AppError> {
        let mut existing = self.read().await;
        existing.push(resource.clone());
        self.write(&existing).await?;
        Ok(existing.len())
    }

    async fn write(&self, resources: &[Resource]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(resources)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
