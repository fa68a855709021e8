use std::path::{Path, PathBuf};

use dossier_core::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Directory-scoped JSON file store. Each collection is a pretty-printed
/// JSON array in `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::Persistence(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(JsonStore { dir })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Read a collection. A missing file is an empty collection; a corrupt
    /// or unreadable one is a persistence error the caller may recover
    /// from by starting empty.
    pub async fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, AppError> {
        let path = self.path(name);
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::Persistence(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        serde_json::from_slice(&data).map_err(|e| {
            AppError::Persistence(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Replace a collection on disk. The write goes to a sibling temp file
    /// first and is renamed into place, so readers never observe a
    /// partially written collection.
    pub async fn save<T: Serialize>(&self, name: &str, items: &[T]) -> Result<(), AppError> {
        let path = self.path(name);
        let tmp_path = self.dir.join(format!("{}.json.tmp", name));
        let data = serde_json::to_vec_pretty(items)
            .map_err(|e| AppError::Persistence(format!("Failed to serialize {}: {}", name, e)))?;

        tokio::fs::write(&tmp_path, &data).await.map_err(|e| {
            AppError::Persistence(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        tokio::fs::rename(&tmp_path, &path).await.map_err(|e| {
            AppError::Persistence(format!("Failed to replace {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}
