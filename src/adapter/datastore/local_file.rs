use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::result::Result as DefaultResult;
use std::sync::Mutex;

use super::AbstKeyValStorage;
use crate::config::AppBasepathCfg;
use crate::error::{AppError, AppErrorCode};

// Persistent variant, the whole storage area is one flat JSON document
// (object of key to string) on local filesystem, re-read on every access
// and rewritten whole on every modification, so concurrent processes
// sharing the file observe each other the way separate browser tabs
// observe the same origin storage. There is no change notification on
// the file, interested readers poll (see `usecase::sync_cart`).
#[derive(Debug)]
pub struct AppLocalFileKeyValStore {
    filepath: PathBuf,
    capacity_bytes: usize,
    flock: Mutex<()>,
}

impl AppLocalFileKeyValStore {
    pub fn try_build(
        basepath: &AppBasepathCfg,
        rel_path: &str,
        capacity_bytes: usize,
    ) -> DefaultResult<Self, AppError> {
        let mut fullpath = basepath.service.clone();
        if !fullpath.ends_with('/') && !rel_path.starts_with('/') {
            fullpath += "/";
        }
        fullpath += rel_path;
        let filepath = PathBuf::from(fullpath);
        if let Some(parent) = filepath.parent() {
            fs::create_dir_all(parent)?;
        }
        let obj = Self {
            filepath,
            capacity_bytes,
            flock: Mutex::new(()),
        };
        let _discard = obj.load_doc()?; // reject a corrupt document up front
        Ok(obj)
    }

    fn load_doc(&self) -> DefaultResult<HashMap<String, String>, AppError> {
        if !self.filepath.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.filepath)?;
        if raw.trim().is_empty() {
            Ok(HashMap::new())
        } else {
            serde_json::from_str::<HashMap<String, String>>(raw.as_str()).map_err(|e| AppError {
                code: AppErrorCode::DataCorruption,
                detail: Some(format!("local-store-doc, {e}")),
            })
        }
    }

    fn store_doc(&self, doc: &HashMap<String, String>) -> DefaultResult<(), AppError> {
        let serial = serde_json::to_string(doc)?;
        if serial.len() > self.capacity_bytes {
            return Err(AppError {
                code: AppErrorCode::QuotaExceeded,
                detail: Some(format!(
                    "usage:{}, capacity:{}",
                    serial.len(),
                    self.capacity_bytes
                )),
            });
        }
        fs::write(&self.filepath, serial)?;
        Ok(())
    }

    fn lock_file(&self) -> DefaultResult<std::sync::MutexGuard<()>, AppError> {
        self.flock.lock().map_err(|e| AppError {
            code: AppErrorCode::AcquireLockFailure,
            detail: Some(e.to_string()),
        })
    }
} // end of impl AppLocalFileKeyValStore

impl AbstKeyValStorage for AppLocalFileKeyValStore {
    fn get_item(&self, key: &str) -> DefaultResult<Option<String>, AppError> {
        let _guard = self.lock_file()?;
        let mut doc = self.load_doc()?;
        Ok(doc.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> DefaultResult<(), AppError> {
        let _guard = self.lock_file()?;
        let mut doc = self.load_doc()?;
        let _discard = doc.insert(key.to_string(), value.to_string());
        self.store_doc(&doc)
    }

    fn remove_item(&self, key: &str) -> DefaultResult<(), AppError> {
        let _guard = self.lock_file()?;
        let mut doc = self.load_doc()?;
        if doc.remove(key).is_some() {
            self.store_doc(&doc)
        } else {
            Ok(())
        }
    }
}
