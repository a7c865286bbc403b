use std::collections::HashMap;
use std::result::Result as DefaultResult;
use std::sync::Mutex;

use super::AbstKeyValStorage;
use crate::error::{AppError, AppErrorCode};

// volatile variant, for unit tests and ephemeral sessions without a
// persistent storage area
pub struct AppInMemKeyValStore {
    capacity_bytes: usize,
    cells: Mutex<HashMap<String, String>>,
}

impl AppInMemKeyValStore {
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            cells: Mutex::new(HashMap::new()),
        }
    }

    fn lock_cells(&self) -> DefaultResult<std::sync::MutexGuard<HashMap<String, String>>, AppError> {
        self.cells.lock().map_err(|e| AppError {
            code: AppErrorCode::AcquireLockFailure,
            detail: Some(e.to_string()),
        })
    }

    // usage is approximated by the byte length of every key and value,
    // close to how browsers account the per-origin quota
    fn quota_check(
        &self,
        curr: &HashMap<String, String>,
        key: &str,
        value: &str,
    ) -> DefaultResult<(), AppError> {
        let mut usage = key.len() + value.len();
        usage += curr
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>();
        if usage > self.capacity_bytes {
            Err(AppError {
                code: AppErrorCode::QuotaExceeded,
                detail: Some(format!(
                    "usage:{usage}, capacity:{}",
                    self.capacity_bytes
                )),
            })
        } else {
            Ok(())
        }
    }
} // end of impl AppInMemKeyValStore

impl AbstKeyValStorage for AppInMemKeyValStore {
    fn get_item(&self, key: &str) -> DefaultResult<Option<String>, AppError> {
        let guard = self.lock_cells()?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> DefaultResult<(), AppError> {
        let mut guard = self.lock_cells()?;
        self.quota_check(&guard, key, value)?;
        let _discard = guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> DefaultResult<(), AppError> {
        let mut guard = self.lock_cells()?;
        let _discard = guard.remove(key);
        Ok(())
    }
}
