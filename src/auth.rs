use std::result::Result as DefaultResult;

use crate::adapter::datastore::AbstKeyValStorage;
use crate::constant::storage_key;
use crate::error::{AppError, AppErrorCode};

// Opaque session marker persisted by the external login page under the
// `user` storage key. Mere presence of a non-empty value signals a
// signed-in session, there is no token validation in this application,
// the gating outcome on absence is a redirect to the login page rather
// than an error dialog.
#[derive(Debug)]
pub struct AppSessionMarker {
    label: String,
}

impl AppSessionMarker {
    pub fn try_load(store: &dyn AbstKeyValStorage) -> DefaultResult<Self, AppError> {
        match store.get_item(storage_key::SESSION_USER)? {
            Some(v) if !v.is_empty() => Ok(Self { label: v }),
            _others => Err(AppError {
                code: AppErrorCode::Unauthorized,
                detail: Some("session-marker-absent".to_string()),
            }),
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}
