mod in_mem;
mod local_file;

use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

pub use in_mem::AppInMemKeyValStore;
pub use local_file::AppLocalFileKeyValStore;

use crate::config::{AppBasepathCfg, AppDataStoreCfg};
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};

// The storage surface is modelled on what a browser page sees in its
// per-origin local storage. Access is synchronous, a write may fail once
// the configured quota is exhausted, callers have to catch the failure
// and surface it instead of letting it propagate unhandled.
pub trait AbstKeyValStorage: Send + Sync {
    fn get_item(&self, key: &str) -> DefaultResult<Option<String>, AppError>;
    fn set_item(&self, key: &str, value: &str) -> DefaultResult<(), AppError>;
    fn remove_item(&self, key: &str) -> DefaultResult<(), AppError>;
}

pub(crate) fn build_context(
    logctx: Arc<AppLogContext>,
    basepath: &AppBasepathCfg,
    cfg: &AppDataStoreCfg,
) -> DefaultResult<Box<dyn AbstKeyValStorage>, AppError> {
    match cfg {
        AppDataStoreCfg::InMemory { capacity_bytes } => {
            let item: Box<dyn AbstKeyValStorage> =
                Box::new(AppInMemKeyValStore::new(*capacity_bytes));
            Ok(item)
        }
        AppDataStoreCfg::LocalFile {
            rel_path,
            capacity_bytes,
        } => match AppLocalFileKeyValStore::try_build(basepath, rel_path, *capacity_bytes) {
            Ok(item) => Ok(Box::new(item)),
            Err(e) => {
                app_log_event!(logctx, AppLogLevel::ERROR, "{:?}", e);
                Err(e)
            }
        },
    }
}
