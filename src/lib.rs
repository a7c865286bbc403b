use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

pub mod api;
pub mod constant;
pub mod error;
pub mod logging;
pub mod model;
pub mod repository;
pub mod usecase;

mod config;
pub use config::{
    AppBasepathCfg, AppCatalogCfg, AppCfgHardLimit, AppConfig, AppDataStoreCfg, AppFrontendCfg,
    AppLogHandlerCfg, AppLoggerCfg, AppLoggingCfg, AppTimingCfg,
};

mod auth;
pub use auth::AppSessionMarker;

mod adapter;
pub use adapter::datastore;
pub use adapter::thirdparty;

use error::AppError;
use model::CartModel;

pub(crate) type AppLogAlias = Arc<String>;

pub struct AppDataStoreContext {
    pub kv: Option<Arc<Box<dyn datastore::AbstKeyValStorage>>>,
}

// global state shared by all event callbacks and the periodic tasks,
// the cart mirror is the single in-memory copy every view renders from
pub struct AppSharedState {
    _cfg: Arc<AppConfig>,
    _log: Arc<logging::AppLogContext>,
    dstore: Arc<AppDataStoreContext>,
    _cart_mirror: Arc<RwLock<CartModel>>,
    _shutdown: Arc<AtomicBool>,
}

impl AppSharedState {
    pub fn try_build(
        cfg: AppConfig,
        log: logging::AppLogContext,
    ) -> DefaultResult<Self, AppError> {
        let log = Arc::new(log);
        let kv = datastore::build_context(log.clone(), &cfg.basepath, &cfg.frontend.data_store)?;
        let ds_ctx = Arc::new(AppDataStoreContext {
            kv: Some(Arc::new(kv)),
        });
        Ok(Self {
            _cfg: Arc::new(cfg),
            _log: log,
            dstore: ds_ctx,
            _cart_mirror: Arc::new(RwLock::new(CartModel::default())),
            _shutdown: Arc::new(AtomicBool::new(false)),
        })
    } // end of fn try-build

    pub fn config(&self) -> &Arc<AppConfig> {
        &self._cfg
    }

    pub fn log_context(&self) -> &Arc<logging::AppLogContext> {
        &self._log
    }

    pub fn datastore(&self) -> Arc<AppDataStoreContext> {
        self.dstore.clone()
    }

    pub fn cart_mirror(&self) -> Arc<RwLock<CartModel>> {
        self._cart_mirror.clone()
    }

    pub fn shutdown(&self) -> Arc<AtomicBool> {
        self._shutdown.clone()
    }
} // end of impl AppSharedState

impl Clone for AppSharedState {
    fn clone(&self) -> Self {
        Self {
            _cfg: self._cfg.clone(),
            _log: self._log.clone(),
            dstore: self.dstore.clone(),
            _cart_mirror: self._cart_mirror.clone(),
            _shutdown: self._shutdown.clone(),
        }
    }
}
