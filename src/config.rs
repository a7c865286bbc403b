use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::result::Result as DefaultResult;

use serde::de::Error as DeserializeError;
use serde::Deserialize;

use crate::constant as AppConst;
use crate::error::{AppError, AppErrorCode};
use crate::AppLogAlias;

#[derive(Debug, Deserialize)]
pub struct AppLogHandlerCfg {
    pub min_level: AppConst::logging::Level,
    pub destination: AppConst::logging::Destination,
    pub alias: AppLogAlias,
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AppLoggerCfg {
    pub alias: AppLogAlias,
    pub handlers: Vec<String>,
    pub level: Option<AppConst::logging::Level>,
}

#[derive(Debug, Deserialize)]
pub struct AppLoggingCfg {
    pub handlers: Vec<AppLogHandlerCfg>,
    pub loggers: Vec<AppLoggerCfg>,
}

// the storage area is modelled on single-origin browser local storage,
// one store per application instance, selected by config
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "source")]
pub enum AppDataStoreCfg {
    InMemory {
        capacity_bytes: usize,
    },
    LocalFile {
        // relative path starting from the service base path
        #[serde(deserialize_with = "jsn_deny_empty_string")]
        rel_path: String,
        capacity_bytes: usize,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppCatalogCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub name: String,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub host: String,
    pub port: u16,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub resource_path: String,
}

fn dflt_cart_sync_interval() -> u64 {
    AppConst::timing::CART_SYNC_INTERVAL_SECS
}
fn dflt_search_debounce() -> u64 {
    AppConst::timing::SEARCH_DEBOUNCE_MS
}
fn dflt_checkout_redirect_delay() -> u64 {
    AppConst::timing::CHECKOUT_REDIRECT_DELAY_MS
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppTimingCfg {
    #[serde(default = "dflt_cart_sync_interval")]
    pub cart_sync_interval_secs: u64,
    #[serde(default = "dflt_search_debounce")]
    pub search_debounce_ms: u64,
    #[serde(default = "dflt_checkout_redirect_delay")]
    pub checkout_redirect_delay_ms: u64,
}

impl Default for AppTimingCfg {
    fn default() -> Self {
        Self {
            cart_sync_interval_secs: dflt_cart_sync_interval(),
            search_debounce_ms: dflt_search_debounce(),
            checkout_redirect_delay_ms: dflt_checkout_redirect_delay(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppFrontendCfg {
    pub logging: AppLoggingCfg,
    pub data_store: AppDataStoreCfg,
    pub catalog: AppCatalogCfg,
    #[serde(default)]
    pub timing: AppTimingCfg,
}

pub struct AppBasepathCfg {
    pub system: String,
    pub service: String,
}

pub struct AppCfgHardLimit {
    pub max_store_capacity_bytes: usize,
    pub min_sync_interval_secs: u64,
    pub min_search_debounce_ms: u64,
}

pub struct AppConfig {
    pub basepath: AppBasepathCfg,
    pub frontend: AppFrontendCfg,
}

impl AppConfig {
    pub fn parse_from_file(
        filepath: String,
        limit: AppCfgHardLimit,
    ) -> DefaultResult<AppFrontendCfg, AppError> {
        let fd = File::open(&filepath).map_err(|e| AppError {
            code: AppErrorCode::IOerror(e.kind()),
            detail: Some(format!("config-path:{filepath}")),
        })?;
        let rdr = BufReader::new(fd);
        let cfg = serde_json::from_reader::<_, AppFrontendCfg>(rdr).map_err(|e| AppError {
            code: AppErrorCode::InvalidJsonFormat,
            detail: Some(e.to_string()),
        })?;
        Self::validate_logging(&cfg.logging)?;
        Self::validate_data_store(&cfg.data_store, &limit)?;
        Self::validate_timing(&cfg.timing, &limit)?;
        Ok(cfg)
    } // end of fn parse_from_file

    fn validate_logging(cfg: &AppLoggingCfg) -> DefaultResult<(), AppError> {
        if cfg.handlers.is_empty() {
            return Err(AppError {
                code: AppErrorCode::NoLogHandlerCfg,
                detail: None,
            });
        }
        if cfg.loggers.is_empty() {
            return Err(AppError {
                code: AppErrorCode::NoLoggerCfg,
                detail: None,
            });
        }
        let hdlr_aliases = cfg
            .handlers
            .iter()
            .map(|h| h.alias.as_str())
            .collect::<HashSet<_>>();
        for logger in cfg.loggers.iter() {
            if logger.handlers.is_empty() {
                return Err(AppError {
                    code: AppErrorCode::NoHandlerInLoggerCfg,
                    detail: Some(logger.alias.to_string()),
                });
            }
            if let Some(unknown) = logger
                .handlers
                .iter()
                .find(|a| !hdlr_aliases.contains(a.as_str()))
            {
                return Err(AppError {
                    code: AppErrorCode::MissingAliasLogHdlerCfg,
                    detail: Some(unknown.clone()),
                });
            }
        }
        let missing_path = cfg.handlers.iter().find(|h| {
            matches!(h.destination, AppConst::logging::Destination::LOCALFS) && h.path.is_none()
        });
        if let Some(h) = missing_path {
            return Err(AppError {
                code: AppErrorCode::NoHandlerInLoggerCfg,
                detail: Some(format!("log-handler-path-absent:{}", h.alias)),
            });
        }
        Ok(())
    } // end of fn validate_logging

    fn validate_data_store(
        cfg: &AppDataStoreCfg,
        limit: &AppCfgHardLimit,
    ) -> DefaultResult<(), AppError> {
        let capacity = match cfg {
            AppDataStoreCfg::InMemory { capacity_bytes } => *capacity_bytes,
            AppDataStoreCfg::LocalFile { capacity_bytes, .. } => *capacity_bytes,
        };
        if capacity == 0 {
            Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some("store-capacity-zero".to_string()),
            })
        } else if capacity > limit.max_store_capacity_bytes {
            Err(AppError {
                code: AppErrorCode::ExceedingMaxLimit,
                detail: Some(format!(
                    "store-capacity, given:{capacity}, max:{}",
                    limit.max_store_capacity_bytes
                )),
            })
        } else {
            Ok(())
        }
    }

    fn validate_timing(cfg: &AppTimingCfg, limit: &AppCfgHardLimit) -> DefaultResult<(), AppError> {
        if cfg.cart_sync_interval_secs < limit.min_sync_interval_secs {
            return Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some(format!(
                    "cart-sync-interval, given:{}, min:{}",
                    cfg.cart_sync_interval_secs, limit.min_sync_interval_secs
                )),
            });
        }
        if cfg.search_debounce_ms < limit.min_search_debounce_ms {
            return Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some(format!(
                    "search-debounce, given:{}, min:{}",
                    cfg.search_debounce_ms, limit.min_search_debounce_ms
                )),
            });
        }
        Ok(())
    }
} // end of impl AppConfig

fn jsn_deny_empty_string<'de, D>(raw: D) -> DefaultResult<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(raw)?;
    if s.is_empty() {
        let unexp = serde::de::Unexpected::Str(s.as_str());
        Err(DeserializeError::invalid_value(unexp, &"non-empty string"))
    } else {
        Ok(s)
    }
}
