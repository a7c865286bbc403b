use std::sync::atomic::Ordering;

use storefront::constant::hard_limit;
use storefront::error::AppErrorCode;
use storefront::logging::AppLogContext;
use storefront::repository::app_repo_cart;
use storefront::{AppBasepathCfg, AppCfgHardLimit, AppConfig, AppDataStoreCfg, AppSharedState};

use crate::ut_example_fullpath;

fn ut_limit() -> AppCfgHardLimit {
    AppCfgHardLimit {
        max_store_capacity_bytes: hard_limit::MAX_STORE_CAPACITY_BYTES,
        min_sync_interval_secs: hard_limit::MIN_SYNC_INTERVAL_SECS,
        min_search_debounce_ms: hard_limit::MIN_SEARCH_DEBOUNCE_MS,
    }
}

#[test]
fn parse_complete_document() {
    let fullpath = ut_example_fullpath("frontend_ok.json");
    let result = AppConfig::parse_from_file(fullpath, ut_limit());
    assert_eq!(result.is_ok(), true);
    let cfg = result.unwrap();
    assert_eq!(cfg.logging.handlers.len(), 2);
    assert_eq!(cfg.logging.loggers.len(), 2);
    assert_eq!(cfg.catalog.host.as_str(), "fakestoreapi.com");
    assert_eq!(cfg.catalog.port, 443);
    assert_eq!(cfg.catalog.resource_path.as_str(), "/products");
    assert!(matches!(
        cfg.data_store,
        AppDataStoreCfg::InMemory { capacity_bytes: 5242880 }
    ));
    assert_eq!(cfg.timing.cart_sync_interval_secs, 1);
    assert_eq!(cfg.timing.search_debounce_ms, 300);
    assert_eq!(cfg.timing.checkout_redirect_delay_ms, 1500);
}

#[test]
fn absent_timing_section_falls_back_to_defaults() {
    let fullpath = ut_example_fullpath("frontend_default_timing.json");
    let cfg = AppConfig::parse_from_file(fullpath, ut_limit()).unwrap();
    assert_eq!(cfg.timing.cart_sync_interval_secs, 1);
    assert_eq!(cfg.timing.search_debounce_ms, 300);
    assert_eq!(cfg.timing.checkout_redirect_delay_ms, 1500);
    if let AppDataStoreCfg::LocalFile { rel_path, .. } = &cfg.data_store {
        assert_eq!(rel_path.as_str(), "tmp/storage/browser_area.json");
    } else {
        panic!("local-file data store expected");
    }
}

#[test]
fn reject_empty_logger_list() {
    let fullpath = ut_example_fullpath("frontend_no_logger.json");
    let result = AppConfig::parse_from_file(fullpath, ut_limit());
    assert_eq!(result.is_err(), true);
    assert_eq!(result.unwrap_err().code, AppErrorCode::NoLoggerCfg);
}

#[test]
fn reject_unknown_handler_alias() {
    let fullpath = ut_example_fullpath("frontend_unknown_handler_alias.json");
    let result = AppConfig::parse_from_file(fullpath, ut_limit());
    assert_eq!(result.is_err(), true);
    assert_eq!(
        result.unwrap_err().code,
        AppErrorCode::MissingAliasLogHdlerCfg
    );
}

#[test]
fn reject_oversized_store_capacity() {
    let fullpath = ut_example_fullpath("frontend_cap_exceed.json");
    let result = AppConfig::parse_from_file(fullpath, ut_limit());
    assert_eq!(result.is_err(), true);
    assert_eq!(result.unwrap_err().code, AppErrorCode::ExceedingMaxLimit);
}

#[test]
fn shared_state_builds_from_config() {
    let fullpath = ut_example_fullpath("frontend_default_timing.json");
    let frontend = AppConfig::parse_from_file(fullpath, ut_limit()).unwrap();
    let service = std::env::temp_dir()
        .join(format!("storefront-ut-state-{}", std::process::id()))
        .to_string_lossy()
        .to_string();
    let cfg = AppConfig {
        basepath: AppBasepathCfg {
            system: service.clone(),
            service,
        },
        frontend,
    };
    let logctx = AppLogContext::new(&cfg.basepath, &cfg.frontend.logging);
    let result = AppSharedState::try_build(cfg, logctx);
    assert_eq!(result.is_ok(), true);
    let state = result.unwrap();
    assert!(state.datastore().kv.is_some());
    assert_eq!(state.config().frontend.timing.search_debounce_ms, 300);
    assert!(!state.shutdown().load(Ordering::Relaxed));
    assert!(state.cart_mirror().read().unwrap().is_empty());
    let repo = app_repo_cart(state.datastore());
    assert_eq!(repo.is_ok(), true);
}

#[test]
fn missing_file_reported_as_io_error() {
    let fullpath = ut_example_fullpath("frontend_nonexistent.json");
    let result = AppConfig::parse_from_file(fullpath, ut_limit());
    assert_eq!(result.is_err(), true);
    let e = result.unwrap_err();
    assert!(matches!(e.code, AppErrorCode::IOerror(_)));
}
