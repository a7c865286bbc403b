use rust_decimal::Decimal;

pub mod app_meta {
    pub const LABEL: &str = "storefront";
}

pub mod env_vars {
    pub const SYS_BASEPATH: &str = "SYS_BASE_PATH";
    pub const SERVICE_BASEPATH: &str = "SERVICE_BASE_PATH";
    // relative path starting from app / service home folder
    pub const CFG_FILEPATH: &str = "CONFIG_FILE_PATH";
    pub const EXPECTED_LABELS: [&str; 3] = [SYS_BASEPATH, SERVICE_BASEPATH, CFG_FILEPATH];
}

// keys of the persisted documents, shared with the external pages which
// read the same browser-style storage area
pub mod storage_key {
    pub const CART: &str = "cart";
    pub const CHECKOUT: &str = "checkoutData";
    pub const SESSION_USER: &str = "user";
}

pub mod hard_limit {
    // upper bound an operator may configure for the storage area, the
    // default quota below mimics the per-origin quota of mainstream browsers
    pub const MAX_STORE_CAPACITY_BYTES: usize = 64 * 1024 * 1024;
    pub const DEFAULT_STORE_CAPACITY_BYTES: usize = 5 * 1024 * 1024;
    pub const MIN_LINE_QUANTITY: u32 = 1;
    pub const MIN_SYNC_INTERVAL_SECS: u64 = 1;
    pub const MIN_SEARCH_DEBOUNCE_MS: u64 = 50;
}

pub mod display {
    pub const TITLE_TRUNCATE_CHARS: usize = 20;
    pub const SEARCH_RESULT_LIMIT: usize = 5;
    pub const CURRENCY_PREFIX: &str = "Rp";
}

pub mod timing {
    pub const CART_SYNC_INTERVAL_SECS: u64 = 1;
    pub const SEARCH_DEBOUNCE_MS: u64 = 300;
    pub const CHECKOUT_REDIRECT_DELAY_MS: u64 = 1500;
    pub const NOTIFICATION_DISMISS_MS: u64 = 2000;
}

pub mod currency {
    pub const SOURCE: &str = "USD";
    pub const DISPLAY: &str = "IDR";
    // locked conversion applied to every catalog price before display and
    // checkout total calculation. This is a business rule agreed with the
    // external checkout flow, NOT market exchange-rate data.
    pub const SOURCE_TO_DISPLAY_RATE: i64 = 15000;
}

pub fn display_exchange_rate() -> Decimal {
    Decimal::from(currency::SOURCE_TO_DISPLAY_RATE)
}

pub mod logging {
    use serde::Deserialize;

    #[allow(clippy::upper_case_acronyms)]
    #[derive(Debug, Deserialize)]
    pub enum Level {
        TRACE,
        DEBUG,
        INFO,
        WARNING,
        ERROR,
        FATAL,
    }

    #[allow(clippy::upper_case_acronyms)]
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Destination {
        CONSOLE,
        LOCALFS,
    }
}
