use std::fmt::{Debug, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum AppErrorCode {
    Unknown,
    MissingSysBasePath,
    MissingAppBasePath,
    MissingConfigPath,
    MissingDataStore,
    InvalidJsonFormat,
    MissingAliasLogHdlerCfg,
    MissingAliasLoggerCfg,
    NoLogHandlerCfg,
    NoLoggerCfg,
    NoHandlerInLoggerCfg,
    EmptyInputData, // for internal error, do NOT dump detail to any view surface
    InvalidInput,   // for frontend client error
    Unauthorized,   // session marker absent, callers treat it as a login-gating flow
    QuotaExceeded,  // persistent browser-style storage ran out of capacity
    ExceedingMaxLimit,
    AcquireLockFailure,
    CryptoFailure,
    HttpHandshakeFailure,
    RemoteCatalogFailure,
    DataCorruption,
    ProductNotExist,
    IOerror(std::io::ErrorKind),
} // end of AppErrorCode

#[derive(Debug, Clone)]
pub struct AppError {
    pub code: AppErrorCode,
    pub detail: Option<String>,
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let default_detail = "none";
        let dp = if let Some(s) = &self.detail {
            s.as_str()
        } else {
            default_detail
        };
        write!(f, "code:{:?}, detail:{}", self.code, dp)
    }
}

impl From<(AppErrorCode, String)> for AppError {
    fn from(value: (AppErrorCode, String)) -> Self {
        AppError {
            code: value.0,
            detail: Some(value.1),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError {
            code: AppErrorCode::InvalidJsonFormat,
            detail: Some(value.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError {
            code: AppErrorCode::IOerror(value.kind()),
            detail: Some(value.to_string()),
        }
    }
}
