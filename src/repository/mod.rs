mod localstore;

use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

pub use localstore::{CartLocalStoreRepo, CheckoutLocalStoreRepo};

use crate::error::{AppError, AppErrorCode};
use crate::model::{CartModel, CheckoutModel};
use crate::AppDataStoreContext;

// the repository instance may be used across an await,
// the future created by app callers has to be able to pass to different
// threads, it is the reason to add `Send` and `Sync` as super-traits
#[async_trait]
pub trait AbsCartRepo: Sync + Send {
    async fn fetch_cart(&self) -> DefaultResult<CartModel, AppError>;

    async fn save_cart(&self, obj: &CartModel) -> DefaultResult<(), AppError>;
}

#[async_trait]
pub trait AbsCheckoutRepo: Sync + Send {
    // write-once per checkout action, the next action overwrites it, the
    // external checkout page is the only consumer
    async fn save_snapshot(&self, obj: &CheckoutModel) -> DefaultResult<(), AppError>;

    async fn fetch_snapshot(&self) -> DefaultResult<Option<CheckoutModel>, AppError>;
}

pub fn app_repo_cart(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsCartRepo>, AppError> {
    if let Some(kv) = ds.kv.as_ref() {
        let obj = CartLocalStoreRepo::new(kv.clone());
        Ok(Box::new(obj))
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("key-value".to_string()),
        })
    }
}

pub fn app_repo_checkout(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsCheckoutRepo>, AppError> {
    if let Some(kv) = ds.kv.as_ref() {
        let obj = CheckoutLocalStoreRepo::new(kv.clone());
        Ok(Box::new(obj))
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("key-value".to_string()),
        })
    }
}
