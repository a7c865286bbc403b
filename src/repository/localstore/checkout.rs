use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

use crate::adapter::datastore::AbstKeyValStorage;
use crate::constant::storage_key;
use crate::error::{AppError, AppErrorCode};
use crate::model::CheckoutModel;
use crate::repository::AbsCheckoutRepo;

pub struct CheckoutLocalStoreRepo {
    datastore: Arc<Box<dyn AbstKeyValStorage>>,
}

impl CheckoutLocalStoreRepo {
    pub fn new(datastore: Arc<Box<dyn AbstKeyValStorage>>) -> Self {
        Self { datastore }
    }
}

#[async_trait]
impl AbsCheckoutRepo for CheckoutLocalStoreRepo {
    async fn save_snapshot(&self, obj: &CheckoutModel) -> DefaultResult<(), AppError> {
        let raw = serde_json::to_string(obj)?;
        self.datastore.set_item(storage_key::CHECKOUT, raw.as_str())
    }

    async fn fetch_snapshot(&self) -> DefaultResult<Option<CheckoutModel>, AppError> {
        match self.datastore.get_item(storage_key::CHECKOUT)? {
            Some(raw) => serde_json::from_str::<CheckoutModel>(raw.as_str())
                .map(Some)
                .map_err(|e| AppError {
                    code: AppErrorCode::DataCorruption,
                    detail: Some(format!("checkout-doc, {e}")),
                }),
            None => Ok(None),
        }
    }
} // end of impl CheckoutLocalStoreRepo
