use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

use crate::adapter::datastore::AbstKeyValStorage;
use crate::constant::storage_key;
use crate::error::{AppError, AppErrorCode};
use crate::model::CartModel;
use crate::repository::AbsCartRepo;

// The persisted cart document is the bare JSON array under the `cart`
// key, exactly the shape the external pages read. The storage layer does
// not enforce per-product uniqueness, entries sharing an id round-trip
// untouched, display grouping happens in the model.
pub struct CartLocalStoreRepo {
    datastore: Arc<Box<dyn AbstKeyValStorage>>,
}

impl CartLocalStoreRepo {
    pub fn new(datastore: Arc<Box<dyn AbstKeyValStorage>>) -> Self {
        Self { datastore }
    }
}

#[async_trait]
impl AbsCartRepo for CartLocalStoreRepo {
    async fn fetch_cart(&self) -> DefaultResult<CartModel, AppError> {
        match self.datastore.get_item(storage_key::CART)? {
            Some(raw) => {
                serde_json::from_str::<CartModel>(raw.as_str()).map_err(|e| AppError {
                    code: AppErrorCode::DataCorruption,
                    detail: Some(format!("cart-doc, {e}")),
                })
            }
            None => Ok(CartModel::default()),
        }
    }

    async fn save_cart(&self, obj: &CartModel) -> DefaultResult<(), AppError> {
        let raw = serde_json::to_string(obj)?;
        self.datastore.set_item(storage_key::CART, raw.as_str())
    }
} // end of impl CartLocalStoreRepo
