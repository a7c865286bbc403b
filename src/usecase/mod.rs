mod add_to_cart;
mod browse_catalog;
mod checkout;
mod edit_cart;
mod search_products;
mod sync_cart;

use std::result::Result as DefaultResult;
use std::sync::RwLock;

pub use add_to_cart::{AddToCartUcResult, AddToCartUseCase};
pub use browse_catalog::{BrowseCatalogUcResult, BrowseCatalogUseCase};
pub use checkout::{BuyNowUcResult, BuyNowUseCase, CheckoutUcResult, CheckoutSelectedUseCase};
pub use edit_cart::{
    EditCartUcResult, RemoveCartLineUseCase, ToggleCartSelectUseCase, ToggleSelectTarget,
    UpdateCartQuantityUseCase,
};
pub use search_products::ProductSearchUseCase;
pub use sync_cart::{CartSyncUcResult, CartSyncUseCase};

use crate::error::{AppError, AppErrorCode};
use crate::model::CartModel;

// the in-memory mirror is shared between event callbacks and the
// reconciliation task, lock sections stay short and never cross an await
pub(crate) fn read_cart_mirror(mirror: &RwLock<CartModel>) -> DefaultResult<CartModel, AppError> {
    mirror.read().map(|guard| (*guard).clone()).map_err(|e| AppError {
        code: AppErrorCode::AcquireLockFailure,
        detail: Some(e.to_string()),
    })
}

pub(crate) fn write_cart_mirror(
    mirror: &RwLock<CartModel>,
    value: &CartModel,
) -> DefaultResult<(), AppError> {
    match mirror.write() {
        Ok(mut guard) => {
            *guard = value.clone();
            Ok(())
        }
        Err(e) => Err(AppError {
            code: AppErrorCode::AcquireLockFailure,
            detail: Some(e.to_string()),
        }),
    }
}
