use std::boxed::Box;
use std::sync::{Arc, RwLock};

use crate::adapter::datastore::AbstKeyValStorage;
use crate::api::web::dto::{CartBadgeDto, CartViewDto, NavigationIntentDto, NotificationDto};
use crate::auth::AppSessionMarker;
use crate::constant::display_exchange_rate;
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{CartModel, ProductModel};
use crate::repository::AbsCartRepo;

use super::write_cart_mirror;

pub struct AddToCartUseCase {
    pub kv: Arc<Box<dyn AbstKeyValStorage>>,
    pub repo: Box<dyn AbsCartRepo>,
    pub cart_mirror: Arc<RwLock<CartModel>>,
    pub log_ctx: Arc<AppLogContext>,
}

pub enum AddToCartUcResult {
    Success {
        badge: CartBadgeDto,
        view: CartViewDto,
        notify: NotificationDto,
    },
    // not an error, the caller forwards the visitor to the login page
    LoginRequired(NavigationIntentDto),
    StorageFailure {
        notify: NotificationDto,
        cause: AppError,
    },
    ServerError(AppError),
}

impl AddToCartUseCase {
    pub async fn execute(self, product: ProductModel) -> AddToCartUcResult {
        if AppSessionMarker::try_load(&**self.kv).is_err() {
            return AddToCartUcResult::LoginRequired(NavigationIntentDto::Login);
        }
        // the persisted document is the source of truth at write time,
        // the mirror may lag behind writes from sibling pages
        let mut cart = match self.repo.fetch_cart().await {
            Ok(v) => v,
            Err(e) => return AddToCartUcResult::ServerError(e),
        };
        let line_qty = cart.add_product(product);
        let logctx_p = &self.log_ctx;
        app_log_event!(
            logctx_p,
            AppLogLevel::DEBUG,
            "num-lines:{}, affected-line-qty:{line_qty}",
            cart.num_lines()
        );
        if let Err(e) = write_cart_mirror(&self.cart_mirror, &cart) {
            return AddToCartUcResult::ServerError(e);
        }
        match self.repo.save_cart(&cart).await {
            Ok(_) => AddToCartUcResult::Success {
                badge: CartBadgeDto::build(&cart),
                view: CartViewDto::build(&cart, display_exchange_rate()),
                notify: NotificationDto::success("product added to the cart"),
            },
            Err(e) => {
                app_log_event!(logctx_p, AppLogLevel::ERROR, "{e}");
                // the mirror keeps the un-persisted line until the next
                // reconciliation tick reverts it
                AddToCartUcResult::StorageFailure {
                    notify: NotificationDto::error(
                        "failed to save the cart, storage might be full",
                    ),
                    cause: e,
                }
            }
        }
    } // end of fn execute
} // end of impl AddToCartUseCase
