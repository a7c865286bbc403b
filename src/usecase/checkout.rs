use std::boxed::Box;
use std::sync::{Arc, RwLock};

use chrono::Local as LocalTime;

use crate::adapter::datastore::AbstKeyValStorage;
use crate::api::web::dto::{
    CartBadgeDto, CartViewDto, CheckoutRedirectDto, NavigationIntentDto, NotificationDto,
};
use crate::auth::AppSessionMarker;
use crate::constant::display_exchange_rate;
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{CartModel, CheckoutModel, ProductModel};
use crate::repository::{AbsCartRepo, AbsCheckoutRepo};

use super::{read_cart_mirror, write_cart_mirror};

pub struct CheckoutSelectedUseCase {
    pub kv: Arc<Box<dyn AbstKeyValStorage>>,
    pub cart_repo: Box<dyn AbsCartRepo>,
    pub checkout_repo: Box<dyn AbsCheckoutRepo>,
    pub cart_mirror: Arc<RwLock<CartModel>>,
    pub log_ctx: Arc<AppLogContext>,
    pub redirect_delay_ms: u64,
}

pub enum CheckoutUcResult {
    Accepted {
        redirect: CheckoutRedirectDto,
        badge: CartBadgeDto,
        view: CartViewDto,
    },
    LoginRequired(NavigationIntentDto),
    // validation failure, nothing was mutated
    EmptySelection(NotificationDto),
    StorageFailure {
        notify: NotificationDto,
        cause: AppError,
    },
    ServerError(AppError),
}

impl CheckoutSelectedUseCase {
    pub async fn execute(self) -> CheckoutUcResult {
        if AppSessionMarker::try_load(&**self.kv).is_err() {
            return CheckoutUcResult::LoginRequired(NavigationIntentDto::Login);
        }
        let mut cart = match read_cart_mirror(&self.cart_mirror) {
            Ok(v) => v,
            Err(e) => return CheckoutUcResult::ServerError(e),
        };
        if !cart.any_selected() {
            return CheckoutUcResult::EmptySelection(NotificationDto::error(
                "select at least one product to checkout",
            ));
        }
        let taken = cart.take_selected();
        let logctx_p = &self.log_ctx;
        app_log_event!(
            logctx_p,
            AppLogLevel::INFO,
            "num-checkout-lines:{}, num-remaining:{}",
            taken.len(),
            cart.num_lines()
        );
        let snapshot = CheckoutModel::from_lines(
            taken,
            display_exchange_rate(),
            LocalTime::now().fixed_offset(),
        );
        // snapshot goes first, the cart document is only rewritten once
        // the hand-off data is safely stored
        if let Err(e) = self.checkout_repo.save_snapshot(&snapshot).await {
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{e}");
            return CheckoutUcResult::StorageFailure {
                notify: NotificationDto::error(
                    "failed to save checkout data, storage might be full",
                ),
                cause: e,
            };
        }
        if let Err(e) = write_cart_mirror(&self.cart_mirror, &cart) {
            return CheckoutUcResult::ServerError(e);
        }
        match self.cart_repo.save_cart(&cart).await {
            Ok(_) => CheckoutUcResult::Accepted {
                redirect: CheckoutRedirectDto {
                    nav: NavigationIntentDto::Checkout,
                    delay_ms: self.redirect_delay_ms,
                },
                badge: CartBadgeDto::build(&cart),
                view: CartViewDto::build(&cart, display_exchange_rate()),
            },
            Err(e) => {
                app_log_event!(logctx_p, AppLogLevel::ERROR, "{e}");
                CheckoutUcResult::StorageFailure {
                    notify: NotificationDto::error(
                        "failed to save the cart, storage might be full",
                    ),
                    cause: e,
                }
            }
        }
    } // end of fn execute
} // end of impl CheckoutSelectedUseCase

// direct purchase from a product card, independent of the cart state
pub struct BuyNowUseCase {
    pub kv: Arc<Box<dyn AbstKeyValStorage>>,
    pub checkout_repo: Box<dyn AbsCheckoutRepo>,
    pub log_ctx: Arc<AppLogContext>,
    pub redirect_delay_ms: u64,
}

pub enum BuyNowUcResult {
    Accepted { redirect: CheckoutRedirectDto },
    LoginRequired(NavigationIntentDto),
    StorageFailure {
        notify: NotificationDto,
        cause: AppError,
    },
}

impl BuyNowUseCase {
    pub async fn execute(self, product: ProductModel) -> BuyNowUcResult {
        if AppSessionMarker::try_load(&**self.kv).is_err() {
            return BuyNowUcResult::LoginRequired(NavigationIntentDto::Login);
        }
        let snapshot = CheckoutModel::single_item(
            product,
            display_exchange_rate(),
            LocalTime::now().fixed_offset(),
        );
        match self.checkout_repo.save_snapshot(&snapshot).await {
            Ok(_) => BuyNowUcResult::Accepted {
                redirect: CheckoutRedirectDto {
                    nav: NavigationIntentDto::Checkout,
                    delay_ms: self.redirect_delay_ms,
                },
            },
            Err(e) => {
                let logctx_p = &self.log_ctx;
                app_log_event!(logctx_p, AppLogLevel::ERROR, "{e}");
                BuyNowUcResult::StorageFailure {
                    notify: NotificationDto::error(
                        "failed to save checkout data, storage might be full",
                    ),
                    cause: e,
                }
            }
        }
    }
} // end of impl BuyNowUseCase
