use std::boxed::Box;
use std::sync::{Arc, RwLock};

use crate::api::web::dto::{CartBadgeDto, CartViewDto, NotificationDto};
use crate::constant::display_exchange_rate;
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::CartModel;
use crate::repository::AbsCartRepo;

use super::{read_cart_mirror, write_cart_mirror};

pub enum EditCartUcResult {
    Refreshed {
        badge: CartBadgeDto,
        view: CartViewDto,
    },
    // nothing changed, no persist happened, callers may still re-render
    NoOp {
        view: CartViewDto,
    },
    StorageFailure {
        notify: NotificationDto,
        cause: AppError,
    },
    ServerError(AppError),
}

async fn persist_refreshed(
    repo: &dyn AbsCartRepo,
    mirror: &RwLock<CartModel>,
    log_ctx: &Arc<AppLogContext>,
    cart: CartModel,
) -> EditCartUcResult {
    if let Err(e) = write_cart_mirror(mirror, &cart) {
        return EditCartUcResult::ServerError(e);
    }
    match repo.save_cart(&cart).await {
        Ok(_) => EditCartUcResult::Refreshed {
            badge: CartBadgeDto::build(&cart),
            view: CartViewDto::build(&cart, display_exchange_rate()),
        },
        Err(e) => {
            app_log_event!(log_ctx, AppLogLevel::ERROR, "{e}");
            EditCartUcResult::StorageFailure {
                notify: NotificationDto::error("failed to save the cart, storage might be full"),
                cause: e,
            }
        }
    }
}

pub struct RemoveCartLineUseCase {
    pub repo: Box<dyn AbsCartRepo>,
    pub cart_mirror: Arc<RwLock<CartModel>>,
    pub log_ctx: Arc<AppLogContext>,
}

impl RemoveCartLineUseCase {
    pub async fn execute(self, position: usize) -> EditCartUcResult {
        let mut cart = match read_cart_mirror(&self.cart_mirror) {
            Ok(v) => v,
            Err(e) => return EditCartUcResult::ServerError(e),
        };
        if !cart.remove_line(position) {
            let logctx_p = &self.log_ctx;
            app_log_event!(
                logctx_p,
                AppLogLevel::WARNING,
                "discard-line, position:{position}, num-lines:{}",
                cart.num_lines()
            );
            return EditCartUcResult::NoOp {
                view: CartViewDto::build(&cart, display_exchange_rate()),
            };
        }
        persist_refreshed(&*self.repo, &self.cart_mirror, &self.log_ctx, cart).await
    }
}

pub struct UpdateCartQuantityUseCase {
    pub repo: Box<dyn AbsCartRepo>,
    pub cart_mirror: Arc<RwLock<CartModel>>,
    pub log_ctx: Arc<AppLogContext>,
}

impl UpdateCartQuantityUseCase {
    pub async fn execute(self, position: usize, delta: i64) -> EditCartUcResult {
        let mut cart = match read_cart_mirror(&self.cart_mirror) {
            Ok(v) => v,
            Err(e) => return EditCartUcResult::ServerError(e),
        };
        match cart.update_quantity(position, delta) {
            Some(_new_qty) => {
                persist_refreshed(&*self.repo, &self.cart_mirror, &self.log_ctx, cart).await
            }
            None => {
                if position >= cart.num_lines() {
                    let logctx_p = &self.log_ctx;
                    app_log_event!(
                        logctx_p,
                        AppLogLevel::WARNING,
                        "quantity-update, position:{position}, num-lines:{}",
                        cart.num_lines()
                    );
                }
                // clamped to the same value, skip the redundant persist
                EditCartUcResult::NoOp {
                    view: CartViewDto::build(&cart, display_exchange_rate()),
                }
            }
        }
    }
}

pub enum ToggleSelectTarget {
    Line(usize),
    // one display group maps to several underlying entry positions
    Group(Vec<usize>),
    All,
}

pub struct ToggleCartSelectUseCase {
    pub repo: Box<dyn AbsCartRepo>,
    pub cart_mirror: Arc<RwLock<CartModel>>,
    pub log_ctx: Arc<AppLogContext>,
}

impl ToggleCartSelectUseCase {
    pub async fn execute(self, target: ToggleSelectTarget, flag: bool) -> EditCartUcResult {
        let mut cart = match read_cart_mirror(&self.cart_mirror) {
            Ok(v) => v,
            Err(e) => return EditCartUcResult::ServerError(e),
        };
        let num_applied = match &target {
            ToggleSelectTarget::Line(p) => usize::from(cart.set_line_selected(*p, flag)),
            ToggleSelectTarget::Group(ps) => cart.set_group_selected(ps.as_slice(), flag),
            ToggleSelectTarget::All => {
                cart.set_all_selected(flag);
                cart.num_lines()
            }
        };
        if num_applied == 0 {
            let logctx_p = &self.log_ctx;
            app_log_event!(
                logctx_p,
                AppLogLevel::WARNING,
                "selection-toggle, no line affected, num-lines:{}",
                cart.num_lines()
            );
            return EditCartUcResult::NoOp {
                view: CartViewDto::build(&cart, display_exchange_rate()),
            };
        }
        persist_refreshed(&*self.repo, &self.cart_mirror, &self.log_ctx, cart).await
    }
}
