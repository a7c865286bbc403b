use std::boxed::Box;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tokio::time::{interval, Duration};

use crate::api::web::dto::{CartBadgeDto, CartViewDto};
use crate::constant::display_exchange_rate;
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::CartModel;
use crate::repository::AbsCartRepo;

use super::{read_cart_mirror, write_cart_mirror};

// Fixed-interval reconciliation between the in-memory mirror and the
// persisted cart document, approximating cross-tab sync. Last writer
// wins, there is no conflict resolution. A tick landing between a local
// mutation and its persist clobbers the in-flight edit, the window is
// one interval at most and accepted.
pub struct CartSyncUseCase {
    pub repo: Box<dyn AbsCartRepo>,
    pub cart_mirror: Arc<RwLock<CartModel>>,
    pub log_ctx: Arc<AppLogContext>,
}

#[derive(Debug, Clone)]
pub enum CartSyncUcResult {
    Unchanged,
    // the mirror was replaced, any open cart view re-renders
    Refreshed {
        badge: CartBadgeDto,
        view: CartViewDto,
    },
    ServerError(AppError),
}

impl CartSyncUseCase {
    pub async fn poll_once(&self) -> CartSyncUcResult {
        let logctx_p = &self.log_ctx;
        let persisted = match self.repo.fetch_cart().await {
            Ok(v) => v,
            Err(e) => {
                app_log_event!(logctx_p, AppLogLevel::ERROR, "{e}");
                return CartSyncUcResult::ServerError(e);
            }
        };
        let held = match read_cart_mirror(&self.cart_mirror) {
            Ok(v) => v,
            Err(e) => return CartSyncUcResult::ServerError(e),
        };
        // the serialized forms are compared, not the models, so a change
        // in entry order counts as a difference like it does for the
        // sibling pages sharing the document
        let differs = match (
            serde_json::to_string(&held),
            serde_json::to_string(&persisted),
        ) {
            (Ok(a), Ok(b)) => a != b,
            (Err(e), _) | (_, Err(e)) => {
                return CartSyncUcResult::ServerError(AppError::from(e));
            }
        };
        if !differs {
            return CartSyncUcResult::Unchanged;
        }
        if let Err(e) = write_cart_mirror(&self.cart_mirror, &persisted) {
            return CartSyncUcResult::ServerError(e);
        }
        app_log_event!(
            logctx_p,
            AppLogLevel::DEBUG,
            "mirror replaced, num-lines:{}",
            persisted.num_lines()
        );
        CartSyncUcResult::Refreshed {
            badge: CartBadgeDto::build(&persisted),
            view: CartViewDto::build(&persisted, display_exchange_rate()),
        }
    } // end of fn poll_once

    // long-running poll loop, outcomes worth a re-render are published
    // to the given sink, silent ticks are skipped
    pub async fn run(
        self,
        interval_secs: u64,
        shutdown: Arc<AtomicBool>,
        sink: watch::Sender<CartSyncUcResult>,
    ) {
        let mut ticker = interval(Duration::from_secs(interval_secs));
        let _first = ticker.tick().await; // the first tick completes immediately
        loop {
            let _instant = ticker.tick().await;
            if shutdown.load(Ordering::Relaxed) {
                break;
            }
            match self.poll_once().await {
                CartSyncUcResult::Unchanged => {}
                outcome => {
                    let _discard = sink.send_replace(outcome);
                }
            }
        }
    } // end of fn run
} // end of impl CartSyncUseCase
