use std::boxed::Box;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

use crate::adapter::thirdparty::AbstProductCatalog;
use crate::api::web::dto::{NavigationIntentDto, SearchHitDto, SearchViewDto};
use crate::constant::{display, display_exchange_rate};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::ProductSearchIndex;

// state shared with the delayed query tasks
struct SearchInner {
    index: ProductSearchIndex,
    view_tx: watch::Sender<SearchViewDto>,
    // best-ranked hit of the last executed query, Enter navigates to it
    // even when the dropdown was dismissed in the meantime
    top_hit: Mutex<Option<u64>>,
    log_ctx: Arc<AppLogContext>,
}

impl SearchInner {
    fn set_top_hit(&self, value: Option<u64>) {
        if let Ok(mut guard) = self.top_hit.lock() {
            *guard = value;
        }
    }

    fn run_query(&self, phrase: &str) {
        let trimmed = phrase.trim();
        if trimmed.is_empty() {
            self.set_top_hit(None);
            let _discard = self.view_tx.send_replace(SearchViewDto::Hidden);
            return;
        }
        let hits = self.index.query(trimmed, display::SEARCH_RESULT_LIMIT);
        let logctx_p = &self.log_ctx;
        app_log_event!(
            logctx_p,
            AppLogLevel::DEBUG,
            "phrase:{trimmed}, num-hits:{}",
            hits.len()
        );
        if hits.is_empty() {
            self.set_top_hit(None);
            let _discard = self.view_tx.send_replace(SearchViewDto::NoResults);
        } else {
            self.set_top_hit(Some(hits[0].id));
            let rate = display_exchange_rate();
            let dtos = hits
                .iter()
                .map(|p| SearchHitDto::build(p, rate))
                .collect::<Vec<_>>();
            let _discard = self.view_tx.send_replace(SearchViewDto::Results(dtos));
        }
    } // end of fn run_query
} // end of impl SearchInner

// Debounced search session over a dedicated in-memory catalog copy. The
// dropdown state is published through a watch channel, the presentation
// layer renders whatever the latest state is. Keyboard and pointer
// dismissal map to the methods below.
pub struct ProductSearchUseCase {
    inner: Arc<SearchInner>,
    debounce: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl ProductSearchUseCase {
    // the search component fetches its own catalog copy, separate from
    // the grid, an unreachable catalog only degrades search to an empty
    // index instead of failing the page
    pub async fn bootstrap(
        catalog: Box<dyn AbstProductCatalog>,
        debounce_ms: u64,
        log_ctx: Arc<AppLogContext>,
    ) -> Self {
        let items = match catalog.fetch_all().await {
            Ok(v) => v,
            Err(e) => {
                let logctx_p = &log_ctx;
                app_log_event!(logctx_p, AppLogLevel::WARNING, "{e}");
                Vec::new()
            }
        };
        let (view_tx, _view_rx) = watch::channel(SearchViewDto::Hidden);
        Self {
            inner: Arc::new(SearchInner {
                index: ProductSearchIndex::new(items),
                view_tx,
                top_hit: Mutex::new(None),
                log_ctx,
            }),
            debounce: Duration::from_millis(debounce_ms),
            pending: Mutex::new(None),
        }
    }

    pub fn num_indexed(&self) -> usize {
        self.inner.index.num_items()
    }

    pub fn subscribe_view(&self) -> watch::Receiver<SearchViewDto> {
        self.inner.view_tx.subscribe()
    }

    pub fn current_view(&self) -> SearchViewDto {
        self.inner.view_tx.borrow().clone()
    }

    // every keystroke restarts the debounce window, the dropdown turns
    // to the loading state right away
    pub fn on_input(&self, phrase: &str) {
        self.abort_pending();
        let _discard = self.inner.view_tx.send_replace(SearchViewDto::Loading);
        let inner = self.inner.clone();
        let debounce = self.debounce;
        let phrase = phrase.to_string();
        let handle = tokio::spawn(async move {
            sleep(debounce).await;
            inner.run_query(phrase.as_str());
        });
        if let Ok(mut guard) = self.pending.lock() {
            *guard = Some(handle);
        }
    }

    // outside click or the Escape key
    pub fn dismiss(&self) {
        self.abort_pending();
        let _discard = self.inner.view_tx.send_replace(SearchViewDto::Hidden);
    }

    // Enter jumps to the detail page of the best hit, None when the last
    // query had no result
    pub fn on_enter(&self) -> Option<NavigationIntentDto> {
        let guard = self.inner.top_hit.lock().ok()?;
        guard.map(|id| NavigationIntentDto::ProductDetail { id })
    }

    fn abort_pending(&self) {
        if let Ok(mut guard) = self.pending.lock() {
            if let Some(h) = guard.take() {
                h.abort();
            }
        }
    }
} // end of impl ProductSearchUseCase
