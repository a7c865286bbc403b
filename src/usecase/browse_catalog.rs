use std::boxed::Box;
use std::sync::Arc;

use crate::adapter::thirdparty::AbstProductCatalog;
use crate::api::web::dto::{GridPlaceholderDto, PageContext, ProductCardDto};
use crate::constant::display_exchange_rate;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};

pub struct BrowseCatalogUseCase {
    pub catalog: Box<dyn AbstProductCatalog>,
    pub log_ctx: Arc<AppLogContext>,
}

pub enum BrowseCatalogUcResult {
    Loaded(Vec<ProductCardDto>),
    // fetch failure is recovered locally with a static placeholder,
    // there is no retry
    Unavailable(GridPlaceholderDto),
}

impl BrowseCatalogUseCase {
    pub async fn execute(self, page: PageContext) -> BrowseCatalogUcResult {
        match self.catalog.fetch_all().await {
            Ok(products) => {
                let rate = display_exchange_rate();
                let cards = products
                    .iter()
                    .map(|p| ProductCardDto::build(p, page, rate))
                    .collect::<Vec<_>>();
                BrowseCatalogUcResult::Loaded(cards)
            }
            Err(e) => {
                let logctx_p = &self.log_ctx;
                app_log_event!(logctx_p, AppLogLevel::WARNING, "{e}");
                BrowseCatalogUcResult::Unavailable(GridPlaceholderDto {
                    message: "failed to load products, please try again later".to_string(),
                })
            }
        }
    }
} // end of impl BrowseCatalogUseCase
