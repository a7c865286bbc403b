use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRatingModel {
    pub rate: f32,
    pub count: u32,
}

// One record of the remote catalog. The application never mutates a
// product after fetch, the record is owned by the external catalog
// service, field names follow its wire format and the same shape is
// kept in the persisted cart document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductModel {
    pub id: u64,
    pub title: String,
    pub price: Decimal,
    pub category: String,
    pub description: String,
    pub image: String,
    pub rating: ProductRatingModel,
}

impl ProductModel {
    pub fn display_price(&self, exchange_rate: Decimal) -> Decimal {
        self.price * exchange_rate
    }

    // cosmetic truncation for card views, counted in characters so a
    // multi-byte title cannot be split in the middle of a code point
    pub fn title_truncated(&self, max_chars: usize) -> String {
        if self.title.chars().count() > max_chars {
            let mut out = self.title.chars().take(max_chars).collect::<String>();
            out.push_str("...");
            out
        } else {
            self.title.clone()
        }
    }
}
