use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CartLineModel, ProductModel};

// Snapshot handed off to the external checkout page through the
// `checkoutData` storage key, overwritten by every checkout action.
// Key names follow the contract of that page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutModel {
    pub items: Vec<CartLineModel>,
    pub total_price: Decimal,
    pub checkout_time: DateTime<FixedOffset>,
}

impl CheckoutModel {
    // total in display currency, quantity-weighted over the given lines
    pub fn from_lines(
        items: Vec<CartLineModel>,
        exchange_rate: Decimal,
        time: DateTime<FixedOffset>,
    ) -> Self {
        let total_price = items
            .iter()
            .map(|l| l.display_amount(exchange_rate))
            .sum::<Decimal>();
        Self {
            items,
            total_price,
            checkout_time: time,
        }
    }

    // direct purchase path, bypasses the cart entirely
    pub fn single_item(
        product: ProductModel,
        exchange_rate: Decimal,
        time: DateTime<FixedOffset>,
    ) -> Self {
        let line = CartLineModel {
            product,
            quantity: 1,
            selected: false,
        };
        Self::from_lines(vec![line], exchange_rate, time)
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }
}
