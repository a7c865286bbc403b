use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constant::{display, timing};
use crate::model::{CartModel, ProductModel};

// Structured view contracts consumed by the external presentation layer
// (product grid, cart modal, badge, search dropdown). This crate never
// produces markup, the collaborating pages own element identifiers and
// styling.

// The page currently hosting the widgets, derived from the document
// location path. The landing page shows reduced product cards behind a
// login gate, every other page gets the full card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageContext {
    Landing,
    Browse,
}

impl PageContext {
    pub fn from_path(path: &str) -> Self {
        if path.ends_with("index.html") || path.ends_with('/') {
            Self::Landing
        } else {
            Self::Browse
        }
    }
}

// navigation targets are external pages, not routes of this crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page")]
pub enum NavigationIntentDto {
    Login,
    Checkout,
    ProductDetail { id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub level: NotificationLevel,
    pub message: String,
    pub dismiss_after_ms: u64,
}

impl NotificationDto {
    pub fn success(message: &str) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.to_string(),
            dismiss_after_ms: timing::NOTIFICATION_DISMISS_MS,
        }
    }
    pub fn error(message: &str) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.to_string(),
            dismiss_after_ms: timing::NOTIFICATION_DISMISS_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDto {
    pub rate: f32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCardDetailDto {
    pub category: String,
    pub price_tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCardDto {
    pub id: u64,
    pub image: String,
    pub title: String,
    pub rating: RatingDto,
    // absent on the landing page variant of the card
    pub detail: Option<ProductCardDetailDto>,
    pub nav: NavigationIntentDto,
}

impl ProductCardDto {
    pub fn build(product: &ProductModel, page: PageContext, exchange_rate: Decimal) -> Self {
        let (detail, nav) = match page {
            PageContext::Landing => (None, NavigationIntentDto::Login),
            PageContext::Browse => (
                Some(ProductCardDetailDto {
                    category: product.category.clone(),
                    price_tag: format_price_tag(product.display_price(exchange_rate)),
                }),
                NavigationIntentDto::ProductDetail { id: product.id },
            ),
        };
        Self {
            id: product.id,
            image: product.image.clone(),
            title: product.title_truncated(display::TITLE_TRUNCATE_CHARS),
            rating: RatingDto {
                rate: product.rating.rate,
                count: product.rating.count,
            },
            detail,
            nav,
        }
    }
}

// static placeholder shown in place of the grid when the catalog could
// not be fetched, there is no retry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPlaceholderDto {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartBadgeDto {
    pub item_count: u32,
    pub visible: bool,
}

impl CartBadgeDto {
    pub fn build(cart: &CartModel) -> Self {
        let item_count = cart.total_quantity();
        Self {
            item_count,
            visible: item_count > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineViewDto {
    // positions of the member entries behind this display group, handed
    // back verbatim on quantity / selection operations
    pub positions: Vec<usize>,
    pub product_id: u64,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    pub amount_tag: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartViewDto {
    pub lines: Vec<CartLineViewDto>,
    pub empty: bool,
    pub all_selected: bool,
    pub checkout_enabled: bool,
    pub total_tag: String,
}

impl CartViewDto {
    pub fn build(cart: &CartModel, exchange_rate: Decimal) -> Self {
        let lines = cart
            .grouped_lines()
            .into_iter()
            .map(|g| {
                let amount =
                    g.product.price * Decimal::from(g.quantity) * exchange_rate;
                CartLineViewDto {
                    positions: g.positions,
                    product_id: g.product.id,
                    title: g.product.title,
                    image: g.product.image,
                    quantity: g.quantity,
                    amount_tag: format_price_tag(amount),
                    selected: g.selected,
                }
            })
            .collect::<Vec<_>>();
        Self {
            lines,
            empty: cart.is_empty(),
            all_selected: cart.all_selected(),
            checkout_enabled: cart.any_selected(),
            total_tag: format_price_tag(cart.total_display_price(exchange_rate)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHitDto {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub image: String,
    pub price_tag: String,
}

impl SearchHitDto {
    pub fn build(product: &ProductModel, exchange_rate: Decimal) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price_tag: format_price_tag(product.display_price(exchange_rate)),
        }
    }
}

// states of the search dropdown, `Loading` is visible from the first
// keystroke until the debounce window elapses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "hits")]
pub enum SearchViewDto {
    Hidden,
    Loading,
    NoResults,
    Results(Vec<SearchHitDto>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRedirectDto {
    pub nav: NavigationIntentDto,
    // the collaborating page keeps its loading indicator up for this
    // long before following the navigation intent
    pub delay_ms: u64,
}

// display currency like `Rp 1.649.250`, id-ID style separators, dots
// between thousand groups, comma before any fractional digits
pub fn format_price_tag(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let whole = normalized.trunc().to_string();
    let grouped = group_thousands(whole.as_str());
    let fraction = normalized.fract();
    if fraction.is_zero() {
        format!("{} {}", display::CURRENCY_PREFIX, grouped)
    } else {
        let serial = fraction.to_string();
        let digits = serial.split('.').nth(1).unwrap_or("0");
        format!("{} {},{}", display::CURRENCY_PREFIX, grouped, digits)
    }
}

fn group_thousands(digits: &str) -> String {
    let chars = digits.chars().collect::<Vec<_>>();
    let num_chars = chars.len();
    let mut out = String::with_capacity(num_chars + num_chars / 3);
    for (idx, c) in chars.iter().enumerate() {
        out.push(*c);
        let remaining = num_chars - 1 - idx;
        if remaining > 0 && remaining % 3 == 0 && c.is_ascii_digit() {
            out.push('.');
        }
    }
    out
}
