mod cart;
mod checkout;
mod product;
mod search;

pub use cart::{CartLineGroup, CartLineModel, CartModel};
pub use checkout::CheckoutModel;
pub use product::{ProductModel, ProductRatingModel};
pub use search::{ProductSearchIndex, SearchRank};
