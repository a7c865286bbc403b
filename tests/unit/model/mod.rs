mod checkout;

use std::str::FromStr;

use rust_decimal::Decimal;

use storefront::model::{CartLineModel, ProductModel, ProductRatingModel};

pub(crate) fn ut_setup_product(id: u64, title: &str, price: &str, category: &str) -> ProductModel {
    ProductModel {
        id,
        title: title.to_string(),
        price: Decimal::from_str(price).unwrap(),
        category: category.to_string(),
        description: format!("factory description of {title}"),
        image: format!("https://img.example.com/{id}.jpg"),
        rating: ProductRatingModel {
            rate: 3.9,
            count: 120,
        },
    }
}

pub(crate) fn ut_setup_cart_line(
    product: ProductModel,
    quantity: u32,
    selected: bool,
) -> CartLineModel {
    CartLineModel {
        product,
        quantity,
        selected,
    }
}

// the same records the public catalog endpoint would return, trimmed
pub(crate) fn ut_catalog_products() -> Vec<ProductModel> {
    vec![
        ut_setup_product(
            1,
            "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "109.95",
            "men's clothing",
        ),
        ut_setup_product(2, "Mens Casual Premium Slim Fit T-Shirts", "22.3", "men's clothing"),
        ut_setup_product(3, "Solid Gold Petite Micropave", "168.0", "jewelery"),
        ut_setup_product(4, "WD 2TB Elements Portable External Hard Drive", "64.0", "electronics"),
    ]
}

// titles laid out for relevance-order verification
pub(crate) fn ut_ranking_products() -> Vec<ProductModel> {
    vec![
        ut_setup_product(11, "running shoe", "55.0", "sneakers"),
        ut_setup_product(12, "shoe rack", "19.0", "furniture"),
        ut_setup_product(13, "shoe", "42.0", "sneakers"),
        ut_setup_product(14, "winter jacket", "88.0", "outerwear"),
    ]
}
