use chrono::DateTime;
use rust_decimal::Decimal;

use storefront::model::CheckoutModel;
use storefront::repository::{AbsCheckoutRepo, CheckoutLocalStoreRepo};

use crate::model::{ut_setup_cart_line, ut_setup_product};
use crate::ut_kv_store;

fn ut_snapshot(product_id: u64, price: &str, time_serial: &str) -> CheckoutModel {
    let lines = vec![ut_setup_cart_line(
        ut_setup_product(product_id, "hand-off item", price, "c"),
        1,
        true,
    )];
    CheckoutModel::from_lines(
        lines,
        Decimal::from(15000i64),
        DateTime::parse_from_rfc3339(time_serial).unwrap(),
    )
}

#[tokio::test]
async fn fetch_before_any_checkout() {
    let kv = ut_kv_store(4096);
    let repo = CheckoutLocalStoreRepo::new(kv);
    let result = repo.fetch_snapshot().await;
    assert_eq!(result.is_ok(), true);
    assert!(result.unwrap().is_none());
}

#[tokio::test]
async fn next_checkout_overwrites_previous() {
    let kv = ut_kv_store(8192);
    let repo = CheckoutLocalStoreRepo::new(kv);
    let first = ut_snapshot(1, "2.0", "2023-11-28T18:46:08+07:00");
    repo.save_snapshot(&first).await.unwrap();
    let fetched = repo.fetch_snapshot().await.unwrap().unwrap();
    assert_eq!(fetched, first);
    let second = ut_snapshot(2, "7.5", "2023-11-29T09:12:40+07:00");
    repo.save_snapshot(&second).await.unwrap();
    let fetched = repo.fetch_snapshot().await.unwrap().unwrap();
    assert_eq!(fetched, second);
    assert_eq!(fetched.items[0].product.id, 2);
}
