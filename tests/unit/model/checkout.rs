use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use storefront::model::CheckoutModel;

use super::{ut_setup_cart_line, ut_setup_product};

fn ut_fixed_time() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2023-11-28T18:46:08+07:00").unwrap()
}

#[test]
fn total_is_sum_over_weighted_lines() {
    let rate = Decimal::from(15000i64);
    let lines = vec![
        ut_setup_cart_line(ut_setup_product(1, "a", "10.5", "c"), 2, true),
        ut_setup_cart_line(ut_setup_product(2, "b", "20.25", "c"), 1, true),
        ut_setup_cart_line(ut_setup_product(3, "c", "0.99", "c"), 3, true),
    ];
    let snapshot = CheckoutModel::from_lines(lines, rate, ut_fixed_time());
    // 10.5*2*15000 + 20.25*1*15000 + 0.99*3*15000
    let expect = Decimal::from_str("663300").unwrap();
    assert_eq!(snapshot.total_price, expect);
    assert_eq!(snapshot.num_items(), 3);
}

#[test]
fn single_item_snapshot_bypasses_quantity() {
    let rate = Decimal::from(15000i64);
    let p = ut_setup_product(8, "field notebook", "4.5", "stationery");
    let snapshot = CheckoutModel::single_item(p, rate, ut_fixed_time());
    assert_eq!(snapshot.num_items(), 1);
    assert_eq!(snapshot.items[0].quantity, 1);
    let expect = Decimal::from_str("67500").unwrap();
    assert_eq!(snapshot.total_price, expect);
}

#[test]
fn hand_off_document_uses_camel_case_keys() {
    let rate = Decimal::from(15000i64);
    let lines = vec![ut_setup_cart_line(
        ut_setup_product(1, "a", "2.0", "c"),
        1,
        true,
    )];
    let snapshot = CheckoutModel::from_lines(lines, rate, ut_fixed_time());
    let raw = serde_json::to_string(&snapshot).unwrap();
    assert!(raw.contains("\"items\":"));
    assert!(raw.contains("\"totalPrice\":"));
    assert!(raw.contains("\"checkoutTime\":"));
    let decoded = serde_json::from_str::<CheckoutModel>(raw.as_str()).unwrap();
    assert_eq!(decoded, snapshot);
}
