use storefront::error::AppErrorCode;
use storefront::AppSessionMarker;

use crate::ut_kv_store;

#[test]
fn marker_present_signals_signed_in() {
    let kv = ut_kv_store(1024);
    kv.set_item("user", "beryl-2210").unwrap();
    let result = AppSessionMarker::try_load(&**kv);
    assert_eq!(result.is_ok(), true);
    assert_eq!(result.unwrap().label(), "beryl-2210");
}

#[test]
fn marker_absent_gates_the_action() {
    let kv = ut_kv_store(1024);
    let result = AppSessionMarker::try_load(&**kv);
    assert_eq!(result.is_err(), true);
    assert_eq!(result.unwrap_err().code, AppErrorCode::Unauthorized);
}

#[test]
fn empty_marker_counts_as_signed_out() {
    let kv = ut_kv_store(1024);
    kv.set_item("user", "").unwrap();
    let result = AppSessionMarker::try_load(&**kv);
    assert_eq!(result.is_err(), true);
    assert_eq!(result.unwrap_err().code, AppErrorCode::Unauthorized);
}
