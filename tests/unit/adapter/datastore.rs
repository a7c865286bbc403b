use std::fs;

use storefront::datastore::{AbstKeyValStorage, AppInMemKeyValStore, AppLocalFileKeyValStore};
use storefront::error::AppErrorCode;
use storefront::AppBasepathCfg;

fn ut_tmp_basepath() -> AppBasepathCfg {
    let service = std::env::temp_dir()
        .join(format!("storefront-ut-{}", std::process::id()))
        .to_string_lossy()
        .to_string();
    AppBasepathCfg {
        system: service.clone(),
        service,
    }
}

#[test]
fn in_mem_set_get_remove() {
    let store = AppInMemKeyValStore::new(4096);
    let result = store.get_item("cart");
    assert_eq!(result.unwrap(), None);
    store.set_item("cart", "[]").unwrap();
    let result = store.get_item("cart");
    assert_eq!(result.unwrap().as_deref(), Some("[]"));
    store.remove_item("cart").unwrap();
    assert_eq!(store.get_item("cart").unwrap(), None);
}

#[test]
fn in_mem_quota_enforced() {
    let store = AppInMemKeyValStore::new(24);
    store.set_item("user", "beryl-2210").unwrap();
    // second write would exceed the 24-byte area
    let result = store.set_item("cart", "[{\"id\":1}]");
    assert!(result.is_err());
    let e = result.unwrap_err();
    assert_eq!(e.code, AppErrorCode::QuotaExceeded);
    // the failed write left the previous cells untouched
    assert_eq!(store.get_item("user").unwrap().as_deref(), Some("beryl-2210"));
    assert_eq!(store.get_item("cart").unwrap(), None);
}

#[test]
fn in_mem_overwrite_replaces_old_usage() {
    let store = AppInMemKeyValStore::new(16);
    store.set_item("cart", "AAAAAAAAAAAA").unwrap();
    // replacing the value is accounted against the new size, not the sum
    store.set_item("cart", "BBBBBBBBBBBB").unwrap();
    assert_eq!(
        store.get_item("cart").unwrap().as_deref(),
        Some("BBBBBBBBBBBB")
    );
}

#[test]
fn local_file_survives_rebuild() {
    let basepath = ut_tmp_basepath();
    let rel_path = "data/survive-rebuild.json";
    let store = AppLocalFileKeyValStore::try_build(&basepath, rel_path, 4096).unwrap();
    store.set_item("user", "beryl-2210").unwrap();
    store.set_item("cart", "[]").unwrap();
    drop(store);
    let store = AppLocalFileKeyValStore::try_build(&basepath, rel_path, 4096).unwrap();
    assert_eq!(store.get_item("user").unwrap().as_deref(), Some("beryl-2210"));
    assert_eq!(store.get_item("cart").unwrap().as_deref(), Some("[]"));
    let _discard = fs::remove_file(format!("{}/{}", basepath.service, rel_path));
}

#[test]
fn local_file_sees_external_writes() {
    let basepath = ut_tmp_basepath();
    let rel_path = "data/external-writes.json";
    let store = AppLocalFileKeyValStore::try_build(&basepath, rel_path, 4096).unwrap();
    store.set_item("cart", "[]").unwrap();
    // another process (a sibling tab) rewrites the same document
    let fullpath = format!("{}/{}", basepath.service, rel_path);
    fs::write(&fullpath, r#"{"cart":"[{\"id\":5}]"}"#).unwrap();
    assert_eq!(
        store.get_item("cart").unwrap().as_deref(),
        Some("[{\"id\":5}]")
    );
    let _discard = fs::remove_file(fullpath);
}

#[test]
fn local_file_quota_enforced() {
    let basepath = ut_tmp_basepath();
    let rel_path = "data/quota.json";
    let store = AppLocalFileKeyValStore::try_build(&basepath, rel_path, 32).unwrap();
    let result = store.set_item("cart", "a very long value which cannot fit the area");
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().code, AppErrorCode::QuotaExceeded);
    let _discard = fs::remove_file(format!("{}/{}", basepath.service, rel_path));
}

#[test]
fn local_file_rejects_corrupt_document() {
    let basepath = ut_tmp_basepath();
    let rel_path = "data/corrupt.json";
    let fullpath = format!("{}/{}", basepath.service, rel_path);
    fs::create_dir_all(std::path::Path::new(&fullpath).parent().unwrap()).unwrap();
    fs::write(&fullpath, "{not-json").unwrap();
    let result = AppLocalFileKeyValStore::try_build(&basepath, rel_path, 4096);
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().code, AppErrorCode::DataCorruption);
    let _discard = fs::remove_file(fullpath);
}
