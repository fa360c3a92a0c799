//! The shared router's lifecycle, exercised through the public API.
//!
//! Everything touching `AppRouter` lives in this single test function — the
//! singleton is process-wide state, and the unit tests elsewhere deliberately
//! work against local `Router` values instead.

use std::sync::Arc;

use routier::{AppRouter, controllers};

#[test]
fn instance_is_shared_until_reset() {
    AppRouter::reset();

    // idempotent accessor: same Arc every time
    let first = AppRouter::instance();
    let second = AppRouter::instance();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(first.read().unwrap().is_empty());

    // controllers install onto the shared instance
    controllers::register_all();
    assert_eq!(first.read().unwrap().len(), 5);

    // reset yields a fresh, empty router; old handles stay valid but detached
    AppRouter::reset();
    let fresh = AppRouter::instance();
    assert!(!Arc::ptr_eq(&first, &fresh));
    assert!(fresh.read().unwrap().is_empty());
    assert_eq!(first.read().unwrap().len(), 5);

    // re-registration after reset starts from scratch
    controllers::register_all();
    assert_eq!(fresh.read().unwrap().len(), 5);

    AppRouter::reset();
}
