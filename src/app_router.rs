//! Process-wide router singleton.
//!
//! Controllers install their routes here and the server mounts it, without
//! either side threading a router handle through the other. The instance is
//! created on first access and lives for the process lifetime; mutation stops
//! once the server starts serving, so requests only ever take read locks.

use std::sync::{Arc, Mutex, RwLock};

use crate::router::Router;

static INSTANCE: Mutex<Option<Arc<RwLock<Router>>>> = Mutex::new(None);

/// Accessor for the shared application router.
///
/// ```rust
/// use routier::AppRouter;
/// use std::sync::Arc;
///
/// let a = AppRouter::instance();
/// let b = AppRouter::instance();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct AppRouter;

impl AppRouter {
    /// Returns the one shared router, constructing it on first call.
    pub fn instance() -> Arc<RwLock<Router>> {
        let mut slot = INSTANCE.lock().expect("app router registry poisoned");
        slot.get_or_insert_with(|| Arc::new(RwLock::new(Router::new())))
            .clone()
    }

    /// Drops the shared instance; the next [`instance`](AppRouter::instance)
    /// call returns a fresh, empty router.
    ///
    /// Test seam only. Handles obtained before the reset keep the old router
    /// alive but are no longer the shared one.
    pub fn reset() {
        *INSTANCE.lock().expect("app router registry poisoned") = None;
    }
}
