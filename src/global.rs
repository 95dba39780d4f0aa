//! Optional process-wide router handle.
//!
//! The router is designed for explicit construction and injection; this
//! module exists for call sites that genuinely need ambient access. Uses
//! `OnceLock` so the instance is installed exactly once, even if multiple
//! entry points race to initialize — lifecycle is "init once, no implicit
//! teardown".

use crate::router::Router;
use std::sync::OnceLock;

static GLOBAL_ROUTER: OnceLock<Router> = OnceLock::new();

/// Installs `router` as the process-wide instance.
///
/// Returns `false` when an instance was already installed; the first caller
/// wins and the rejected router is dropped.
pub fn init(router: Router) -> bool {
    GLOBAL_ROUTER.set(router).is_ok()
}

/// The process-wide router, default-constructed on first access if
/// [`init`] was never called.
pub fn get() -> &'static Router {
    GLOBAL_ROUTER.get_or_init(Router::default)
}
