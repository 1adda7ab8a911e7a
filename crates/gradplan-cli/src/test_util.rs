//! Shared helpers for gradplan-cli unit tests.

use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serialize tests that mutate process environment variables.
///
/// Env vars are process-global, so tests touching `GRADPLAN_*`, `HOME`, or
/// `XDG_CONFIG_HOME` must hold this lock for their whole body.
pub fn lock_env() -> MutexGuard<'static, ()> {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
