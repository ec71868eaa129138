//! Process-wide cryptographic backend selection.
//!
//! A one-shot, non-reentrant initialization step. The harness contract
//! requires it to complete before any case body runs; it is a correctness
//! precondition, not a lock, and there is no teardown.

use std::sync::OnceLock;

static BACKEND: OnceLock<&'static str> = OnceLock::new();

/// Backend the generator pins for every run.
pub const DEFAULT_BACKEND: &str = "milagro";

/// Select the default BLS backend. Idempotent: later calls (with any
/// backend already chosen) are no-ops.
pub fn use_default_backend() {
    let _ = BACKEND.set(DEFAULT_BACKEND);
}

/// The backend chosen for this process, if initialization has run.
pub fn selected_backend() -> Option<&'static str> {
    BACKEND.get().copied()
}
