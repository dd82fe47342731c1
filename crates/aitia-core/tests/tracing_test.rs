//! Tests for the tracing setup.

use std::sync::Mutex;

use aitia_core::tracing::init_tracing;

/// Global mutex to serialize tracing tests (env var manipulation).
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn init_with_debug_filter() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("AITIA_LOG", "debug");
    init_tracing();
    std::env::remove_var("AITIA_LOG");
}

#[test]
fn init_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}

#[test]
fn invalid_filter_falls_back_to_default() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("AITIA_LOG", "aitia=notalevel");
    init_tracing();
    std::env::remove_var("AITIA_LOG");
    tracing::info!("still logging after fallback");
}
