//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the Aitia tracing/logging system.
///
/// Reads the `AITIA_LOG` environment variable for per-module log levels.
/// Format: `AITIA_LOG=aitia_causal::prima_facie=debug,aitia_causal::epsilon=info`
///
/// Falls back to `aitia=info` if `AITIA_LOG` is not set or is invalid.
/// Calling it more than once is safe; a subscriber installed elsewhere wins.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
