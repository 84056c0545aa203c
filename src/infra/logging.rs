//! Log subscriber setup shared by the binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default: info for this crate and tower_http).
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "phonebook=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
