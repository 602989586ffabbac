use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber: `RUST_LOG` plus `bookkeeping_core=info`.
///
/// Does nothing when a subscriber is already installed.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive(
            "bookkeeping_core=info"
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
        );

        let _ = fmt().with_env_filter(filter).try_init();
    });
}
