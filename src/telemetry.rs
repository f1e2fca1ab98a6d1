//! Tracing subscriber setup.

use std::io;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ServerConfig;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `server.log_level`. Production emits JSON lines,
/// everything else the compact human format. Calling it twice is harmless;
/// the second call leaves the first subscriber in place.
pub fn init_tracing(server: &ServerConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(io::stdout);

    let installed = if server.is_production() {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };

    if let Err(err) = installed {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}
