use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogFormatArg;

const DEFAULT_FILTER: &str = "spi_dashboard=info";

/// Installs the global subscriber. Logs go to stderr so stdout stays clean
/// for the report. `RUST_LOG` overrides the default filter.
pub fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormatArg::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormatArg::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    // A subscriber may already be set when embedded or under test.
    let _ = installed;
}
