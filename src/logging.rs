//! Logging setup for the confseek binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the application. `RUST_LOG` takes precedence over the default filter.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the global tracing subscriber, writing to stderr.
///
/// `default_filter` applies when `RUST_LOG` is unset or invalid.
pub fn init(default_filter: &str) {
	init_with_writer(default_filter, std::io::stderr);
}

fn init_with_writer<W>(default_filter: &str, writer: W)
where
	W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
	fmt()
		.with_env_filter(filter)
		.with_writer(writer)
		.with_target(false)
		.init();
}
