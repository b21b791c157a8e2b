//! Logging utilities for the application
//!
//! This module sets up `tracing_subscriber` for the application. Records emitted through the
//! `log` facade are bridged into the same subscriber.
//!
//! Behaviour is driven by environment variables:
//! - `LOG_MODE`: `stdout` (default) or `file`
//! - `LOG_LEVEL`: filter directive such as `info` or `chain_node_toolkit=debug`, falling back to
//!   `RUST_LOG` and then to `info`
//! - `LOG_DATA_DIR`: directory for daily rolling log files when `LOG_MODE=file`
use std::env;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::utils::constants::{DEFAULT_LOG_DIR, LOG_FILE_NAME};

type LoggingResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// Setup logging for the application
///
/// Logs go to stdout unless `LOG_MODE=file`, in which case they are written to a daily rolling
/// file under `LOG_DATA_DIR`.
pub fn setup_logging() -> LoggingResult {
	let file_mode = env::var("LOG_MODE")
		.map(|mode| mode.eq_ignore_ascii_case("file"))
		.unwrap_or(false);

	if file_mode {
		let log_dir = env::var("LOG_DATA_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
		std::fs::create_dir_all(&log_dir)?;
		let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
		setup_logging_with_writer(appender, false)
	} else {
		setup_logging_with_writer(std::io::stdout, true)
	}
}

/// Builds the level filter from `LOG_LEVEL`, then `RUST_LOG`, defaulting to INFO
fn log_filter() -> EnvFilter {
	match env::var("LOG_LEVEL") {
		Ok(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")),
		Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
	}
}

/// Setup logging for the application with a custom writer
pub fn setup_logging_with_writer<W>(writer: W, ansi: bool) -> LoggingResult
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(log_filter())
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(ansi)
						.compact(),
				)
				.fmt_fields(fmt::format::PrettyFields::new()),
		)
		.try_init()?;
	Ok(())
}
