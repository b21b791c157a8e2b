//! Command error types and handling.
//!
//! Provides error types for running external programs, such as a node CLI.

use log::error;
use std::{error::Error, fmt};

/// Represents possible errors while running an external command
#[derive(Debug, Clone)]
pub enum CommandError {
	/// When the command ran but reported failure
	ExecutionError(String),
	/// When the command did not finish in time
	TimeoutError(String),
	/// When the command could not be started or awaited
	SystemError(String),
}

impl CommandError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			CommandError::ExecutionError(msg) => format!("Command execution error: {}", msg),
			CommandError::TimeoutError(msg) => format!("Command timed out: {}", msg),
			CommandError::SystemError(msg) => format!("System error: {}", msg),
		}
	}

	/// Creates a new execution error with logging
	pub fn execution_error(msg: impl Into<String>) -> Self {
		let error = CommandError::ExecutionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new timeout error with logging
	pub fn timeout_error(msg: impl Into<String>) -> Self {
		let error = CommandError::TimeoutError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn system_error(msg: impl Into<String>) -> Self {
		let error = CommandError::SystemError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for CommandError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for CommandError {}
