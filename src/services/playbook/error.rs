//! Playbook error types and handling.
//!
//! Provides error types for playbook generation. Descriptors that fail validation are not
//! errors, they are reported through `SkipReason`.

use log::error;
use std::{error::Error, fmt};

use crate::repositories::RepositoryError;

/// Represents possible errors during playbook generation
#[derive(Debug)]
pub enum PlaybookError {
	/// When descriptors cannot be loaded
	LoadError(String),
	/// When a playbook cannot be serialized
	RenderError(String),
	/// When a playbook cannot be written to disk
	WriteError(String),
}

impl PlaybookError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			PlaybookError::LoadError(msg) => format!("Descriptor load error: {}", msg),
			PlaybookError::RenderError(msg) => format!("Playbook render error: {}", msg),
			PlaybookError::WriteError(msg) => format!("Playbook write error: {}", msg),
		}
	}

	/// Creates a new load error with logging
	pub fn load_error(msg: impl Into<String>) -> Self {
		let error = PlaybookError::LoadError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new render error with logging
	pub fn render_error(msg: impl Into<String>) -> Self {
		let error = PlaybookError::RenderError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new write error with logging
	pub fn write_error(msg: impl Into<String>) -> Self {
		let error = PlaybookError::WriteError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for PlaybookError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for PlaybookError {}

impl From<RepositoryError> for PlaybookError {
	fn from(err: RepositoryError) -> Self {
		Self::load_error(err.to_string())
	}
}

impl From<serde_yaml::Error> for PlaybookError {
	fn from(err: serde_yaml::Error) -> Self {
		Self::render_error(err.to_string())
	}
}
