//! Reward estimation error types and handling.
//!
//! Every error here is fatal for an estimator run.

use log::error;
use std::{error::Error, fmt};

use crate::utils::CommandError;

/// Represents possible errors while estimating rewards
#[derive(Debug, Clone)]
pub enum RewardError {
	/// When the node CLI could not be queried
	QueryError(String),
	/// When a CLI response does not have the expected shape
	ParseError(String),
	/// When the queried values cannot produce a rate
	CalculationError(String),
}

impl RewardError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			RewardError::QueryError(msg) => format!("Query error: {}", msg),
			RewardError::ParseError(msg) => format!("Response parse error: {}", msg),
			RewardError::CalculationError(msg) => format!("Calculation error: {}", msg),
		}
	}

	/// Creates a new query error with logging
	pub fn query_error(msg: impl Into<String>) -> Self {
		let error = RewardError::QueryError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new parse error with logging
	pub fn parse_error(msg: impl Into<String>) -> Self {
		let error = RewardError::ParseError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new calculation error with logging
	pub fn calculation_error(msg: impl Into<String>) -> Self {
		let error = RewardError::CalculationError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for RewardError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for RewardError {}

impl From<CommandError> for RewardError {
	fn from(err: CommandError) -> Self {
		Self::query_error(err.to_string())
	}
}
