//! Utility modules for common functionality.
//!
//! This module provides various utility functions and types that are used across
//! the application. Currently includes:
//!
//! - command: Execution of external commands with a timeout
//! - constants: Constants for the application
//! - logging: Logging utilities
//! - tests: Builders for test fixtures

mod command;

pub mod constants;
pub mod logging;
pub mod tests;

pub use command::{process_command_output, CommandError, CommandExecutor, ProcessCommandExecutor};
pub use constants::*;
