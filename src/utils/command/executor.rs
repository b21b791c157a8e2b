use crate::utils::command::error::CommandError;
use async_trait::async_trait;
use log::debug;
use std::{process::Stdio, time::Duration};
use tokio::time::timeout;

/// Runs an external program and returns what it printed on stdout.
/// Implementors must be both Send and Sync to ensure thread safety.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
	/// Executes the program with the given arguments.
	///
	/// # Arguments
	/// * `args` - Arguments passed to the program, without any shell interpretation
	///
	/// # Returns
	/// * `Result<String, CommandError>` - Captured stdout on success
	async fn execute(&self, args: &[String]) -> Result<String, CommandError>;
}

/// Executes a program as a child process with a timeout.
pub struct ProcessCommandExecutor {
	/// Program name or path, resolved through `PATH`
	pub program: String,
	pub timeout_ms: u64,
}

impl ProcessCommandExecutor {
	pub fn new(program: impl Into<String>, timeout_ms: u64) -> Self {
		Self {
			program: program.into(),
			timeout_ms,
		}
	}
}

#[async_trait]
impl CommandExecutor for ProcessCommandExecutor {
	async fn execute(&self, args: &[String]) -> Result<String, CommandError> {
		debug!("Running {} {}", self.program, args.join(" "));

		let cmd = tokio::process::Command::new(&self.program)
			.args(args)
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true)
			.spawn()
			.map_err(|e| {
				CommandError::system_error(format!("Failed to start '{}': {}", self.program, e))
			})?;

		let timeout_duration = Duration::from_millis(self.timeout_ms);

		match timeout(timeout_duration, cmd.wait_with_output()).await {
			Ok(result) => {
				let output = result.map_err(|e| CommandError::system_error(e.to_string()))?;
				process_command_output(output)
			}
			Err(_) => Err(CommandError::timeout_error(format!(
				"'{}' did not finish within {}ms",
				self.program, self.timeout_ms
			))),
		}
	}
}

/// Processes the output of a finished command.
///
/// # Arguments
/// * `output` - The process output containing stdout, stderr, and status
///
/// # Returns
/// * `Result<String, CommandError>` - stdout decoded as UTF-8 (lossy)
///
/// # Errors
/// Returns an execution error carrying stderr, or the exit status when stderr is empty, if the
/// command exited unsuccessfully.
pub fn process_command_output(output: std::process::Output) -> Result<String, CommandError> {
	if !output.status.success() {
		let stderr = String::from_utf8_lossy(&output.stderr).to_string();
		let message = if stderr.trim().is_empty() {
			format!("command exited with {}", output.status)
		} else {
			stderr
		};
		return Err(CommandError::execution_error(message));
	}

	Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
