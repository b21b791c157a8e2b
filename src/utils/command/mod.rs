mod error;
mod executor;

pub use error::CommandError;
pub use executor::{process_command_output, CommandExecutor, ProcessCommandExecutor};
