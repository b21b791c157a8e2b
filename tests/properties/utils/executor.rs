use crate::properties::strategies::process_output_strategy;
use chain_node_toolkit::utils::{process_command_output, CommandError};
use proptest::{prelude::*, test_runner::Config};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_process_command_output(output in process_output_strategy()) {
		let result = process_command_output(output.clone());

		if output.status.success() {
			prop_assert_eq!(result.unwrap(), String::from_utf8_lossy(&output.stdout).to_string());
		} else {
			let stderr = String::from_utf8_lossy(&output.stderr).to_string();
			match result {
				Err(CommandError::ExecutionError(msg)) => {
					if stderr.trim().is_empty() {
						prop_assert!(msg.starts_with("command exited with"));
					} else {
						prop_assert_eq!(msg, stderr);
					}
				}
				other => prop_assert!(false, "Expected ExecutionError, got {:?}", other),
			}
		}
	}
}
