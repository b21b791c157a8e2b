//! Chain node toolkit entry point.
//!
//! Two subcommands share the same configuration and logging setup:
//! - `generate`: scans a chain registry and writes one Ansible playbook per valid descriptor
//! - `rewards`: queries a running node through its CLI and prints delegator and validator
//!   APR/APY
//!
//! Command-line flags only seed environment variables that are not already set, so values
//! from the environment or a `.env` file take precedence.

use anyhow::Context;
use chain_node_toolkit::{
	models::PlaybookProfile,
	services::{
		playbook::PlaybookService,
		rewards::{CliQueryClient, RewardService},
	},
	utils::{
		constants::{DEFAULT_CHAIN_CLI, DEFAULT_QUERY_TIMEOUT_MS},
		logging::setup_logging,
	},
};
use clap::{Arg, ArgMatches, Command};
use dotenvy::dotenv;
use std::{
	env::{set_var, var},
	path::PathBuf,
};
use tracing::{error, info};

/// Sets `key` from a command-line value unless the environment already defines it
fn seed_env(matches: &ArgMatches, arg: &str, key: &str) {
	if let Some(value) = matches.get_one::<String>(arg) {
		if var(key).is_err() {
			set_var(key, value);
		}
	}
}

fn cli() -> Command {
	Command::new("chain-node-toolkit")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Generates Ansible playbooks for chain nodes from chain.json descriptors and \
			 estimates staking returns of a running chain.",
		)
		.subcommand_required(true)
		.arg_required_else_help(true)
		.arg(
			Arg::new("log-file")
				.long("log-file")
				.help("Write logs to file instead of stdout")
				.global(true)
				.action(clap::ArgAction::SetTrue),
		)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.global(true)
				.value_name("LEVEL"),
		)
		.arg(
			Arg::new("log-path")
				.long("log-path")
				.help("Path to store log files (default: logs/)")
				.global(true)
				.value_name("PATH"),
		)
		.subcommand(
			Command::new("generate")
				.about("Generate install_<chain>.yml for every chain directory")
				.arg(
					Arg::new("base-dir")
						.long("base-dir")
						.help("Registry root containing one directory per chain (default: .)")
						.value_name("DIR"),
				)
				.arg(
					Arg::new("profile")
						.long("profile")
						.help("Playbook flavour: standard or minimal (default: standard)")
						.value_name("PROFILE"),
				)
				.arg(
					Arg::new("dry-run")
						.long("dry-run")
						.help("Render playbooks without writing them")
						.action(clap::ArgAction::SetTrue),
				),
		)
		.subcommand(
			Command::new("rewards")
				.about("Print delegator and validator APR/APY")
				.arg(
					Arg::new("cli")
						.long("cli")
						.help("Chain daemon binary used for queries (default: memed)")
						.value_name("BIN"),
				)
				.arg(
					Arg::new("validator")
						.long("validator")
						.help("Validator operator address (default: random validator)")
						.value_name("ADDR"),
				)
				.arg(
					Arg::new("timeout-ms")
						.long("timeout-ms")
						.help("Timeout for each query in milliseconds (default: 30000)")
						.value_name("MS"),
				),
		)
}

fn run_generate(matches: &ArgMatches) -> anyhow::Result<()> {
	seed_env(matches, "base-dir", "CHAIN_BASE_DIR");
	seed_env(matches, "profile", "PLAYBOOK_PROFILE");

	let base_dir = PathBuf::from(var("CHAIN_BASE_DIR").unwrap_or_else(|_| ".".to_string()));
	let profile = match var("PLAYBOOK_PROFILE") {
		Ok(value) => value
			.parse::<PlaybookProfile>()
			.map_err(|e| anyhow::anyhow!(e))?,
		Err(_) => PlaybookProfile::default(),
	};
	let dry_run = matches.get_flag("dry-run");

	info!(
		base_dir = %base_dir.display(),
		profile = %profile,
		dry_run,
		"Generating playbooks"
	);

	let service = PlaybookService::new(&base_dir, profile)
		.with_context(|| format!("Failed to load chain registry at {}", base_dir.display()))?;
	let report = service.generate_all(dry_run)?;

	// Skips and written files are already logged by the service; dry runs print the content.
	for playbook in report.generated.iter().filter(|playbook| !playbook.written) {
		println!("# {}\n{}", playbook.path.display(), playbook.content);
	}
	Ok(())
}

async fn run_rewards(matches: &ArgMatches) -> anyhow::Result<()> {
	seed_env(matches, "cli", "CHAIN_CLI");
	seed_env(matches, "validator", "VALIDATOR_ADDRESS");
	seed_env(matches, "timeout-ms", "QUERY_TIMEOUT_MS");

	let cli = var("CHAIN_CLI").unwrap_or_else(|_| DEFAULT_CHAIN_CLI.to_string());
	let timeout_ms = match var("QUERY_TIMEOUT_MS") {
		Ok(value) => value
			.parse::<u64>()
			.with_context(|| format!("Invalid QUERY_TIMEOUT_MS '{}'", value))?,
		Err(_) => DEFAULT_QUERY_TIMEOUT_MS,
	};
	let validator_address = var("VALIDATOR_ADDRESS").ok();

	info!(cli = %cli, timeout_ms, "Estimating staking rewards");

	let service = RewardService::new(CliQueryClient::new(&cli, timeout_ms), validator_address);
	let report = service
		.estimate()
		.await
		.context("Reward estimation failed")?;

	println!("{}", report);
	Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let matches = cli().get_matches();

	// Load environment variables from .env file
	dotenv().ok();

	if matches.get_flag("log-file") && var("LOG_MODE").is_err() {
		set_var("LOG_MODE", "file");
	}
	seed_env(&matches, "log-level", "LOG_LEVEL");
	seed_env(&matches, "log-path", "LOG_DATA_DIR");

	setup_logging().unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
	});

	let result = match matches.subcommand() {
		Some(("generate", sub_matches)) => run_generate(sub_matches),
		Some(("rewards", sub_matches)) => run_rewards(sub_matches).await,
		_ => Err(anyhow::anyhow!("Unknown subcommand")),
	};

	if let Err(e) = &result {
		error!("{:#}", e);
	}
	result
}
