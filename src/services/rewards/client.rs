//! Chain queries issued through the node CLI.

use async_trait::async_trait;

use crate::{
	models::{AnnualProvisions, OutstandingRewards, StakingPool, ValidatorSet},
	services::rewards::error::RewardError,
	utils::{
		constants::{MAX_VALIDATOR_PAGES, VALIDATOR_PAGE_LIMIT},
		CommandExecutor, ProcessCommandExecutor,
	},
};

/// Read-only chain queries needed by the estimator
#[async_trait]
pub trait ChainQueryClient: Send + Sync {
	/// Annual token provisions of the mint module
	async fn annual_provisions(&self) -> Result<f64, RewardError>;

	/// Tokens currently bonded across all validators
	async fn bonded_tokens(&self) -> Result<f64, RewardError>;

	/// Operator addresses of the whole validator set, across all result pages
	async fn validator_addresses(&self) -> Result<Vec<String>, RewardError>;

	/// Amount of the first outstanding reward coin of a validator
	async fn outstanding_reward(&self, validator_address: &str) -> Result<f64, RewardError>;
}

/// Queries a chain by invoking its daemon binary, e.g. `memed query staking pool --output json`
pub struct CliQueryClient<E: CommandExecutor> {
	executor: E,
}

impl CliQueryClient<ProcessCommandExecutor> {
	pub fn new(cli: &str, timeout_ms: u64) -> Self {
		Self {
			executor: ProcessCommandExecutor::new(cli, timeout_ms),
		}
	}
}

impl<E: CommandExecutor> CliQueryClient<E> {
	pub fn new_with_executor(executor: E) -> Self {
		Self { executor }
	}

	async fn query(&self, subcommand: &[&str]) -> Result<String, RewardError> {
		let mut args = vec!["query".to_string()];
		args.extend(subcommand.iter().map(|arg| arg.to_string()));
		args.extend(["--output".to_string(), "json".to_string()]);
		Ok(self.executor.execute(&args).await?)
	}
}

#[async_trait]
impl<E: CommandExecutor> ChainQueryClient for CliQueryClient<E> {
	async fn annual_provisions(&self) -> Result<f64, RewardError> {
		let output = self.query(&["mint", "annual-provisions"]).await?;
		parse_annual_provisions(&output)
	}

	async fn bonded_tokens(&self) -> Result<f64, RewardError> {
		let output = self.query(&["staking", "pool"]).await?;
		parse_bonded_tokens(&output)
	}

	async fn validator_addresses(&self) -> Result<Vec<String>, RewardError> {
		let limit = VALIDATOR_PAGE_LIMIT.to_string();
		let mut addresses = Vec::new();

		// `--page-key` takes raw bytes while the response carries base64, so page by offset.
		for page in 1..=MAX_VALIDATOR_PAGES {
			let page_number = page.to_string();
			let output = self
				.query(&[
					"staking",
					"validators",
					"--page",
					&page_number,
					"--limit",
					&limit,
				])
				.await?;
			let set = parse_validator_set(&output)?;
			let last_page = set.next_key().is_none() || set.validators.is_empty();
			addresses.extend(
				set.validators
					.into_iter()
					.map(|validator| validator.operator_address),
			);
			if last_page {
				tracing::debug!(pages = page, validators = addresses.len(), "Listed validators");
				return Ok(addresses);
			}
		}

		Err(RewardError::query_error(format!(
			"validator set spans more than {} pages of {}",
			MAX_VALIDATOR_PAGES, VALIDATOR_PAGE_LIMIT
		)))
	}

	async fn outstanding_reward(&self, validator_address: &str) -> Result<f64, RewardError> {
		let output = self
			.query(&[
				"distribution",
				"validator-outstanding-rewards",
				validator_address,
			])
			.await?;
		parse_outstanding_reward(&output)
	}
}

fn parse_decimal(value: &str, what: &str) -> Result<f64, RewardError> {
	let parsed = value.trim().parse::<f64>().map_err(|e| {
		RewardError::parse_error(format!("{} '{}' is not a decimal: {}", what, value.trim(), e))
	})?;
	if !parsed.is_finite() {
		return Err(RewardError::parse_error(format!(
			"{} '{}' is not finite",
			what,
			value.trim()
		)));
	}
	Ok(parsed)
}

/// Parses `mint annual-provisions` output. Older daemons print a bare decimal instead of JSON.
pub fn parse_annual_provisions(output: &str) -> Result<f64, RewardError> {
	match serde_json::from_str::<AnnualProvisions>(output.trim()) {
		Ok(provisions) => parse_decimal(&provisions.amount(), "annual provisions"),
		Err(_) => parse_decimal(output, "annual provisions"),
	}
}

pub fn parse_bonded_tokens(output: &str) -> Result<f64, RewardError> {
	let pool: StakingPool = serde_json::from_str(output.trim())
		.map_err(|e| RewardError::parse_error(format!("staking pool: {}", e)))?;
	let bonded = pool
		.bonded_tokens()
		.ok_or_else(|| RewardError::parse_error("staking pool has no bonded_tokens"))?;
	parse_decimal(bonded, "bonded tokens")
}

/// Parses one page of `staking validators` output
pub fn parse_validator_set(output: &str) -> Result<ValidatorSet, RewardError> {
	serde_json::from_str(output.trim())
		.map_err(|e| RewardError::parse_error(format!("validator set: {}", e)))
}

/// Amount of the first reward coin; the denomination is not checked
pub fn parse_outstanding_reward(output: &str) -> Result<f64, RewardError> {
	let rewards: OutstandingRewards = serde_json::from_str(output.trim())
		.map_err(|e| RewardError::parse_error(format!("outstanding rewards: {}", e)))?;
	let coin = rewards
		.coins()
		.first()
		.ok_or_else(|| RewardError::parse_error("validator has no outstanding rewards"))?;
	parse_decimal(&coin.amount, "outstanding reward")
}
