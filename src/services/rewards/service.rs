use rand::seq::IndexedRandom;

use crate::services::rewards::{
	calculator::{ReturnRates, RewardReport},
	client::ChainQueryClient,
	error::RewardError,
};

/// Estimates delegator and validator returns from live chain data
pub struct RewardService<C: ChainQueryClient> {
	client: C,
	validator_address: Option<String>,
}

impl<C: ChainQueryClient> RewardService<C> {
	/// Creates the service. Without a validator address one is picked at random on each run.
	pub fn new(client: C, validator_address: Option<String>) -> Self {
		Self {
			client,
			validator_address: validator_address.filter(|address| !address.trim().is_empty()),
		}
	}

	/// Runs the queries in order and computes both rate pairs
	pub async fn estimate(&self) -> Result<RewardReport, RewardError> {
		let annual_provisions = self.client.annual_provisions().await?;
		let bonded_tokens = self.client.bonded_tokens().await?;
		tracing::debug!(annual_provisions, bonded_tokens, "Queried mint and staking pool");

		let validator_address = match &self.validator_address {
			Some(address) => address.clone(),
			None => self.pick_validator().await?,
		};
		let validator_reward = self.client.outstanding_reward(&validator_address).await?;
		tracing::debug!(
			validator = %validator_address,
			validator_reward,
			"Queried outstanding rewards"
		);

		Ok(RewardReport {
			delegator: ReturnRates::from_amounts(annual_provisions, bonded_tokens)?,
			validator: ReturnRates::from_amounts(validator_reward, bonded_tokens)?,
			validator_address,
		})
	}

	async fn pick_validator(&self) -> Result<String, RewardError> {
		let addresses = self.client.validator_addresses().await?;
		let address = addresses
			.choose(&mut rand::rng())
			.ok_or_else(|| RewardError::query_error("validator set is empty"))?;
		tracing::info!("Selected validator {} at random", address);
		Ok(address.clone())
	}
}
