use async_trait::async_trait;
use mockall::mock;

use chain_node_toolkit::{
	services::rewards::{ChainQueryClient, RewardError},
	utils::{CommandError, CommandExecutor},
};

mock! {
	pub ChainQueryClient {}

	#[async_trait]
	impl ChainQueryClient for ChainQueryClient {
		async fn annual_provisions(&self) -> Result<f64, RewardError>;
		async fn bonded_tokens(&self) -> Result<f64, RewardError>;
		async fn validator_addresses(&self) -> Result<Vec<String>, RewardError>;
		async fn outstanding_reward(&self, validator_address: &str) -> Result<f64, RewardError>;
	}
}

mock! {
	pub CommandExecutor {}

	#[async_trait]
	impl CommandExecutor for CommandExecutor {
		async fn execute(&self, args: &[String]) -> Result<String, CommandError>;
	}
}
