//! Responses returned by the node CLI for the reward queries.
//!
//! Cosmos SDK releases disagree on the exact JSON shape of these responses (bare values versus
//! wrapped objects, numbers versus quoted decimals), so each type accepts every shape we have
//! seen in the wild and exposes a single accessor.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a decimal amount that may be encoded either as a JSON number or a string
fn deserialize_amount<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match serde_json::Value::deserialize(deserializer)? {
		serde_json::Value::String(s) => Ok(s),
		serde_json::Value::Number(n) => Ok(n.to_string()),
		other => Err(serde::de::Error::custom(format!(
			"expected a decimal amount, found {}",
			other
		))),
	}
}

/// Output of `query mint annual-provisions`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AnnualProvisions {
	Number(serde_json::Number),
	Text(String),
	Wrapped {
		#[serde(deserialize_with = "deserialize_amount")]
		amount: String,
	},
}

impl AnnualProvisions {
	pub fn amount(&self) -> String {
		match self {
			AnnualProvisions::Number(n) => n.to_string(),
			AnnualProvisions::Text(s) => s.clone(),
			AnnualProvisions::Wrapped { amount } => amount.clone(),
		}
	}
}

/// Output of `query staking pool`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StakingPool {
	#[serde(default, deserialize_with = "deserialize_optional_amount")]
	pub bonded_tokens: Option<String>,
	pub pool: Option<Box<StakingPool>>,
}

fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	deserialize_amount(deserializer).map(Some)
}

impl StakingPool {
	pub fn bonded_tokens(&self) -> Option<&str> {
		self.bonded_tokens
			.as_deref()
			.or_else(|| self.pool.as_ref().and_then(|pool| pool.bonded_tokens()))
	}
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RewardCoin {
	pub denom: Option<String>,
	#[serde(deserialize_with = "deserialize_amount")]
	pub amount: String,
}

/// Output of `query distribution validator-outstanding-rewards`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutstandingRewards {
	pub rewards: RewardList,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RewardList {
	Flat(Vec<RewardCoin>),
	Nested { rewards: Vec<RewardCoin> },
}

impl OutstandingRewards {
	pub fn coins(&self) -> &[RewardCoin] {
		match &self.rewards {
			RewardList::Flat(coins) => coins,
			RewardList::Nested { rewards } => rewards,
		}
	}
}

/// One page of `query staking validators`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ValidatorSet {
	#[serde(default)]
	pub validators: Vec<ValidatorInfo>,
	#[serde(default)]
	pub pagination: Option<PageResponse>,
}

impl ValidatorSet {
	/// Key of the next page; `None` on the last page
	pub fn next_key(&self) -> Option<&str> {
		self.pagination
			.as_ref()
			.and_then(|page| page.next_key.as_deref())
			.filter(|key| !key.is_empty())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PageResponse {
	pub next_key: Option<String>,
	#[serde(default, deserialize_with = "deserialize_optional_amount")]
	pub total: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ValidatorInfo {
	pub operator_address: String,
	pub moniker: Option<String>,
}
