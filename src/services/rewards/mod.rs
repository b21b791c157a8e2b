//! Staking reward estimation.
//!
//! Queries a node through its CLI and derives annualized returns:
//! - `client`: the query seam and its CLI-backed implementation
//! - `calculator`: APR/APY formulas
//! - `service`: query sequencing and validator selection

mod calculator;
mod client;
mod error;
mod service;

pub use calculator::{annual_percentage_rate, annual_percentage_yield, ReturnRates, RewardReport};
pub use client::{
	parse_annual_provisions, parse_bonded_tokens, parse_outstanding_reward, parse_validator_set,
	ChainQueryClient, CliQueryClient,
};
pub use error::RewardError;
pub use service::RewardService;
