use std::fmt;

use crate::services::rewards::error::RewardError;

/// Annual percentage rate of `annual_amount` relative to the bonded token supply.
///
/// # Errors
/// Returns a calculation error when either input is not finite or when `bonded_tokens` is not
/// strictly positive.
pub fn annual_percentage_rate(annual_amount: f64, bonded_tokens: f64) -> Result<f64, RewardError> {
	if !annual_amount.is_finite() || !bonded_tokens.is_finite() {
		return Err(RewardError::calculation_error(format!(
			"non finite input: amount={}, bonded_tokens={}",
			annual_amount, bonded_tokens
		)));
	}
	if bonded_tokens <= 0.0 {
		return Err(RewardError::calculation_error(format!(
			"bonded tokens must be positive, got {}",
			bonded_tokens
		)));
	}
	Ok(annual_amount / bonded_tokens * 100.0)
}

/// Continuously compounded yield for an APR, both in percent
pub fn annual_percentage_yield(apr: f64) -> f64 {
	(apr / 100.0).exp_m1() * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnRates {
	pub apr: f64,
	pub apy: f64,
}

impl ReturnRates {
	pub fn from_amounts(annual_amount: f64, bonded_tokens: f64) -> Result<Self, RewardError> {
		let apr = annual_percentage_rate(annual_amount, bonded_tokens)?;
		Ok(Self {
			apr,
			apy: annual_percentage_yield(apr),
		})
	}
}

/// Result of an estimator run
#[derive(Debug, Clone, PartialEq)]
pub struct RewardReport {
	/// Validator whose outstanding rewards were used
	pub validator_address: String,
	pub delegator: ReturnRates,
	pub validator: ReturnRates,
}

impl fmt::Display for RewardReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Delegator APR: {:.2}%", self.delegator.apr)?;
		writeln!(f, "Delegator APY: {:.2}%", self.delegator.apy)?;
		writeln!(f, "Validator APR: {:.2}%", self.validator.apr)?;
		write!(f, "Validator APY: {:.2}%", self.validator.apy)
	}
}
