use chain_node_toolkit::services::rewards::{
	annual_percentage_rate, annual_percentage_yield, RewardError, ReturnRates,
};
use proptest::{prelude::*, test_runner::Config};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_rate_is_percentage_of_bonded(
		amount in 0.0f64..1e15,
		bonded in 1.0f64..1e15
	) {
		let apr = annual_percentage_rate(amount, bonded).unwrap();
		prop_assert!(apr >= 0.0);
		prop_assert!((apr * bonded / 100.0 - amount).abs() <= amount.abs() * 1e-9 + 1e-9);
	}

	// Continuous compounding never yields less than the simple rate
	#[test]
	fn test_yield_at_least_rate(apr in 0.0f64..500.0) {
		let apy = annual_percentage_yield(apr);
		prop_assert!(apy >= apr);
		prop_assert!((apy - ((apr / 100.0).exp() - 1.0) * 100.0).abs() <= apy * 1e-9 + 1e-9);
	}

	#[test]
	fn test_yield_is_monotonic(a in 0.0f64..200.0, b in 0.0f64..200.0) {
		let (low, high) = if a <= b { (a, b) } else { (b, a) };
		prop_assert!(annual_percentage_yield(low) <= annual_percentage_yield(high));
	}

	#[test]
	fn test_non_positive_bonded_is_rejected(amount in 0.0f64..1e12, bonded in -1e12f64..=0.0) {
		prop_assert!(matches!(
			ReturnRates::from_amounts(amount, bonded),
			Err(RewardError::CalculationError(_))
		));
	}
}

#[test]
fn test_reference_delegator_rates() {
	let rates = ReturnRates::from_amounts(1_000_000.0, 500_000_000.0).unwrap();
	assert!((rates.apr - 0.20).abs() < 1e-12);
	assert!((rates.apy - (0.002_f64.exp() - 1.0) * 100.0).abs() < 1e-12);
}
