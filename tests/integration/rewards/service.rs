//! Reward estimation against mocked chain queries.

use chain_node_toolkit::services::rewards::{RewardError, RewardService};
use mockall::Sequence;

use crate::integration::mocks::MockChainQueryClient;

#[tokio::test]
async fn test_queries_are_issued_in_order() {
	let mut client = MockChainQueryClient::new();
	let mut seq = Sequence::new();

	client
		.expect_annual_provisions()
		.times(1)
		.in_sequence(&mut seq)
		.returning(|| Ok(1_000_000.0));
	client
		.expect_bonded_tokens()
		.times(1)
		.in_sequence(&mut seq)
		.returning(|| Ok(500_000_000.0));
	client
		.expect_validator_addresses()
		.times(1)
		.in_sequence(&mut seq)
		.returning(|| Ok(vec!["memevaloper1only".to_string()]));
	client
		.expect_outstanding_reward()
		.withf(|address| address == "memevaloper1only")
		.times(1)
		.in_sequence(&mut seq)
		.returning(|_| Ok(2_500_000.0));

	let report = RewardService::new(client, None).estimate().await.unwrap();

	assert_eq!(report.validator_address, "memevaloper1only");
	assert!((report.delegator.apr - 0.2).abs() < 1e-12);
	assert!((report.delegator.apy - (0.002_f64.exp() - 1.0) * 100.0).abs() < 1e-12);
	assert!((report.validator.apr - 0.5).abs() < 1e-12);
	assert_eq!(
		report.to_string(),
		"Delegator APR: 0.20%\nDelegator APY: 0.20%\nValidator APR: 0.50%\nValidator APY: 0.50%"
	);
}

#[tokio::test]
async fn test_configured_validator_skips_validator_query() {
	let mut client = MockChainQueryClient::new();
	client
		.expect_annual_provisions()
		.returning(|| Ok(1_000_000.0));
	client.expect_bonded_tokens().returning(|| Ok(500_000_000.0));
	client.expect_validator_addresses().never();
	client
		.expect_outstanding_reward()
		.withf(|address| address == "memevaloper1fixed")
		.returning(|_| Ok(0.0));

	let report = RewardService::new(client, Some("memevaloper1fixed".to_string()))
		.estimate()
		.await
		.unwrap();

	assert_eq!(report.validator.apr, 0.0);
	assert_eq!(report.validator.apy, 0.0);
}

#[tokio::test]
async fn test_query_failure_stops_estimation() {
	let mut client = MockChainQueryClient::new();
	client
		.expect_annual_provisions()
		.returning(|| Ok(1_000_000.0));
	client
		.expect_bonded_tokens()
		.returning(|| Err(RewardError::query_error("connection refused")));
	client.expect_validator_addresses().never();
	client.expect_outstanding_reward().never();

	let result = RewardService::new(client, None).estimate().await;

	assert!(matches!(result, Err(RewardError::QueryError(_))));
}

#[tokio::test]
async fn test_zero_bonded_tokens_is_a_calculation_error() {
	let mut client = MockChainQueryClient::new();
	client
		.expect_annual_provisions()
		.returning(|| Ok(1_000_000.0));
	client.expect_bonded_tokens().returning(|| Ok(0.0));
	client
		.expect_outstanding_reward()
		.returning(|_| Ok(10.0));

	let result = RewardService::new(client, Some("memevaloper1fixed".to_string()))
		.estimate()
		.await;

	assert!(matches!(result, Err(RewardError::CalculationError(_))));
}
