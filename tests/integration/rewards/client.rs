//! CLI-backed chain queries with a mocked command executor.

use chain_node_toolkit::{
	services::rewards::{ChainQueryClient, CliQueryClient, RewardError},
	utils::CommandError,
};

use crate::integration::mocks::MockCommandExecutor;

fn expect_query(
	executor: &mut MockCommandExecutor,
	subcommand: &'static [&'static str],
	output: &'static str,
) {
	executor
		.expect_execute()
		.withf(move |args| {
			let mut expected = vec!["query"];
			expected.extend_from_slice(subcommand);
			expected.extend_from_slice(&["--output", "json"]);
			args.iter().map(String::as_str).eq(expected.into_iter())
		})
		.times(1)
		.returning(move |_| Ok(output.to_string()));
}

#[tokio::test]
async fn test_cli_client_parses_sdk_responses() {
	let mut executor = MockCommandExecutor::new();
	expect_query(&mut executor, &["mint", "annual-provisions"], "1000000.000000000000000000\n");
	expect_query(
		&mut executor,
		&["staking", "pool"],
		r#"{"pool":{"not_bonded_tokens":"10","bonded_tokens":"500000000"}}"#,
	);
	expect_query(
		&mut executor,
		&["staking", "validators", "--page", "1", "--limit", "100"],
		r#"{"validators":[{"operator_address":"memevaloper1a","description":{"moniker":"a"}},{"operator_address":"memevaloper1b"}],"pagination":{"next_key":null,"total":"2"}}"#,
	);
	expect_query(
		&mut executor,
		&["distribution", "validator-outstanding-rewards", "memevaloper1a"],
		r#"{"rewards":{"rewards":[{"denom":"umeme","amount":"123.456"}]}}"#,
	);

	let client = CliQueryClient::new_with_executor(executor);

	assert_eq!(client.annual_provisions().await.unwrap(), 1_000_000.0);
	assert_eq!(client.bonded_tokens().await.unwrap(), 500_000_000.0);
	assert_eq!(
		client.validator_addresses().await.unwrap(),
		vec!["memevaloper1a".to_string(), "memevaloper1b".to_string()]
	);
	assert_eq!(
		client.outstanding_reward("memevaloper1a").await.unwrap(),
		123.456
	);
}

#[tokio::test]
async fn test_empty_rewards_list_is_fatal() {
	let mut executor = MockCommandExecutor::new();
	executor
		.expect_execute()
		.returning(|_| Ok(r#"{"rewards":[]}"#.to_string()));

	let client = CliQueryClient::new_with_executor(executor);
	let result = client.outstanding_reward("memevaloper1a").await;

	assert!(matches!(result, Err(RewardError::ParseError(_))));
}

#[tokio::test]
async fn test_command_timeout_becomes_query_error() {
	let mut executor = MockCommandExecutor::new();
	executor
		.expect_execute()
		.returning(|_| Err(CommandError::timeout_error("'memed' did not finish within 30000ms")));

	let client = CliQueryClient::new_with_executor(executor);
	let result = client.annual_provisions().await;

	match result {
		Err(RewardError::QueryError(msg)) => assert!(msg.contains("did not finish")),
		other => panic!("Expected QueryError, got {:?}", other),
	}
}

fn requests_page(args: &[String], page: &str) -> bool {
	args.windows(2)
		.any(|pair| pair[0] == "--page" && pair[1] == page)
}

#[tokio::test]
async fn test_validator_set_spanning_pages() {
	let mut executor = MockCommandExecutor::new();
	let mut sequence = mockall::Sequence::new();
	executor
		.expect_execute()
		.withf(|args| requests_page(args, "1"))
		.times(1)
		.in_sequence(&mut sequence)
		.returning(|_| {
			Ok(r#"{"validators":[{"operator_address":"memevaloper1a"},{"operator_address":"memevaloper1b"}],"pagination":{"next_key":"FPoSBwd2YWxvcGVy","total":"3"}}"#.to_string())
		});
	executor
		.expect_execute()
		.withf(|args| requests_page(args, "2"))
		.times(1)
		.in_sequence(&mut sequence)
		.returning(|_| {
			Ok(r#"{"validators":[{"operator_address":"memevaloper1c"}],"pagination":{"next_key":null,"total":"0"}}"#.to_string())
		});

	let client = CliQueryClient::new_with_executor(executor);
	let addresses = client.validator_addresses().await.unwrap();

	assert_eq!(
		addresses,
		vec![
			"memevaloper1a".to_string(),
			"memevaloper1b".to_string(),
			"memevaloper1c".to_string()
		]
	);
}
