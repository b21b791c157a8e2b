//! Playbook generation against registries laid out on disk.

use chain_node_toolkit::{
	models::{ChainDescriptor, PlaybookProfile},
	repositories::RepositoryError,
	services::playbook::{PlaybookError, PlaybookOutcome, PlaybookService, SkipReason},
	utils::tests::builders::descriptor::DescriptorBuilder,
};
use std::{collections::BTreeMap, path::Path};
use tempfile::TempDir;

use crate::integration::mocks::MockDescriptorRepository;

fn write_descriptor(base_dir: &Path, directory: &str, descriptor: &ChainDescriptor) {
	let chain_dir = base_dir.join(directory);
	std::fs::create_dir_all(&chain_dir).unwrap();
	std::fs::write(
		chain_dir.join("chain.json"),
		serde_json::to_string_pretty(descriptor).unwrap(),
	)
	.unwrap();
}

fn read_playbook(base_dir: &Path, directory: &str) -> Option<String> {
	std::fs::read_to_string(base_dir.join(directory).join(format!("install_{}.yml", directory)))
		.ok()
}

/// Collects every string scalar of a YAML document
fn scalars(value: &serde_yaml::Value, out: &mut Vec<String>) {
	match value {
		serde_yaml::Value::String(s) => out.push(s.clone()),
		serde_yaml::Value::Sequence(items) => items.iter().for_each(|item| scalars(item, out)),
		serde_yaml::Value::Mapping(map) => map.iter().for_each(|(key, value)| {
			scalars(key, out);
			scalars(value, out);
		}),
		_ => {}
	}
}

#[test]
fn test_generates_playbook_with_interpolated_peers() {
	let temp_dir = TempDir::new().unwrap();
	write_descriptor(temp_dir.path(), "testchain", &DescriptorBuilder::new().build());

	let service = PlaybookService::new(temp_dir.path(), PlaybookProfile::Standard).unwrap();
	let report = service.generate_all(false).unwrap();

	assert_eq!(report.generated.len(), 1);
	assert!(report.skipped.is_empty());

	let content = read_playbook(temp_dir.path(), "testchain").unwrap();
	assert!(content.starts_with("---\n"));

	let document: serde_yaml::Value = serde_yaml::from_str(&content).unwrap();
	let mut values = Vec::new();
	scalars(&document, &mut values);
	assert!(values.contains(&r#"seeds = "abc@1.2.3.4:26656""#.to_string()));
	assert!(values.contains(&r#"persistent_peers = "def@5.6.7.8:26656""#.to_string()));
}

#[test]
fn test_generation_is_idempotent() {
	let temp_dir = TempDir::new().unwrap();
	write_descriptor(temp_dir.path(), "alpha", &DescriptorBuilder::new().build());
	write_descriptor(
		temp_dir.path(),
		"beta",
		&DescriptorBuilder::new()
			.chain_name(Some("beta"))
			.pretty_name(Some("Beta"))
			.build(),
	);

	PlaybookService::new(temp_dir.path(), PlaybookProfile::Standard)
		.unwrap()
		.generate_all(false)
		.unwrap();
	let first = (
		read_playbook(temp_dir.path(), "alpha").unwrap(),
		read_playbook(temp_dir.path(), "beta").unwrap(),
	);

	PlaybookService::new(temp_dir.path(), PlaybookProfile::Standard)
		.unwrap()
		.generate_all(false)
		.unwrap();
	let second = (
		read_playbook(temp_dir.path(), "alpha").unwrap(),
		read_playbook(temp_dir.path(), "beta").unwrap(),
	);

	assert_eq!(first, second);
}

#[test]
fn test_excluded_directories_are_never_scanned() {
	let temp_dir = TempDir::new().unwrap();
	let descriptor = DescriptorBuilder::new().build();
	for directory in ["testnets", ".github", "_template", "valid"] {
		write_descriptor(temp_dir.path(), directory, &descriptor);
	}

	let report = PlaybookService::new(temp_dir.path(), PlaybookProfile::Standard)
		.unwrap()
		.generate_all(false)
		.unwrap();

	let generated: Vec<&str> = report
		.generated
		.iter()
		.map(|playbook| playbook.directory_name.as_str())
		.collect();
	assert_eq!(generated, vec!["valid"]);
	for directory in ["testnets", ".github", "_template"] {
		assert!(read_playbook(temp_dir.path(), directory).is_none());
	}
}

#[test]
fn test_invalid_descriptors_are_skipped_and_scan_continues() {
	let temp_dir = TempDir::new().unwrap();
	write_descriptor(
		temp_dir.path(),
		"anonymous",
		&DescriptorBuilder::new()
			.chain_name(None)
			.pretty_name(None)
			.build(),
	);
	write_descriptor(
		temp_dir.path(),
		"lonely",
		&DescriptorBuilder::new().persistent_peers(vec![]).build(),
	);
	write_descriptor(
		temp_dir.path(),
		"nogas",
		&DescriptorBuilder::new().low_gas_prices(vec![None]).build(),
	);
	write_descriptor(temp_dir.path(), "zeta", &DescriptorBuilder::new().build());
	let broken_dir = temp_dir.path().join("broken");
	std::fs::create_dir_all(&broken_dir).unwrap();
	std::fs::write(broken_dir.join("chain.json"), "{ not json").unwrap();

	let report = PlaybookService::new(temp_dir.path(), PlaybookProfile::Standard)
		.unwrap()
		.generate_all(false)
		.unwrap();

	assert_eq!(report.generated.len(), 1);
	assert_eq!(report.generated[0].directory_name, "zeta");

	let reasons: Vec<(String, SkipReason)> = report
		.skipped
		.iter()
		.map(|skipped| (skipped.chain.clone(), skipped.reason.clone()))
		.collect();
	assert_eq!(
		reasons,
		vec![
			("Unknown".to_string(), SkipReason::RequiredInfoMissing),
			("Test Chain".to_string(), SkipReason::NoPersistentPeers),
			("Test Chain".to_string(), SkipReason::NoLowGasPrice),
		]
	);
	for directory in ["anonymous", "lonely", "nogas", "broken"] {
		assert!(read_playbook(temp_dir.path(), directory).is_none());
	}
}

#[test]
fn test_minimal_profile_does_not_require_staking_or_fees() {
	let temp_dir = TempDir::new().unwrap();
	write_descriptor(
		temp_dir.path(),
		"bare",
		&DescriptorBuilder::new()
			.fees(None)
			.staking_denoms(vec![])
			.node_home(None)
			.build(),
	);

	let standard = PlaybookService::new(temp_dir.path(), PlaybookProfile::Standard)
		.unwrap()
		.generate_all(true)
		.unwrap();
	let minimal = PlaybookService::new(temp_dir.path(), PlaybookProfile::Minimal)
		.unwrap()
		.generate_all(true)
		.unwrap();

	assert_eq!(standard.generated.len(), 0);
	assert_eq!(minimal.generated.len(), 1);
	assert!(minimal.generated[0].content.contains("/root/.test-1"));
}

#[test]
fn test_missing_base_directory_is_fatal() {
	let temp_dir = TempDir::new().unwrap();
	let result = PlaybookService::new(
		&temp_dir.path().join("does-not-exist"),
		PlaybookProfile::Standard,
	);
	assert!(matches!(result, Err(PlaybookError::LoadError(_))));
}

#[test]
fn test_service_with_mocked_repository() {
	let temp_dir = TempDir::new().unwrap();
	let chain_dir = temp_dir.path().join("mocked");
	std::fs::create_dir_all(&chain_dir).unwrap();

	let mut repository = MockDescriptorRepository::new();
	repository.expect_get_all().times(1).returning(|| {
		BTreeMap::from([("mocked".to_string(), DescriptorBuilder::new().build())])
	});
	let expected_dir = chain_dir.clone();
	repository
		.expect_chain_directory()
		.withf(|name| name == "mocked")
		.times(1)
		.returning(move |_| Ok(expected_dir.clone()));

	let service = PlaybookService::new_with_repository(repository, PlaybookProfile::Minimal);
	let report = service.generate_all(false).unwrap();

	assert_eq!(report.generated.len(), 1);
	assert!(chain_dir.join("install_mocked.yml").exists());
}

#[test]
fn test_repository_failure_aborts_generation() {
	let mut repository = MockDescriptorRepository::new();
	repository.expect_get_all().returning(|| {
		BTreeMap::from([("ghost".to_string(), DescriptorBuilder::new().build())])
	});
	repository
		.expect_chain_directory()
		.returning(|_| Err(RepositoryError::internal_error("registry moved")));

	let service = PlaybookService::new_with_repository(repository, PlaybookProfile::Standard);
	let descriptor = DescriptorBuilder::new().build();

	match service.generate("ghost", &descriptor, false) {
		Err(PlaybookError::LoadError(msg)) => assert!(msg.contains("registry moved")),
		Ok(PlaybookOutcome::Generated(_)) | Ok(PlaybookOutcome::Skipped(_)) => {
			panic!("Expected a load error")
		}
		Err(other) => panic!("Expected LoadError, got {:?}", other),
	}
}

#[test]
fn test_hostile_descriptor_values_never_reach_a_playbook() {
	let temp_dir = TempDir::new().unwrap();
	write_descriptor(
		temp_dir.path(),
		"injected",
		&DescriptorBuilder::new()
			.chain_id(Some(r#"x"; touch /tmp/pwned; echo ""#))
			.build(),
	);
	write_descriptor(
		temp_dir.path(),
		"templated",
		&DescriptorBuilder::new()
			.daemon_name(Some("{{ lookup('pipe','id') }}"))
			.build(),
	);

	for profile in [PlaybookProfile::Standard, PlaybookProfile::Minimal] {
		let report = PlaybookService::new(temp_dir.path(), profile)
			.unwrap()
			.generate_all(false)
			.unwrap();

		assert!(report.generated.is_empty());
		let reasons: Vec<SkipReason> = report
			.skipped
			.iter()
			.map(|skipped| skipped.reason.clone())
			.collect();
		assert_eq!(
			reasons,
			vec![
				SkipReason::UnsafeValue("chain_id"),
				SkipReason::UnsafeValue("daemon_name"),
			]
		);
	}
	assert!(read_playbook(temp_dir.path(), "injected").is_none());
	assert!(read_playbook(temp_dir.path(), "templated").is_none());
}
