//! Descriptor validation.
//!
//! Checks run in a fixed order and stop at the first failure, so a descriptor is reported with
//! exactly one reason. Passing every check yields a [`ValidatedChain`] holding the resolved
//! values the playbook builder needs.
//!
//! Resolved values end up inside shell scripts, file paths, systemd units and strings Ansible
//! templates with Jinja, so the last check restricts each of them to a character set that is
//! inert in all of those places.

use regex::Regex;
use std::{fmt, sync::LazyLock};
use thiserror::Error;

use crate::{
	models::{ChainDescriptor, PeerEntry, Peers, PlaybookProfile},
	utils::constants::NODE_HOME_PREFIX,
};

/// Why a descriptor did not produce a playbook
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
	#[error("Required information missing")]
	RequiredInfoMissing,
	#[error("No persistent peers defined")]
	NoPersistentPeers,
	#[error("No seeds defined")]
	NoSeeds,
	#[error("No staking defined")]
	NoStakingTokens,
	#[error("No fee tokens defined")]
	NoFeeTokens,
	#[error("No low gas price defined")]
	NoLowGasPrice,
	#[error("node_home not provided")]
	NoNodeHome,
	#[error("{0} not provided")]
	MissingField(&'static str),
	#[error("{0} contains characters that are not allowed")]
	UnsafeValue(&'static str),
}

/// A descriptor that was skipped, with the name it is reported under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedChain {
	/// Pretty name when known, otherwise the chain name, otherwise `Unknown`
	pub chain: String,
	pub reason: SkipReason,
}

impl fmt::Display for SkippedChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Skipping {} - {}.", self.chain, self.reason)
	}
}

/// Descriptor values resolved for playbook assembly
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedChain {
	pub chain_name: String,
	pub pretty_name: String,
	pub chain_id: String,
	pub daemon_name: String,
	pub git_repo: String,
	pub recommended_version: String,
	pub genesis_url: String,
	/// Comma separated `id@address` list
	pub seeds: String,
	/// Comma separated `id@address` list
	pub persistent_peers: String,
	/// Low gas price as published by the registry (standard profile)
	pub low_gas_price: Option<String>,
	/// Low gas price suffixed with the staking denom (standard profile)
	pub minimum_gas_price: Option<String>,
	/// Node directory relative to the home directory (standard profile)
	pub node_dir: Option<String>,
	/// Path of the node data directory on the target host
	pub node_home: String,
	pub rpc_port: u16,
	pub p2p_port: u16,
}

/// Chain ids, chain names and daemon names: used unquoted in commands, paths and unit names
static IDENTIFIER: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").ok());
/// Node data directory relative to the home directory, e.g. `.gaia`
static NODE_DIR: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^\.?[A-Za-z0-9][A-Za-z0-9._-]*$").ok());
static PEER_ID: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").ok());
/// Host or bracketed IPv6 address with a port
static PEER_ADDRESS: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.\[\]:-]+$").ok());
/// URL characters without braces, quotes, backslashes or whitespace
static URL: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._~:/?#\[\]@!&()*+,;=%-]+$").ok());
static GIT_REF: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/+-]*$").ok());
static GAS_PRICE: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?$").ok());
/// Bank denominations, including `ibc/<hash>` and `factory/<creator>/<name>`
static DENOM: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9/:._-]*$").ok());

/// A pattern that failed to compile matches nothing
fn matches(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
	pattern.as_ref().is_some_and(|re| re.is_match(value))
}

/// Free text shown in task names, the play name and the systemd description
fn is_display_text(value: &str) -> bool {
	!value.chars().any(char::is_control)
		&& !["{{", "{%", "{#"].iter().any(|delimiter| value.contains(delimiter))
}

/// Returns the field name of the first resolved value outside its allowed character set
fn unsafe_field(
	chain: &ValidatedChain,
	peers: &Peers,
	staking_denom: Option<&str>,
) -> Option<&'static str> {
	let peers_safe = |peers: &[PeerEntry]| {
		peers
			.iter()
			.all(|peer| matches(&PEER_ID, &peer.id) && matches(&PEER_ADDRESS, &peer.address))
	};

	let checks: [(&'static str, bool); 11] = [
		("pretty_name", is_display_text(&chain.pretty_name)),
		("chain_name", matches(&IDENTIFIER, &chain.chain_name)),
		("chain_id", matches(&IDENTIFIER, &chain.chain_id)),
		("daemon_name", matches(&IDENTIFIER, &chain.daemon_name)),
		(
			"node_home",
			chain
				.node_dir
				.as_deref()
				.map_or(true, |dir| matches(&NODE_DIR, dir)),
		),
		("codebase.git_repo", matches(&URL, &chain.git_repo)),
		(
			"codebase.recommended_version",
			matches(&GIT_REF, &chain.recommended_version),
		),
		("codebase.genesis.genesis_url", matches(&URL, &chain.genesis_url)),
		(
			"peers",
			peers_safe(&peers.seeds) && peers_safe(&peers.persistent_peers),
		),
		(
			"fees.low_gas_price",
			chain
				.low_gas_price
				.as_deref()
				.map_or(true, |price| matches(&GAS_PRICE, price)),
		),
		(
			"staking.staking_tokens.denom",
			staking_denom.map_or(true, |denom| matches(&DENOM, denom)),
		),
	];

	checks
		.into_iter()
		.find(|(_, safe)| !safe)
		.map(|(field, _)| field)
}

/// Returns the value when it is present and not blank
fn present(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|v| !v.trim().is_empty())
}

fn join_peers(peers: &[PeerEntry]) -> String {
	peers
		.iter()
		.map(|peer| peer.to_string())
		.collect::<Vec<_>>()
		.join(",")
}

/// Strips the home directory token from a `node_home` template, e.g. `$HOME/.gaia` -> `.gaia`
fn node_dir_from_home(node_home: &str) -> Option<String> {
	let relative = node_home
		.strip_prefix(NODE_HOME_PREFIX)
		.or_else(|| node_home.strip_prefix("~/"))
		.unwrap_or(node_home)
		.trim_matches('/');
	if relative.is_empty() {
		None
	} else {
		Some(relative.to_string())
	}
}

/// Validates a descriptor for the given profile.
///
/// Check order:
/// 1. pretty name, daemon name and chain id
/// 2. persistent peers
/// 3. seeds
/// 4. staking tokens (standard profile)
/// 5. a fee token carrying a low gas price (standard profile)
/// 6. node home (standard profile)
/// 7. chain name and codebase location
/// 8. every resolved value within its allowed character set
pub fn validate_descriptor(
	descriptor: &ChainDescriptor,
	profile: PlaybookProfile,
) -> Result<ValidatedChain, SkippedChain> {
	let fallback_name = present(&descriptor.chain_name)
		.unwrap_or("Unknown")
		.to_string();
	let skip_unnamed = |reason| SkippedChain {
		chain: fallback_name.clone(),
		reason,
	};

	let (pretty_name, daemon_name, chain_id) = match (
		present(&descriptor.pretty_name),
		present(&descriptor.daemon_name),
		present(&descriptor.chain_id),
	) {
		(Some(pretty), Some(daemon), Some(chain_id)) => (pretty, daemon, chain_id),
		_ => return Err(skip_unnamed(SkipReason::RequiredInfoMissing)),
	};

	let skip = |reason| SkippedChain {
		chain: pretty_name.to_string(),
		reason,
	};

	if descriptor.peers.persistent_peers.is_empty() {
		return Err(skip(SkipReason::NoPersistentPeers));
	}
	if descriptor.peers.seeds.is_empty() {
		return Err(skip(SkipReason::NoSeeds));
	}

	let (low_gas_price, minimum_gas_price, node_dir, node_home, staking_denom) = match profile {
		PlaybookProfile::Standard => {
			let staking_denom = descriptor
				.staking
				.as_ref()
				.and_then(|staking| staking.staking_tokens.first())
				.map(|token| token.denom.clone())
				.ok_or_else(|| skip(SkipReason::NoStakingTokens))?;

			let fee_tokens = descriptor
				.fees
				.as_ref()
				.map(|fees| fees.fee_tokens.as_slice())
				.unwrap_or_default();
			if fee_tokens.is_empty() {
				return Err(skip(SkipReason::NoFeeTokens));
			}
			let low_gas_price = fee_tokens
				.iter()
				.find_map(|token| token.low_gas_price.as_ref())
				.map(|price| price.to_string())
				.ok_or_else(|| skip(SkipReason::NoLowGasPrice))?;
			tracing::debug!(
				chain = %pretty_name,
				low_gas_price = %low_gas_price,
				"Resolved low gas price"
			);

			let node_dir = present(&descriptor.node_home)
				.and_then(node_dir_from_home)
				.ok_or_else(|| skip_unnamed(SkipReason::NoNodeHome))?;

			let minimum_gas_price = format!("{}{}", low_gas_price, staking_denom);
			let node_home = format!("~/{}", node_dir);
			(
				Some(low_gas_price),
				Some(minimum_gas_price),
				Some(node_dir),
				node_home,
				Some(staking_denom),
			)
		}
		PlaybookProfile::Minimal => (None, None, None, format!("/root/.{}", chain_id), None),
	};

	let chain_name = present(&descriptor.chain_name)
		.ok_or_else(|| skip(SkipReason::MissingField("chain_name")))?;
	let codebase = descriptor.codebase.as_ref();
	let git_repo = codebase
		.and_then(|c| present(&c.git_repo))
		.ok_or_else(|| skip(SkipReason::MissingField("codebase.git_repo")))?;
	let recommended_version = codebase
		.and_then(|c| present(&c.recommended_version))
		.ok_or_else(|| skip(SkipReason::MissingField("codebase.recommended_version")))?;
	let genesis_url = codebase
		.and_then(|c| c.genesis.as_ref())
		.and_then(|g| present(&g.genesis_url))
		.ok_or_else(|| skip(SkipReason::MissingField("codebase.genesis.genesis_url")))?;

	let chain = ValidatedChain {
		chain_name: chain_name.to_string(),
		pretty_name: pretty_name.to_string(),
		chain_id: chain_id.to_string(),
		daemon_name: daemon_name.to_string(),
		git_repo: git_repo.to_string(),
		recommended_version: recommended_version.to_string(),
		genesis_url: genesis_url.to_string(),
		seeds: join_peers(&descriptor.peers.seeds),
		persistent_peers: join_peers(&descriptor.peers.persistent_peers),
		low_gas_price,
		minimum_gas_price,
		node_dir,
		node_home,
		rpc_port: descriptor.rpc_port,
		p2p_port: descriptor.p2p_port,
	};

	match unsafe_field(&chain, &descriptor.peers, staking_denom.as_deref()) {
		Some("pretty_name") => Err(skip_unnamed(SkipReason::UnsafeValue("pretty_name"))),
		Some(field) => Err(skip(SkipReason::UnsafeValue(field))),
		None => Ok(chain),
	}
}
