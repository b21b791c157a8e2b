//! Chain descriptor data structures.
//!
//! A descriptor is the `chain.json` file found in each chain directory of a chain registry.
//! Every field is optional at parse time so that incomplete descriptors can be reported with a
//! precise reason instead of failing deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::{DEFAULT_P2P_PORT, DEFAULT_RPC_PORT};

fn default_rpc_port() -> u16 {
	DEFAULT_RPC_PORT
}

fn default_p2p_port() -> u16 {
	DEFAULT_P2P_PORT
}

/// Configuration descriptor of a single blockchain network
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChainDescriptor {
	/// Internal short name, also used as the systemd unit name
	pub chain_name: Option<String>,
	/// Human readable name
	pub pretty_name: Option<String>,
	pub chain_id: Option<String>,
	/// Name of the node daemon executable
	pub daemon_name: Option<String>,
	/// Home directory template, usually of the form `$HOME/.<name>`
	pub node_home: Option<String>,
	pub codebase: Option<Codebase>,
	#[serde(default)]
	pub peers: Peers,
	pub fees: Option<Fees>,
	pub staking: Option<Staking>,
	#[serde(default = "default_rpc_port")]
	pub rpc_port: u16,
	#[serde(default = "default_p2p_port")]
	pub p2p_port: u16,
}

impl Default for ChainDescriptor {
	fn default() -> Self {
		Self {
			chain_name: None,
			pretty_name: None,
			chain_id: None,
			daemon_name: None,
			node_home: None,
			codebase: None,
			peers: Peers::default(),
			fees: None,
			staking: None,
			rpc_port: DEFAULT_RPC_PORT,
			p2p_port: DEFAULT_P2P_PORT,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Codebase {
	pub git_repo: Option<String>,
	pub recommended_version: Option<String>,
	pub genesis: Option<Genesis>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Genesis {
	pub genesis_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Peers {
	#[serde(default)]
	pub seeds: Vec<PeerEntry>,
	#[serde(default)]
	pub persistent_peers: Vec<PeerEntry>,
}

/// A peer as advertised by the chain registry
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PeerEntry {
	/// Node identity (hex encoded node key hash)
	pub id: String,
	/// Network address in `host:port` form
	pub address: String,
}

impl fmt::Display for PeerEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}@{}", self.id, self.address)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Fees {
	#[serde(default)]
	pub fee_tokens: Vec<FeeToken>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FeeToken {
	pub denom: Option<String>,
	pub low_gas_price: Option<GasPrice>,
}

/// Gas price as found in a descriptor.
///
/// Registries mostly publish numbers but a few publish quoted decimals, both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum GasPrice {
	Number(serde_json::Number),
	Text(String),
}

impl fmt::Display for GasPrice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GasPrice::Number(number) => write!(f, "{}", number),
			GasPrice::Text(text) => write!(f, "{}", text),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Staking {
	#[serde(default)]
	pub staking_tokens: Vec<StakingToken>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StakingToken {
	pub denom: String,
}
