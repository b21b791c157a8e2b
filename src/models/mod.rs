//! Domain models and data structures for node provisioning.
//!
//! This module contains all the core data structures used throughout the application:
//!
//! - `config`: Descriptor loading and structural validation
//! - `core`: Core domain models (ChainDescriptor, Playbook, reward query results)

mod config;
mod core;

// Re-export core types
pub use core::{
	AnnualProvisions, ChainDescriptor, Codebase, FeeToken, Fees, GasPrice, Genesis,
	OutstandingRewards, PageResponse, PeerEntry, Peers, Play, PlayVars, Playbook, PlaybookProfile,
	RewardCoin, Staking, StakingPool, StakingToken, Task, ValidatorInfo, ValidatorSet,
};

// Re-export config types
pub use config::{ConfigError, ConfigLoader, FieldIssue};
