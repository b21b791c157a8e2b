//! Tooling for operating Cosmos-style blockchain nodes.
//!
//! The crate bundles two independent utilities:
//!
//! - Playbook generation: scans a directory of per-chain `chain.json` descriptors, validates
//!   them and emits an Ansible installation playbook next to each valid descriptor.
//! - Reward estimation: queries a running node through its CLI and computes delegator and
//!   validator APR/APY.
//!
//! # Modules
//! - `models`: Descriptor, playbook and query-result data structures
//! - `repositories`: Loading descriptors from a chain registry directory
//! - `services`: Playbook generation and reward estimation
//! - `utils`: Logging, constants, external command execution and test helpers

pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
