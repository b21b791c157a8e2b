//! Core services implementing the business logic.
//!
//! - `playbook`: Validates chain descriptors and emits installation playbooks
//! - `rewards`: Queries a node CLI and estimates staking returns

pub mod playbook;
pub mod rewards;
