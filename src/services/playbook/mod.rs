//! Playbook generation service.
//!
//! Turns chain descriptors into Ansible playbooks:
//! - `validation`: ordered required-field checks producing either a validated chain or a skip
//!   reason
//! - `builder`: the task list for each profile, as data
//! - `render`: YAML serialization of the assembled playbook
//! - `service`: scanning a registry and writing `install_<chain>.yml` files

mod builder;
mod error;
mod render;
mod service;
mod validation;

pub use builder::build_playbook;
pub use error::PlaybookError;
pub use render::render_playbook;
pub use service::{
	playbook_file_name, GeneratedPlaybook, GenerationReport, PlaybookOutcome, PlaybookService,
};
pub use validation::{validate_descriptor, SkipReason, SkippedChain, ValidatedChain};
