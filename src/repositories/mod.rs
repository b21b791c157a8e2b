//! Repository implementations for loading configuration.
//!
//! - `DescriptorRepository`: chain descriptors found in a chain registry directory

mod descriptor;
mod error;

pub use descriptor::{DescriptorRepository, DescriptorRepositoryTrait};
pub use error::RepositoryError;
