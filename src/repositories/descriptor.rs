//! Chain descriptor repository.
//!
//! Loads every `chain.json` found one level below a chain registry directory and keeps them
//! keyed by directory name, in lexicographic order.

use std::{
	collections::BTreeMap,
	path::{Path, PathBuf},
};

use crate::{
	models::{ChainDescriptor, ConfigLoader},
	repositories::error::RepositoryError,
};

pub struct DescriptorRepository {
	pub base_dir: PathBuf,
	pub descriptors: BTreeMap<String, ChainDescriptor>,
}

impl DescriptorRepository {
	/// Scans `base_dir` and loads every descriptor that can be read.
	///
	/// # Errors
	/// Fails only when `base_dir` itself cannot be listed.
	pub fn new(base_dir: &Path) -> Result<Self, RepositoryError> {
		let descriptors = ChainDescriptor::load_all(base_dir).map_err(|e| {
			RepositoryError::load_error(format!("Failed to load chain descriptors: {}", e))
		})?;
		Ok(DescriptorRepository {
			base_dir: base_dir.to_path_buf(),
			descriptors,
		})
	}
}

pub trait DescriptorRepositoryTrait {
	fn get(&self, chain_dir: &str) -> Option<ChainDescriptor>;
	fn get_all(&self) -> BTreeMap<String, ChainDescriptor>;
	/// Directory a descriptor was loaded from
	fn chain_directory(&self, chain_dir: &str) -> Result<PathBuf, RepositoryError>;
}

impl DescriptorRepositoryTrait for DescriptorRepository {
	fn get(&self, chain_dir: &str) -> Option<ChainDescriptor> {
		self.descriptors.get(chain_dir).cloned()
	}

	fn get_all(&self) -> BTreeMap<String, ChainDescriptor> {
		self.descriptors.clone()
	}

	fn chain_directory(&self, chain_dir: &str) -> Result<PathBuf, RepositoryError> {
		if !self.descriptors.contains_key(chain_dir) {
			return Err(RepositoryError::internal_error(format!(
				"No descriptor loaded for '{}'",
				chain_dir
			)));
		}
		Ok(self.base_dir.join(chain_dir))
	}
}
