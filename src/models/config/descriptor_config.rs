use std::path::Path;

use crate::{
	models::{ChainDescriptor, ConfigLoader},
	utils::constants::{DESCRIPTOR_FILE_NAME, EXCLUDED_CHAIN_DIRECTORY},
};

use super::error::{ConfigError, FieldIssue};

/// Returns true for registry directories that never hold a mainnet chain descriptor
fn is_excluded_directory(name: &str) -> bool {
	name == EXCLUDED_CHAIN_DIRECTORY || name.starts_with('.') || name.starts_with('_')
}

impl ConfigLoader for ChainDescriptor {
	fn load_all<T>(path: &Path) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		if !path.is_dir() {
			return Err(ConfigError::registry_unreadable(path, "directory not found"));
		}

		let mut names = Vec::new();
		let entries =
			std::fs::read_dir(path).map_err(|e| ConfigError::registry_unreadable(path, e))?;
		for entry in entries {
			let entry = entry.map_err(|e| ConfigError::registry_unreadable(path, e))?;
			match entry.file_name().into_string() {
				Ok(name) => names.push(name),
				Err(name) => {
					tracing::debug!(directory = ?name, "Ignoring directory with a non UTF-8 name");
				}
			}
		}
		names.sort();

		let mut pairs = Vec::new();
		for name in names {
			if is_excluded_directory(&name) {
				tracing::debug!(directory = %name, "Ignoring excluded directory");
				continue;
			}

			let chain_dir = path.join(&name);
			let descriptor_path = chain_dir.join(DESCRIPTOR_FILE_NAME);
			if !chain_dir.is_dir() || !descriptor_path.is_file() {
				continue;
			}

			match Self::load_from_path(&descriptor_path) {
				Ok(descriptor) => pairs.push((name, descriptor)),
				Err(e) => {
					tracing::warn!(
						path = %descriptor_path.display(),
						error = %e,
						"Skipping descriptor that could not be loaded"
					);
				}
			}
		}

		Ok(T::from_iter(pairs))
	}

	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		if !Self::is_json_file(path) {
			return Err(ConfigError::descriptor_unreadable(path, "not a JSON file"));
		}

		let file =
			std::fs::File::open(path).map_err(|e| ConfigError::descriptor_unreadable(path, e))?;
		let config: ChainDescriptor = serde_json::from_reader(std::io::BufReader::new(file))
			.map_err(|e| ConfigError::malformed_descriptor(path, e))?;

		config
			.validate()
			.map_err(|issue| ConfigError::invalid_field(path, issue))?;

		Ok(config)
	}

	fn validate(&self) -> Result<(), FieldIssue> {
		let peer_lists = [
			("peers.seeds", &self.peers.seeds),
			("peers.persistent_peers", &self.peers.persistent_peers),
		];
		for (list, peers) in peer_lists {
			if let Some((index, peer)) = peers
				.iter()
				.enumerate()
				.find(|(_, p)| p.id.trim().is_empty() || p.address.trim().is_empty())
			{
				return Err(FieldIssue::new(
					format!("{}[{}]", list, index),
					format!("needs both an id and an address, found '{}'", peer),
				));
			}
		}

		for (field, port) in [("rpc_port", self.rpc_port), ("p2p_port", self.p2p_port)] {
			if port == 0 {
				return Err(FieldIssue::new(field, "must be greater than 0"));
			}
		}

		Ok(())
	}
}
