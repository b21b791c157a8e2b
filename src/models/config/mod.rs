use std::path::Path;

mod descriptor_config;
mod error;

pub use error::{ConfigError, FieldIssue};

/// Common interface for loading configuration files
pub trait ConfigLoader: Sized {
	/// Loads every configuration found under `path`, keyed by the name it was found under.
	///
	/// Entries that fail to load are logged and left out.
	fn load_all<T>(path: &Path) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>;

	fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	/// Structural checks that need no context beyond the loaded value
	fn validate(&self) -> Result<(), FieldIssue>;

	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}
