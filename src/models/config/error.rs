//! Descriptor loading errors.
//!
//! Every variant names the file or directory it concerns, and field level problems also name
//! the offending field in JSON path notation (`peers.seeds[0]`), so a registry maintainer can
//! go straight to the broken entry.

use log::error;
use std::{
	error::Error,
	fmt,
	path::{Path, PathBuf},
};

/// A descriptor field that failed structural validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
	/// JSON path of the field, e.g. `peers.persistent_peers[2]`
	pub field: String,
	pub reason: String,
}

impl FieldIssue {
	pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			reason: reason.into(),
		}
	}
}

impl fmt::Display for FieldIssue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.field, self.reason)
	}
}

/// Errors raised while reading chain descriptors from a registry
#[derive(Debug)]
pub enum ConfigError {
	/// The registry root is missing or cannot be listed
	RegistryUnreadable { path: PathBuf, reason: String },

	/// A descriptor file cannot be opened, or is not a JSON file
	DescriptorUnreadable { path: PathBuf, reason: String },

	/// A descriptor is not JSON of the expected shape
	MalformedDescriptor { path: PathBuf, reason: String },

	/// A descriptor parsed but one of its fields is unusable
	InvalidField {
		path: PathBuf,
		field: String,
		reason: String,
	},
}

impl ConfigError {
	fn format_message(&self) -> String {
		match self {
			Self::RegistryUnreadable { path, reason } => {
				format!("Cannot read chain registry {}: {}", path.display(), reason)
			}
			Self::DescriptorUnreadable { path, reason } => {
				format!("Cannot read descriptor {}: {}", path.display(), reason)
			}
			Self::MalformedDescriptor { path, reason } => {
				format!("Malformed descriptor {}: {}", path.display(), reason)
			}
			Self::InvalidField {
				path,
				field,
				reason,
			} => format!(
				"Invalid field '{}' in descriptor {}: {}",
				field,
				path.display(),
				reason
			),
		}
	}

	/// Path of the registry directory or descriptor file the error concerns
	pub fn path(&self) -> &Path {
		match self {
			Self::RegistryUnreadable { path, .. }
			| Self::DescriptorUnreadable { path, .. }
			| Self::MalformedDescriptor { path, .. }
			| Self::InvalidField { path, .. } => path,
		}
	}

	/// Create a registry error and log it
	pub fn registry_unreadable(path: &Path, reason: impl ToString) -> Self {
		let error = Self::RegistryUnreadable {
			path: path.to_path_buf(),
			reason: reason.to_string(),
		};
		error!("{}", error.format_message());
		error
	}

	/// Create an unreadable descriptor error and log it
	pub fn descriptor_unreadable(path: &Path, reason: impl ToString) -> Self {
		let error = Self::DescriptorUnreadable {
			path: path.to_path_buf(),
			reason: reason.to_string(),
		};
		error!("{}", error.format_message());
		error
	}

	/// Create a malformed descriptor error and log it
	pub fn malformed_descriptor(path: &Path, reason: impl ToString) -> Self {
		let error = Self::MalformedDescriptor {
			path: path.to_path_buf(),
			reason: reason.to_string(),
		};
		error!("{}", error.format_message());
		error
	}

	/// Create an invalid field error from a validation issue and log it
	pub fn invalid_field(path: &Path, issue: FieldIssue) -> Self {
		let error = Self::InvalidField {
			path: path.to_path_buf(),
			field: issue.field,
			reason: issue.reason,
		};
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for ConfigError {}
