//! Playbook generation over a chain registry.
//!
//! Each chain directory is handled independently: a descriptor that fails validation is
//! reported and skipped, the rest of the registry is still processed. Writes go through a
//! temporary file so an interrupted run never leaves a truncated playbook behind.

use std::path::{Path, PathBuf};

use crate::{
	models::{ChainDescriptor, PlaybookProfile},
	repositories::{DescriptorRepository, DescriptorRepositoryTrait},
	services::playbook::{
		build_playbook, error::PlaybookError, render_playbook, validate_descriptor, SkippedChain,
	},
	utils::constants::{PLAYBOOK_FILE_EXTENSION, PLAYBOOK_FILE_PREFIX},
};

/// A playbook produced for one chain directory
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPlaybook {
	pub directory_name: String,
	pub pretty_name: String,
	pub path: PathBuf,
	pub content: String,
	/// False when the playbook was only rendered (dry run)
	pub written: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybookOutcome {
	Generated(GeneratedPlaybook),
	Skipped(SkippedChain),
}

/// Summary of a registry scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
	pub generated: Vec<GeneratedPlaybook>,
	pub skipped: Vec<SkippedChain>,
}

/// File name of the playbook generated for a chain directory
pub fn playbook_file_name(directory_name: &str) -> String {
	format!(
		"{}{}.{}",
		PLAYBOOK_FILE_PREFIX, directory_name, PLAYBOOK_FILE_EXTENSION
	)
}

pub struct PlaybookService<T: DescriptorRepositoryTrait> {
	repository: T,
	profile: PlaybookProfile,
}

impl PlaybookService<DescriptorRepository> {
	/// Loads the registry rooted at `base_dir`
	pub fn new(base_dir: &Path, profile: PlaybookProfile) -> Result<Self, PlaybookError> {
		let repository = DescriptorRepository::new(base_dir)?;
		Ok(PlaybookService {
			repository,
			profile,
		})
	}
}

impl<T: DescriptorRepositoryTrait> PlaybookService<T> {
	pub fn new_with_repository(repository: T, profile: PlaybookProfile) -> Self {
		PlaybookService {
			repository,
			profile,
		}
	}

	pub fn profile(&self) -> PlaybookProfile {
		self.profile
	}

	/// Validates and renders one descriptor, writing the playbook unless `dry_run` is set
	pub fn generate(
		&self,
		directory_name: &str,
		descriptor: &ChainDescriptor,
		dry_run: bool,
	) -> Result<PlaybookOutcome, PlaybookError> {
		let chain = match validate_descriptor(descriptor, self.profile) {
			Ok(chain) => chain,
			Err(skipped) => {
				tracing::warn!("{}", skipped);
				return Ok(PlaybookOutcome::Skipped(skipped));
			}
		};

		let content = render_playbook(&build_playbook(&chain, self.profile))?;
		let path = self
			.repository
			.chain_directory(directory_name)?
			.join(playbook_file_name(directory_name));

		if dry_run {
			tracing::info!(
				"Rendered playbook for {} ({} bytes, not written)",
				chain.pretty_name,
				content.len()
			);
		} else {
			write_atomically(&path, &content)?;
			tracing::info!(
				"Generated playbook for {} at {}",
				chain.pretty_name,
				path.display()
			);
		}

		Ok(PlaybookOutcome::Generated(GeneratedPlaybook {
			directory_name: directory_name.to_string(),
			pretty_name: chain.pretty_name,
			path,
			content,
			written: !dry_run,
		}))
	}

	/// Processes every descriptor of the registry in directory name order
	pub fn generate_all(&self, dry_run: bool) -> Result<GenerationReport, PlaybookError> {
		let mut report = GenerationReport::default();

		for (directory_name, descriptor) in self.repository.get_all() {
			match self.generate(&directory_name, &descriptor, dry_run)? {
				PlaybookOutcome::Generated(playbook) => report.generated.push(playbook),
				PlaybookOutcome::Skipped(skipped) => report.skipped.push(skipped),
			}
		}

		tracing::info!(
			profile = %self.profile,
			generated = report.generated.len(),
			skipped = report.skipped.len(),
			"Playbook generation finished"
		);
		Ok(report)
	}
}

fn write_atomically(path: &Path, content: &str) -> Result<(), PlaybookError> {
	let temp_path = path.with_extension(format!("{}.tmp", PLAYBOOK_FILE_EXTENSION));
	std::fs::write(&temp_path, content).map_err(|e| {
		PlaybookError::write_error(format!("{}: {}", temp_path.display(), e))
	})?;
	std::fs::rename(&temp_path, path).map_err(|e| {
		let _ = std::fs::remove_file(&temp_path);
		PlaybookError::write_error(format!("{}: {}", path.display(), e))
	})
}
