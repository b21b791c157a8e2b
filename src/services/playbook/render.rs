use crate::{models::Playbook, services::playbook::error::PlaybookError};

const DOCUMENT_START: &str = "---\n";

/// Serializes a playbook to YAML.
///
/// The output always starts with a document marker and is identical for identical input.
pub fn render_playbook(playbook: &Playbook) -> Result<String, PlaybookError> {
	let body = serde_yaml::to_string(playbook)?;
	if body.starts_with(DOCUMENT_START) {
		Ok(body)
	} else {
		Ok(format!("{}{}", DOCUMENT_START, body))
	}
}
