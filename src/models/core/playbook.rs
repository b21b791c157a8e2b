//! Structured representation of an Ansible playbook.
//!
//! Playbooks are assembled as data and only turned into text by a YAML serializer, so values
//! coming from descriptors never have to be quoted by hand.

use serde::{ser::SerializeMap, Serialize, Serializer};
use serde_yaml::Value;
use std::{fmt, str::FromStr};

/// Flavour of playbook to emit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybookProfile {
	/// Builds from source with a matching Go toolchain, bootstraps from snapshots and sets the
	/// minimum gas price. Requires staking, fee and home directory information.
	#[default]
	Standard,
	/// Plain `make install` setup with node data under `/root/.<chain_id>`
	Minimal,
}

impl PlaybookProfile {
	pub fn as_str(&self) -> &'static str {
		match self {
			PlaybookProfile::Standard => "standard",
			PlaybookProfile::Minimal => "minimal",
		}
	}
}

impl fmt::Display for PlaybookProfile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for PlaybookProfile {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"standard" => Ok(PlaybookProfile::Standard),
			"minimal" => Ok(PlaybookProfile::Minimal),
			other => Err(format!(
				"Unknown playbook profile '{}', expected one of: standard, minimal",
				other
			)),
		}
	}
}

/// A complete playbook document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Playbook {
	pub plays: Vec<Play>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Play {
	pub name: String,
	pub hosts: String,
	#[serde(rename = "become", skip_serializing_if = "Option::is_none")]
	pub become_root: Option<bool>,
	pub vars: PlayVars,
	pub tasks: Vec<Task>,
}

/// Play variables, serialized in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayVars(pub Vec<(String, String)>);

impl PlayVars {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.push((key.into(), value.into()));
		self
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}
}

impl Serialize for PlayVars {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.0.len()))?;
		for (key, value) in &self.0 {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}

/// A single task: an optional name, one module invocation and task level keywords.
///
/// Serialized as `name`, then the module, then the keywords in the order they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
	pub name: Option<String>,
	pub module: String,
	pub args: Value,
	pub keywords: Vec<(String, Value)>,
}

impl Task {
	pub fn new(name: impl Into<String>, module: impl Into<String>, args: Value) -> Self {
		Self {
			name: Some(name.into()),
			module: module.into(),
			args,
			keywords: Vec::new(),
		}
	}

	pub fn unnamed(module: impl Into<String>, args: Value) -> Self {
		Self {
			name: None,
			module: module.into(),
			args,
			keywords: Vec::new(),
		}
	}

	/// Adds a task keyword such as `register`, `when` or `ignore_errors`
	pub fn keyword(mut self, key: impl Into<String>, value: Value) -> Self {
		self.keywords.push((key.into(), value));
		self
	}

	pub fn get_keyword(&self, key: &str) -> Option<&Value> {
		self.keywords
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v)
	}
}

impl Serialize for Task {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let len = self.keywords.len() + 1 + usize::from(self.name.is_some());
		let mut map = serializer.serialize_map(Some(len))?;
		if let Some(name) = &self.name {
			map.serialize_entry("name", name)?;
		}
		map.serialize_entry(&self.module, &self.args)?;
		for (key, value) in &self.keywords {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}
