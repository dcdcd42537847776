//! YAML fixture adapter (requires the `yaml` feature).

use std::path::Path;

use serde_json::Value;

use super::adapter::{FixtureAdapter, read_fixture};
use crate::error::{FixtureError, FixtureResult};

/// Reads and writes `.yaml` fixture files.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlAdapter;

impl YamlAdapter {
	/// Creates a new YAML adapter.
	pub fn new() -> Self {
		Self
	}
}

impl FixtureAdapter for YamlAdapter {
	fn name(&self) -> &str {
		"Yaml"
	}

	fn extension(&self) -> &str {
		"yaml"
	}

	fn parse(&self, path: &Path) -> FixtureResult<Value> {
		let content = read_fixture(path)?;
		serde_yaml::from_slice(&content).map_err(|e| FixtureError::parse(path, "yaml", e))
	}

	fn encode(&self, data: &Value) -> FixtureResult<Vec<u8>> {
		serde_yaml::to_string(data)
			.map(String::into_bytes)
			.map_err(|e| FixtureError::Encode(format!("yaml: {}", e)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[rstest]
	fn test_parse() {
		let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
		write!(
			file,
			"pearl:\n  name: The Black Pearl\n  captain: Jack Sparrow\n  guns: 32\n"
		)
		.unwrap();

		let data = YamlAdapter::new().parse(file.path()).unwrap();
		assert_eq!(
			data,
			json!({"pearl": {"name": "The Black Pearl", "captain": "Jack Sparrow", "guns": 32}})
		);
	}

	#[rstest]
	fn test_parse_error() {
		let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
		write!(file, "pearl: [unclosed\n").unwrap();

		let error = YamlAdapter::new().parse(file.path()).unwrap_err();
		assert!(error.to_string().starts_with("Failed to parse yaml file"));
	}

	#[rstest]
	fn test_encode_roundtrip() {
		let data = json!({"pearl": {"name": "The Black Pearl", "appearances": ["One", "Two"]}});
		let encoded = YamlAdapter::new().encode(&data).unwrap();
		let decoded: Value = serde_yaml::from_slice(&encoded).unwrap();
		assert_eq!(decoded, data);
	}
}
