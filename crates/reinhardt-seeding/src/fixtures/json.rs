//! JSON fixture adapter.

use std::path::Path;

use serde_json::Value;

use super::adapter::{FixtureAdapter, read_fixture};
use crate::error::{FixtureError, FixtureResult};

/// Reads and writes `.json` fixture files.
///
/// Output is pretty-printed with two-space indentation and a final newline so
/// committed fixtures diff cleanly. Object key order is preserved in both
/// directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAdapter;

impl JsonAdapter {
	/// Creates a new JSON adapter.
	pub fn new() -> Self {
		Self
	}
}

impl FixtureAdapter for JsonAdapter {
	fn name(&self) -> &str {
		"Json"
	}

	fn extension(&self) -> &str {
		"json"
	}

	fn parse(&self, path: &Path) -> FixtureResult<Value> {
		let content = read_fixture(path)?;
		serde_json::from_slice(&content).map_err(|e| FixtureError::parse(path, "json", e))
	}

	fn encode(&self, data: &Value) -> FixtureResult<Vec<u8>> {
		let mut output = serde_json::to_vec_pretty(data)
			.map_err(|e| FixtureError::Encode(format!("json: {}", e)))?;
		output.push(b'\n');
		Ok(output)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use std::io::Write;
	use tempfile::NamedTempFile;

	fn pirates() -> Value {
		json!({
			"pearl": {
				"name": "The Black Pearl",
				"captain": "Jack Sparrow",
				"type": "East Indiaman",
				"appearances": [
					"The Course of the Black Pearl",
					"Dead Man's Chest At World's End"
				]
			}
		})
	}

	#[rstest]
	fn test_parse() {
		let mut file = NamedTempFile::with_suffix(".json").unwrap();
		write!(file, "{}", pirates()).unwrap();

		let data = JsonAdapter::new().parse(file.path()).unwrap();
		assert_eq!(data, pirates());
	}

	#[rstest]
	fn test_parse_preserves_key_order() {
		let mut file = NamedTempFile::with_suffix(".json").unwrap();
		write!(file, r#"{{"zulu": 1, "alpha": 2, "mike": 3}}"#).unwrap();

		let data = JsonAdapter::new().parse(file.path()).unwrap();
		let keys: Vec<_> = data.as_object().unwrap().keys().cloned().collect();
		assert_eq!(keys, vec!["zulu", "alpha", "mike"]);
	}

	#[rstest]
	#[case::syntax(b"{\"pearl\": }".as_slice())]
	#[case::truncated(b"{\"pearl\": {\"name\": \"The Bl".as_slice())]
	#[case::invalid_utf8(b"{\"pearl\": \"\xFF\xFE\"}".as_slice())]
	#[case::empty(b"".as_slice())]
	fn test_parse_error(#[case] content: &[u8]) {
		let mut file = NamedTempFile::with_suffix(".json").unwrap();
		file.write_all(content).unwrap();

		let result = JsonAdapter::new().parse(file.path());
		match result {
			Err(FixtureError::Parse { path, format, .. }) => {
				assert_eq!(path, file.path());
				assert_eq!(format, "json");
			}
			other => panic!("Expected Parse error, got {:?}", other),
		}
	}

	#[rstest]
	fn test_parse_error_message() {
		let mut file = NamedTempFile::with_suffix(".json").unwrap();
		write!(file, "not json").unwrap();

		let error = JsonAdapter::new().parse(file.path()).unwrap_err();
		assert!(error.to_string().starts_with("Failed to parse json file"));
		assert!(error.to_string().contains(&file.path().display().to_string()));
	}

	#[rstest]
	fn test_encode_roundtrip() {
		let adapter = JsonAdapter::new();
		let encoded = adapter.encode(&pirates()).unwrap();
		let decoded: Value = serde_json::from_slice(&encoded).unwrap();
		assert_eq!(decoded, pirates());
	}

	#[rstest]
	fn test_encode_layout() {
		let encoded = JsonAdapter::new()
			.encode(&json!({"pearl": {"name": "The Black Pearl", "guns": [32, 12]}}))
			.unwrap();
		let expected = "{\n  \"pearl\": {\n    \"name\": \"The Black Pearl\",\n    \"guns\": [\n      32,\n      12\n    ]\n  }\n}\n";
		assert_eq!(String::from_utf8(encoded).unwrap(), expected);
	}

	#[rstest]
	fn test_encode_has_no_trailing_whitespace() {
		let encoded = JsonAdapter::new().encode(&pirates()).unwrap();
		let text = String::from_utf8(encoded).unwrap();
		assert!(text.lines().all(|line| line == line.trim_end()));
	}

	#[rstest]
	fn test_extension() {
		assert_eq!(JsonAdapter::new().extension(), "json");
		assert_eq!(JsonAdapter::new().name(), "Json");
	}
}
