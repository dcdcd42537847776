//! Test data helpers.
//!
//! Committed fixture files live under `tests/fixtures/` of this crate, which
//! is exactly where the default path template looks when the active library
//! is the crate root.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use reinhardt_seeding::error::FixtureResult;
use reinhardt_seeding::fixtures::{FixtureAdapter, Fixtures, Libraries};
use rstest::fixture;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Root of this crate, used as the active library.
pub fn crate_root() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Facade reading the committed test data.
#[fixture]
pub fn fixtures() -> Fixtures {
	Fixtures::new(Libraries::new("app", crate_root()))
}

/// Facade writing into a fresh temporary library.
pub struct ScratchLibrary {
	pub dir: TempDir,
	pub fixtures: Fixtures,
}

impl ScratchLibrary {
	/// Path of a file relative to the library's fixture directory.
	pub fn fixture_path(&self, relative: &str) -> PathBuf {
		self.dir.path().join("tests/fixtures").join(relative)
	}

	/// Root of the scratch library.
	pub fn root(&self) -> &Path {
		self.dir.path()
	}
}

#[fixture]
pub fn scratch() -> ScratchLibrary {
	let dir = TempDir::new().unwrap();
	let fixtures = Fixtures::new(Libraries::new("app", dir.path()));
	ScratchLibrary { dir, fixtures }
}

/// The decoded content of `models/pirates`.
pub fn pirates() -> Value {
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

/// Adapter that counts calls and returns canned data.
#[derive(Debug, Default)]
pub struct CountingAdapter {
	pub parsed: AtomicUsize,
	pub encoded: AtomicUsize,
}

impl CountingAdapter {
	pub fn shared() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn parse_count(&self) -> usize {
		self.parsed.load(Ordering::SeqCst)
	}

	pub fn encode_count(&self) -> usize {
		self.encoded.load(Ordering::SeqCst)
	}
}

impl FixtureAdapter for CountingAdapter {
	fn name(&self) -> &str {
		"Counting"
	}

	fn extension(&self) -> &str {
		"count"
	}

	fn parse(&self, _path: &Path) -> FixtureResult<Value> {
		self.parsed.fetch_add(1, Ordering::SeqCst);
		Ok(json!({"counted": true}))
	}

	fn encode(&self, data: &Value) -> FixtureResult<Vec<u8>> {
		self.encoded.fetch_add(1, Ordering::SeqCst);
		Ok(data.to_string().into_bytes())
	}
}

/// Adapter whose encoder produces nothing.
#[derive(Debug, Default)]
pub struct SilentAdapter;

impl FixtureAdapter for SilentAdapter {
	fn name(&self) -> &str {
		"Silent"
	}

	fn extension(&self) -> &str {
		"silent"
	}

	fn parse(&self, _path: &Path) -> FixtureResult<Value> {
		Ok(Value::Null)
	}

	fn encode(&self, _data: &Value) -> FixtureResult<Vec<u8>> {
		Ok(Vec::new())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[rstest::rstest]
	fn test_crate_root_holds_fixture_data() {
		assert!(crate_root().join("tests/fixtures/models/pirates.json").is_file());
	}

	#[rstest::rstest]
	fn test_scratch_library_is_empty(scratch: ScratchLibrary) {
		assert!(!scratch.fixture_path("anything.json").exists());
	}
}
