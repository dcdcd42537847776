//! Fixture adapter contract.
//!
//! An adapter binds one file format to the fixture system: it declares the
//! file extension used in resolved paths and converts between file content and
//! [`serde_json::Value`].

use std::fmt::Debug;
use std::path::Path;

use serde_json::Value;

use crate::error::{FixtureError, FixtureResult};

/// Parser/encoder pair for one fixture file format.
///
/// Adapters are stateless and shared through
/// [`AdapterRegistry`](super::AdapterRegistry) as `Arc<dyn FixtureAdapter>`.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use reinhardt_seeding::error::FixtureResult;
/// use reinhardt_seeding::fixtures::FixtureAdapter;
/// use serde_json::{Value, json};
///
/// #[derive(Debug)]
/// struct Constant;
///
/// impl FixtureAdapter for Constant {
///     fn name(&self) -> &str { "Constant" }
///     fn extension(&self) -> &str { "txt" }
///     fn parse(&self, _path: &Path) -> FixtureResult<Value> { Ok(json!({"a": 1})) }
///     fn encode(&self, data: &Value) -> FixtureResult<Vec<u8>> { Ok(data.to_string().into_bytes()) }
/// }
///
/// assert_eq!(Constant.extension(), "txt");
/// ```
pub trait FixtureAdapter: Debug + Send + Sync {
	/// Short identifier the adapter is registered under (e.g. "Json").
	fn name(&self) -> &str;

	/// File extension substituted for `{type}` in path templates.
	fn extension(&self) -> &str;

	/// Reads and decodes the fixture file at `path`.
	///
	/// The caller has already checked that `path` exists and is readable.
	fn parse(&self, path: &Path) -> FixtureResult<Value>;

	/// Encodes `data` into the bytes written to a fixture file.
	fn encode(&self, data: &Value) -> FixtureResult<Vec<u8>>;
}

/// Reads the full content of a fixture file for an adapter.
pub(crate) fn read_fixture(path: &Path) -> FixtureResult<Vec<u8>> {
	std::fs::read(path).map_err(|e| FixtureError::file_access(path, e.to_string()))
}
