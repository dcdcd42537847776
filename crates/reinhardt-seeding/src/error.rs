//! Error types for fixture operations.
//!
//! Every variant carries the offending name or path so a failing test points
//! straight at the fixture that caused it.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while resolving, loading, or saving fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// No adapter is registered under the resolved identifier.
	#[error("Could not find adapter `{0}`")]
	AdapterNotFound(String),

	/// The fixture file is missing, unreadable, a directory, or not writable.
	#[error("Could not read file `{}`: {reason}", path.display())]
	FileAccess {
		/// Resolved fixture path.
		path: PathBuf,
		/// What went wrong with it.
		reason: String,
	},

	/// The adapter could not decode the fixture content.
	#[error("Failed to parse {format} file `{}`: {reason}", path.display())]
	Parse {
		/// Resolved fixture path.
		path: PathBuf,
		/// Format label of the adapter, e.g. "json".
		format: String,
		/// Decoder message.
		reason: String,
	},

	/// The requested wrapper is not registered as a type path or a short name.
	#[error("Unsupported class given (`{0}`)")]
	UnsupportedContainer(String),

	/// A fixture name segment has nothing left once slugified.
	#[error("Invalid fixture name `{name}`: {reason}")]
	InvalidName {
		/// Name as given by the caller.
		name: String,
		/// Which part of the name was rejected.
		reason: String,
	},

	/// The library named in the options is not registered.
	#[error("Library not found: {0}")]
	LibraryNotFound(String),

	/// The adapter could not encode the data.
	#[error("Encode error: {0}")]
	Encode(String),

	/// Settings could not be loaded or are invalid.
	#[error("Settings error: {0}")]
	Settings(String),

	/// TOML settings file could not be decoded.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

impl FixtureError {
	/// Builds a [`FixtureError::FileAccess`] for `path`.
	pub fn file_access(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
		Self::FileAccess {
			path: path.as_ref().to_path_buf(),
			reason: reason.into(),
		}
	}

	/// Builds a [`FixtureError::Parse`] for `path`.
	pub fn parse(
		path: impl AsRef<Path>,
		format: impl Into<String>,
		reason: impl std::fmt::Display,
	) -> Self {
		Self::Parse {
			path: path.as_ref().to_path_buf(),
			format: format.into(),
			reason: reason.to_string(),
		}
	}

	/// Returns the fixture path this error refers to, if any.
	pub fn path(&self) -> Option<&Path> {
		match self {
			Self::FileAccess { path, .. } | Self::Parse { path, .. } => Some(path),
			_ => None,
		}
	}
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;
