//! Fixture settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables prefixed with [`ENV_PREFIX`].
//!
//! ```toml
//! base_dir = "/srv/app"
//! library = "app"
//! path_template = "{library}/tests/fixtures/{file}.{type}"
//! adapter = "json"
//! wrapper = "Collection"
//! cast_containers = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, FixtureResult};
use crate::fixtures::{COLLECTION, DEFAULT_ADAPTER, DEFAULT_PATH_TEMPLATE};

/// Prefix of environment variables read by [`FixtureSettings::with_env_overrides`].
pub const ENV_PREFIX: &str = "REINHARDT_FIXTURES_";

/// Defaults applied by the fixture facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureSettings {
	/// Root directory of the active library.
	pub base_dir: PathBuf,
	/// Name of the active library.
	pub library: String,
	/// Path template with `{library}`, `{file}` and `{type}` placeholders.
	pub path_template: String,
	/// Default adapter name.
	pub adapter: String,
	/// Default wrapper; `"none"` returns plain data.
	pub wrapper: String,
	/// Whether containers are cast to plain data on save.
	pub cast_containers: bool,
}

impl Default for FixtureSettings {
	fn default() -> Self {
		Self {
			base_dir: default_base_dir(),
			library: "app".to_string(),
			path_template: DEFAULT_PATH_TEMPLATE.to_string(),
			adapter: DEFAULT_ADAPTER.to_string(),
			wrapper: COLLECTION.to_string(),
			cast_containers: true,
		}
	}
}

fn default_base_dir() -> PathBuf {
	std::env::var_os("CARGO_MANIFEST_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| PathBuf::from("."))
}

impl FixtureSettings {
	/// Parses settings from TOML. Missing keys keep their defaults.
	///
	/// # Example
	///
	/// ```
	/// use reinhardt_seeding::settings::FixtureSettings;
	///
	/// let settings = FixtureSettings::from_toml_str("adapter = \"php\"\nwrapper = \"none\"").unwrap();
	/// assert_eq!(settings.adapter, "php");
	/// assert_eq!(settings.library, "app");
	/// ```
	pub fn from_toml_str(content: &str) -> FixtureResult<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Reads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> FixtureResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| {
			FixtureError::Settings(format!("cannot read {}: {}", path.display(), e))
		})?;
		let settings = Self::from_toml_str(&content)?;
		tracing::debug!(path = %path.display(), "loaded fixture settings");
		Ok(settings)
	}

	/// Defaults overridden by the environment.
	pub fn from_env() -> FixtureResult<Self> {
		Self::default().with_env_overrides()
	}

	/// Loads all layers: defaults, the TOML file at `path` if given, then the
	/// environment.
	pub fn load(path: Option<&Path>) -> FixtureResult<Self> {
		let settings = match path {
			Some(path) => Self::from_file(path)?,
			None => Self::default(),
		};
		settings.with_env_overrides()
	}

	/// Applies `REINHARDT_FIXTURES_*` environment variables.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::Settings`] when `REINHARDT_FIXTURES_CAST_CONTAINERS`
	/// is not a boolean.
	pub fn with_env_overrides(self) -> FixtureResult<Self> {
		self.with_overrides_from(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())
	}

	fn with_overrides_from(
		mut self,
		lookup: impl Fn(&str) -> Option<String>,
	) -> FixtureResult<Self> {
		if let Some(base_dir) = lookup("BASE_DIR") {
			self.base_dir = PathBuf::from(base_dir);
		}
		if let Some(library) = lookup("LIBRARY") {
			self.library = library;
		}
		if let Some(template) = lookup("PATH_TEMPLATE") {
			self.path_template = template;
		}
		if let Some(adapter) = lookup("ADAPTER") {
			self.adapter = adapter;
		}
		if let Some(wrapper) = lookup("WRAPPER") {
			self.wrapper = wrapper;
		}
		if let Some(cast) = lookup("CAST_CONTAINERS") {
			self.cast_containers = parse_bool(&cast).ok_or_else(|| {
				FixtureError::Settings(format!(
					"{}CAST_CONTAINERS must be a boolean, got `{}`",
					ENV_PREFIX, cast
				))
			})?;
		}
		Ok(self)
	}
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Some(true),
		"false" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}
