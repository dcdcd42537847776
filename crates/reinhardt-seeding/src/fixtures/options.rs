//! Options for loading and saving fixtures.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::FixtureAdapter;
use super::container::COLLECTION;
use super::path::{DEFAULT_PATH_TEMPLATE, LibraryRoot};
use super::registry::DEFAULT_ADAPTER;

/// Wrapper applied to loaded data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wrapper {
	/// Return the decoded data as is.
	None,
	/// Wrap the data in the container registered under this name.
	Named(String),
}

impl Wrapper {
	/// Shorthand for [`Wrapper::Named`].
	pub fn named(name: impl Into<String>) -> Self {
		Self::Named(name.into())
	}

	/// Parses a setting value, where `"none"` (any case) or an empty string
	/// disables wrapping.
	///
	/// # Example
	///
	/// ```
	/// use reinhardt_seeding::fixtures::Wrapper;
	///
	/// assert_eq!(Wrapper::parse("none"), Wrapper::None);
	/// assert_eq!(Wrapper::parse("Collection"), Wrapper::named("Collection"));
	/// ```
	pub fn parse(value: &str) -> Self {
		let value = value.trim();
		if value.is_empty() || value.eq_ignore_ascii_case("none") {
			Self::None
		} else {
			Self::Named(value.to_string())
		}
	}
}

impl Default for Wrapper {
	fn default() -> Self {
		Self::Named(COLLECTION.to_string())
	}
}

impl fmt::Display for Wrapper {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::None => f.write_str("none"),
			Self::Named(name) => f.write_str(name),
		}
	}
}

/// Per-call fixture options.
///
/// Every field is optional. Options passed to a call are merged over the
/// defaults of the [`Fixtures`](super::Fixtures) facade: set fields win,
/// unset fields fall back.
///
/// # Example
///
/// ```
/// use reinhardt_seeding::fixtures::{FixtureOptions, LibraryRoot, Wrapper};
///
/// let options = FixtureOptions::new()
///     .with_adapter("php")
///     .with_wrapper(Wrapper::None)
///     .with_library(LibraryRoot::path("/srv/app"));
///
/// let merged = options.merge(&FixtureOptions::defaults());
/// assert_eq!(merged.adapter.as_deref(), Some("php"));
/// assert_eq!(merged.cast_containers, Some(true));
/// ```
#[derive(Clone, Default)]
pub struct FixtureOptions {
	/// Adapter name; `"default"` selects the registry default.
	pub adapter: Option<String>,
	/// Pre-resolved adapter that bypasses the registry.
	pub adapter_instance: Option<Arc<dyn FixtureAdapter>>,
	/// Container applied by `load`.
	pub wrapper: Option<Wrapper>,
	/// Whether `save` converts containers to plain data before encoding.
	pub cast_containers: Option<bool>,
	/// Library substituted for `{library}`.
	pub library: Option<LibraryRoot>,
	/// Path template.
	pub path: Option<String>,
}

impl FixtureOptions {
	/// Creates options with nothing set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates options with every field set to its built-in default.
	pub fn defaults() -> Self {
		Self {
			adapter: Some(DEFAULT_ADAPTER.to_string()),
			adapter_instance: None,
			wrapper: Some(Wrapper::default()),
			cast_containers: Some(true),
			library: Some(LibraryRoot::Active),
			path: Some(DEFAULT_PATH_TEMPLATE.to_string()),
		}
	}

	/// Sets the adapter name.
	pub fn with_adapter(mut self, adapter: impl Into<String>) -> Self {
		self.adapter = Some(adapter.into());
		self
	}

	/// Sets a pre-resolved adapter.
	pub fn with_adapter_instance(mut self, adapter: Arc<dyn FixtureAdapter>) -> Self {
		self.adapter_instance = Some(adapter);
		self
	}

	/// Sets the load wrapper.
	pub fn with_wrapper(mut self, wrapper: Wrapper) -> Self {
		self.wrapper = Some(wrapper);
		self
	}

	/// Disables wrapping so `load` returns plain data.
	pub fn without_wrapper(self) -> Self {
		self.with_wrapper(Wrapper::None)
	}

	/// Sets whether containers are cast to plain data on save.
	pub fn with_cast_containers(mut self, cast: bool) -> Self {
		self.cast_containers = Some(cast);
		self
	}

	/// Sets the library root.
	pub fn with_library(mut self, library: impl Into<LibraryRoot>) -> Self {
		self.library = Some(library.into());
		self
	}

	/// Uses `root` verbatim as the library directory.
	pub fn with_library_path(self, root: impl Into<PathBuf>) -> Self {
		self.with_library(LibraryRoot::Path(root.into()))
	}

	/// Sets the path template.
	pub fn with_path(mut self, template: impl Into<String>) -> Self {
		self.path = Some(template.into());
		self
	}

	/// Returns these options with unset fields taken from `defaults`.
	pub fn merge(&self, defaults: &FixtureOptions) -> FixtureOptions {
		FixtureOptions {
			adapter: self.adapter.clone().or_else(|| defaults.adapter.clone()),
			adapter_instance: self
				.adapter_instance
				.clone()
				.or_else(|| defaults.adapter_instance.clone()),
			wrapper: self.wrapper.clone().or_else(|| defaults.wrapper.clone()),
			cast_containers: self.cast_containers.or(defaults.cast_containers),
			library: self.library.clone().or_else(|| defaults.library.clone()),
			path: self.path.clone().or_else(|| defaults.path.clone()),
		}
	}
}

impl fmt::Debug for FixtureOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FixtureOptions")
			.field("adapter", &self.adapter)
			.field(
				"adapter_instance",
				&self.adapter_instance.as_ref().map(|adapter| adapter.name()),
			)
			.field("wrapper", &self.wrapper)
			.field("cast_containers", &self.cast_containers)
			.field("library", &self.library)
			.field("path", &self.path)
			.finish()
	}
}
