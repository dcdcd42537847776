//! Adapter registry for fixture loading.
//!
//! Maps adapter identifiers to shared [`FixtureAdapter`] instances and
//! memoizes name resolution for the lifetime of the registry.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use reinhardt_utils::capfirst;

use super::FixtureAdapter;
use crate::error::{FixtureError, FixtureResult};

/// Name that selects the registry's default adapter.
pub const DEFAULT_ADAPTER: &str = "default";

/// Process-wide registry with the built-in adapters.
static GLOBAL_REGISTRY: Lazy<Arc<AdapterRegistry>> =
	Lazy::new(|| Arc::new(AdapterRegistry::with_builtin()));

/// Registry of fixture adapters.
///
/// Identifiers are either short names (`"Json"`) or fully-qualified Rust type
/// paths (`"reinhardt_seeding::fixtures::json::JsonAdapter"`). Requested names
/// without a namespace separator are capitalized before lookup, so `"json"`
/// finds the adapter registered as `"Json"`.
///
/// Successful resolutions are cached by the requested name and never evicted:
/// resolving the same name twice yields the same `Arc`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use reinhardt_seeding::fixtures::AdapterRegistry;
///
/// let registry = AdapterRegistry::with_builtin();
/// let first = registry.resolve(Some("json")).unwrap();
/// let second = registry.resolve(Some("json")).unwrap();
/// assert_eq!(first.extension(), "json");
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug)]
pub struct AdapterRegistry {
	adapters: RwLock<IndexMap<String, Arc<dyn FixtureAdapter>>>,
	resolved: RwLock<HashMap<String, Arc<dyn FixtureAdapter>>>,
	default_adapter: String,
}

impl AdapterRegistry {
	/// Creates an empty registry whose default adapter is `"Json"`.
	pub fn new() -> Self {
		Self {
			adapters: RwLock::new(IndexMap::new()),
			resolved: RwLock::new(HashMap::new()),
			default_adapter: "Json".to_string(),
		}
	}

	/// Creates a registry with the adapters enabled by crate features.
	pub fn with_builtin() -> Self {
		let registry = Self::new();
		#[cfg(feature = "json")]
		registry.register(super::JsonAdapter::new());
		#[cfg(feature = "php")]
		registry.register(super::PhpAdapter::new());
		#[cfg(feature = "yaml")]
		registry.register(super::YamlAdapter::new());
		registry
	}

	/// Returns the process-wide registry.
	pub fn global() -> Arc<AdapterRegistry> {
		Arc::clone(&GLOBAL_REGISTRY)
	}

	/// Sets the identifier substituted for `None` and `"default"`.
	pub fn with_default_adapter(mut self, identifier: impl Into<String>) -> Self {
		self.default_adapter = identifier.into();
		self
	}

	/// Returns the identifier used for `None` and `"default"`.
	pub fn default_adapter(&self) -> &str {
		&self.default_adapter
	}

	/// Registers an adapter under its short name and its Rust type path.
	pub fn register<A: FixtureAdapter + 'static>(&self, adapter: A) {
		let adapter: Arc<dyn FixtureAdapter> = Arc::new(adapter);
		let mut adapters = self.adapters.write();
		adapters.insert(adapter.name().to_string(), Arc::clone(&adapter));
		adapters.insert(std::any::type_name::<A>().to_string(), adapter);
	}

	/// Registers a shared adapter under an explicit identifier.
	pub fn register_as(&self, identifier: impl Into<String>, adapter: Arc<dyn FixtureAdapter>) {
		self.adapters.write().insert(identifier.into(), adapter);
	}

	/// Checks whether an adapter is registered under `identifier`.
	pub fn is_registered(&self, identifier: &str) -> bool {
		self.adapters.read().contains_key(identifier)
	}

	/// Returns all registered identifiers in registration order.
	pub fn identifiers(&self) -> Vec<String> {
		self.adapters.read().keys().cloned().collect()
	}

	/// Maps a requested adapter name to the identifier looked up in the registry.
	///
	/// # Example
	///
	/// ```
	/// use reinhardt_seeding::fixtures::AdapterRegistry;
	///
	/// let registry = AdapterRegistry::new();
	/// assert_eq!(registry.identifier_for(None), "Json");
	/// assert_eq!(registry.identifier_for(Some("default")), "Json");
	/// assert_eq!(registry.identifier_for(Some("php")), "Php");
	/// assert_eq!(registry.identifier_for(Some("my_app::Csv")), "my_app::Csv");
	/// ```
	pub fn identifier_for(&self, name: Option<&str>) -> String {
		match name {
			None | Some(DEFAULT_ADAPTER) => self.default_adapter.clone(),
			Some(name) if is_qualified(name) => name.to_string(),
			Some(name) => capfirst(name),
		}
	}

	/// Resolves a requested adapter name to an adapter.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::AdapterNotFound`] with the resolved identifier
	/// when nothing is registered under it.
	pub fn resolve(&self, name: Option<&str>) -> FixtureResult<Arc<dyn FixtureAdapter>> {
		let cache_key = name.unwrap_or(DEFAULT_ADAPTER);
		if let Some(adapter) = self.resolved.read().get(cache_key) {
			tracing::trace!(adapter = cache_key, "adapter resolved from cache");
			return Ok(Arc::clone(adapter));
		}

		let identifier = self.identifier_for(name);
		let adapter = self
			.adapters
			.read()
			.get(&identifier)
			.cloned()
			.ok_or_else(|| FixtureError::AdapterNotFound(identifier.clone()))?;

		tracing::debug!(
			requested = cache_key,
			identifier = %identifier,
			extension = adapter.extension(),
			"resolved fixture adapter"
		);

		// A concurrent resolution may have won; keep the first entry.
		let mut resolved = self.resolved.write();
		let cached = resolved
			.entry(cache_key.to_string())
			.or_insert_with(|| adapter);
		Ok(Arc::clone(cached))
	}
}

impl Default for AdapterRegistry {
	fn default() -> Self {
		Self::new()
	}
}

fn is_qualified(name: &str) -> bool {
	name.contains("::") || name.contains('\\')
}
