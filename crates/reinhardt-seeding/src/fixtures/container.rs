//! Containers that wrap loaded fixture data.
//!
//! A container holds the decoded entries of a fixture together with a cursor,
//! so tests can walk records in file order or look them up by key.

use std::any::Any;
use std::fmt::Debug;
use std::ops::Index;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::{Map, Value, json};

use crate::error::{FixtureError, FixtureResult};

/// Short name of the built-in [`Collection`] container.
pub const COLLECTION: &str = "Collection";

/// Cursor-navigable wrapper around fixture entries.
///
/// Cursor moves return the entry the cursor lands on. Moving past either end
/// leaves the cursor invalid: [`current`](Container::current) returns `None`
/// until [`first`](Container::first) or [`rewind`](Container::rewind) is called.
pub trait Container: Debug + Send + Sync {
	/// Name the container is registered under.
	fn type_name(&self) -> &str;

	/// Number of entries.
	fn len(&self) -> usize;

	/// Checks whether the container has no entries.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Moves the cursor to the first entry and returns it.
	fn first(&mut self) -> Option<&Value>;

	/// Returns the entry under the cursor.
	fn current(&self) -> Option<&Value>;

	/// Returns the key of the entry under the cursor.
	fn key(&self) -> Option<&str>;

	/// Advances the cursor and returns the new current entry.
	fn next(&mut self) -> Option<&Value>;

	/// Moves the cursor back and returns the new current entry.
	fn prev(&mut self) -> Option<&Value>;

	/// Resets the cursor to the first entry and returns it.
	fn rewind(&mut self) -> Option<&Value> {
		self.first()
	}

	/// Looks an entry up by key.
	fn get(&self, key: &str) -> Option<&Value>;

	/// Entry keys in order.
	fn keys(&self) -> Vec<&str>;

	/// Converts the container back to the plain data it was built from.
	fn to_plain_data(&self) -> Value;

	/// Serializable snapshot used when containers are saved without casting.
	fn export_state(&self) -> Value {
		json!({
			"type": self.type_name(),
			"data": self.to_plain_data(),
		})
	}

	/// Upcast for downcasting to the concrete container type.
	fn as_any(&self) -> &dyn Any;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
	List,
	Map,
}

/// Generic ordered container.
///
/// Object data keeps its keys; array data is keyed `"0"` to `"n-1"`. The
/// original shape is remembered so [`to_plain_data`](Container::to_plain_data)
/// gives back an array for array input. A scalar becomes a one-entry list and
/// `null` an empty one.
///
/// # Example
///
/// ```
/// use reinhardt_seeding::fixtures::{Collection, Container};
/// use serde_json::json;
///
/// let mut posts = Collection::from_value(json!({
///     "post1": {"title": "First"},
///     "post2": {"title": "Second"},
/// }));
///
/// assert_eq!(posts.first(), Some(&json!({"title": "First"})));
/// assert_eq!(posts.next(), Some(&json!({"title": "Second"})));
/// assert_eq!(posts.next(), None);
/// assert_eq!(posts["post1"]["title"], "First");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
	entries: IndexMap<String, Value>,
	shape: Shape,
	cursor: Option<usize>,
}

impl Collection {
	/// Creates an empty map-shaped collection.
	pub fn new() -> Self {
		Self {
			entries: IndexMap::new(),
			shape: Shape::Map,
			cursor: None,
		}
	}

	/// Builds a collection from decoded fixture data.
	pub fn from_value(data: Value) -> Self {
		let (entries, shape): (IndexMap<String, Value>, Shape) = match data {
			Value::Object(map) => (map.into_iter().collect(), Shape::Map),
			Value::Array(items) => (
				items
					.into_iter()
					.enumerate()
					.map(|(index, item)| (index.to_string(), item))
					.collect(),
				Shape::List,
			),
			Value::Null => (IndexMap::new(), Shape::List),
			scalar => (IndexMap::from([("0".to_string(), scalar)]), Shape::List),
		};
		let cursor = if entries.is_empty() { None } else { Some(0) };
		Self {
			entries,
			shape,
			cursor,
		}
	}

	/// Adds or replaces an entry. The collection becomes map-shaped.
	pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
		self.shape = Shape::Map;
		let previous = self.entries.insert(key.into(), value);
		if self.cursor.is_none() && self.entries.len() == 1 {
			self.cursor = Some(0);
		}
		previous
	}

	/// Iterates over entries in order.
	pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
		self.entries.iter()
	}

	fn entry_at(&self, position: Option<usize>) -> Option<&Value> {
		position.and_then(|index| self.entries.get_index(index).map(|(_, value)| value))
	}
}

impl Default for Collection {
	fn default() -> Self {
		Self::new()
	}
}

impl Container for Collection {
	fn type_name(&self) -> &str {
		COLLECTION
	}

	fn len(&self) -> usize {
		self.entries.len()
	}

	fn first(&mut self) -> Option<&Value> {
		self.cursor = if self.entries.is_empty() {
			None
		} else {
			Some(0)
		};
		self.entry_at(self.cursor)
	}

	fn current(&self) -> Option<&Value> {
		self.entry_at(self.cursor)
	}

	fn key(&self) -> Option<&str> {
		self.cursor
			.and_then(|index| self.entries.get_index(index))
			.map(|(key, _)| key.as_str())
	}

	fn next(&mut self) -> Option<&Value> {
		self.cursor = self
			.cursor
			.map(|index| index + 1)
			.filter(|&index| index < self.entries.len());
		self.entry_at(self.cursor)
	}

	fn prev(&mut self) -> Option<&Value> {
		self.cursor = self.cursor.and_then(|index| index.checked_sub(1));
		self.entry_at(self.cursor)
	}

	fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	fn keys(&self) -> Vec<&str> {
		self.entries.keys().map(String::as_str).collect()
	}

	fn to_plain_data(&self) -> Value {
		match self.shape {
			Shape::List => Value::Array(self.entries.values().cloned().collect()),
			Shape::Map => Value::Object(
				self.entries
					.iter()
					.map(|(key, value)| (key.clone(), value.clone()))
					.collect::<Map<String, Value>>(),
			),
		}
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

impl Index<&str> for Collection {
	type Output = Value;

	/// Returns `Value::Null` for missing keys, like indexing a `Value`.
	fn index(&self, key: &str) -> &Value {
		static NULL: Value = Value::Null;
		self.entries.get(key).unwrap_or(&NULL)
	}
}

impl<'a> IntoIterator for &'a Collection {
	type Item = (&'a String, &'a Value);
	type IntoIter = indexmap::map::Iter<'a, String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl IntoIterator for Collection {
	type Item = (String, Value);
	type IntoIter = indexmap::map::IntoIter<String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl From<Value> for Collection {
	fn from(data: Value) -> Self {
		Self::from_value(data)
	}
}

/// Builds a container from decoded fixture data.
pub type ContainerFactory = Arc<dyn Fn(Value) -> Box<dyn Container> + Send + Sync>;

static GLOBAL_CONTAINERS: Lazy<Arc<ContainerRegistry>> =
	Lazy::new(|| Arc::new(ContainerRegistry::with_builtin()));

/// Registry of container types available as load wrappers.
///
/// Each type is registered under a short name and its fully-qualified Rust
/// type path. Lookup matches the requested name exactly; a namespaced name
/// that is not itself registered is unsupported.
///
/// # Example
///
/// ```
/// use reinhardt_seeding::fixtures::ContainerRegistry;
/// use serde_json::json;
///
/// let registry = ContainerRegistry::with_builtin();
/// let container = registry.create("Collection", json!([1, 2])).unwrap();
/// assert_eq!(container.len(), 2);
/// assert!(registry.create("Foobar", json!([])).is_err());
/// ```
pub struct ContainerRegistry {
	factories: RwLock<IndexMap<String, ContainerFactory>>,
}

impl ContainerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			factories: RwLock::new(IndexMap::new()),
		}
	}

	/// Creates a registry with [`Collection`] registered.
	pub fn with_builtin() -> Self {
		let registry = Self::new();
		registry.register::<Collection, _>(COLLECTION, |data| Box::new(Collection::from_value(data)));
		registry
	}

	/// Returns the process-wide registry.
	pub fn global() -> Arc<ContainerRegistry> {
		Arc::clone(&GLOBAL_CONTAINERS)
	}

	/// Registers a container type under `short_name` and its Rust type path.
	pub fn register<C, F>(&self, short_name: impl Into<String>, factory: F)
	where
		C: Container + 'static,
		F: Fn(Value) -> Box<dyn Container> + Send + Sync + 'static,
	{
		let factory: ContainerFactory = Arc::new(factory);
		let mut factories = self.factories.write();
		factories.insert(short_name.into(), Arc::clone(&factory));
		factories.insert(std::any::type_name::<C>().to_string(), factory);
	}

	/// Checks whether `name` resolves to a registered container type.
	pub fn is_registered(&self, name: &str) -> bool {
		self.lookup(name).is_some()
	}

	/// Returns all registered names in registration order.
	pub fn names(&self) -> Vec<String> {
		self.factories.read().keys().cloned().collect()
	}

	/// Wraps `data` in the container registered under `name`.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::UnsupportedContainer`] when `name` matches no
	/// registered type.
	pub fn create(&self, name: &str, data: Value) -> FixtureResult<Box<dyn Container>> {
		let factory = self
			.lookup(name)
			.ok_or_else(|| FixtureError::UnsupportedContainer(name.to_string()))?;
		tracing::debug!(container = name, "wrapping fixture data");
		Ok(factory(data))
	}

	fn lookup(&self, name: &str) -> Option<ContainerFactory> {
		let factories = self.factories.read();
		factories.get(name).cloned()
	}
}

impl Default for ContainerRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl Debug for ContainerRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ContainerRegistry")
			.field("names", &self.names())
			.finish()
	}
}
