//! Fixture loading and saving.
//!
//! [`Fixtures`] ties the pieces together: it resolves the adapter, computes the
//! fixture path, checks the file, decodes it and optionally wraps the result in
//! a container. The free functions [`load`], [`save`] and [`file`] use a
//! process-wide facade configured from the environment.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;

use super::container::{Collection, Container, ContainerRegistry};
use super::options::{FixtureOptions, Wrapper};
use super::path::{Libraries, LibraryRoot, resolve_path};
use super::registry::AdapterRegistry;
use super::FixtureAdapter;
use crate::error::{FixtureError, FixtureResult};
use crate::settings::FixtureSettings;

/// Mode of directories created by [`Fixtures::save`].
#[cfg(unix)]
const DIRECTORY_MODE: u32 = 0o775;

static GLOBAL_FIXTURES: Lazy<Fixtures> = Lazy::new(|| {
	let settings = FixtureSettings::from_env().unwrap_or_else(|error| {
		tracing::warn!(%error, "ignoring invalid fixture environment settings");
		FixtureSettings::default()
	});
	Fixtures::from_settings(&settings)
});

/// Result of [`Fixtures::load`] and input of [`Fixtures::save`].
#[derive(Debug)]
pub enum Fixture {
	/// Decoded data, returned when wrapping is disabled.
	Data(Value),
	/// Data wrapped in a container.
	Container(Box<dyn Container>),
}

impl Fixture {
	/// Checks whether the fixture is wrapped in a container.
	pub fn is_container(&self) -> bool {
		matches!(self, Self::Container(_))
	}

	/// Returns the plain data, if the fixture is not wrapped.
	pub fn as_data(&self) -> Option<&Value> {
		match self {
			Self::Data(data) => Some(data),
			Self::Container(_) => None,
		}
	}

	/// Returns the container, if the fixture is wrapped.
	pub fn as_container(&self) -> Option<&dyn Container> {
		match self {
			Self::Data(_) => None,
			Self::Container(container) => Some(container.as_ref()),
		}
	}

	/// Returns the container mutably, for cursor navigation.
	pub fn as_container_mut(&mut self) -> Option<&mut (dyn Container + 'static)> {
		match self {
			Self::Data(_) => None,
			Self::Container(container) => Some(container.as_mut()),
		}
	}

	/// Downcasts the container to a concrete type.
	pub fn downcast_ref<C: Container + 'static>(&self) -> Option<&C> {
		self.as_container()
			.and_then(|container| container.as_any().downcast_ref::<C>())
	}

	/// Converts the fixture to plain data, unwrapping containers.
	pub fn into_data(self) -> Value {
		match self {
			Self::Data(data) => data,
			Self::Container(container) => container.to_plain_data(),
		}
	}
}

impl From<Value> for Fixture {
	fn from(data: Value) -> Self {
		Self::Data(data)
	}
}

impl From<Box<dyn Container>> for Fixture {
	fn from(container: Box<dyn Container>) -> Self {
		Self::Container(container)
	}
}

impl From<Collection> for Fixture {
	fn from(collection: Collection) -> Self {
		Self::Container(Box::new(collection))
	}
}

/// Loads, saves and locates fixture files.
///
/// # Example
///
/// ```no_run
/// use reinhardt_seeding::fixtures::{Container, FixtureOptions, Fixtures, Libraries};
///
/// let fixtures = Fixtures::new(Libraries::new("app", "/srv/app"));
///
/// // Reads /srv/app/tests/fixtures/models/pirates.json
/// let mut pirates = fixtures.load("models/Pirates", &FixtureOptions::new())?;
/// let ships = pirates.as_container_mut().unwrap();
/// assert_eq!(ships.first().unwrap()["name"], "The Black Pearl");
/// # Ok::<(), reinhardt_seeding::error::FixtureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Fixtures {
	adapters: Arc<AdapterRegistry>,
	containers: Arc<ContainerRegistry>,
	libraries: Libraries,
	defaults: FixtureOptions,
}

impl Fixtures {
	/// Creates a facade using the global registries and built-in defaults.
	pub fn new(libraries: Libraries) -> Self {
		Self {
			adapters: AdapterRegistry::global(),
			containers: ContainerRegistry::global(),
			libraries,
			defaults: FixtureOptions::defaults(),
		}
	}

	/// Creates a facade from settings.
	pub fn from_settings(settings: &FixtureSettings) -> Self {
		let libraries = Libraries::new(settings.library.clone(), settings.base_dir.clone());
		Self::new(libraries).with_defaults(FixtureOptions {
			adapter: Some(settings.adapter.clone()),
			adapter_instance: None,
			wrapper: Some(Wrapper::parse(&settings.wrapper)),
			cast_containers: Some(settings.cast_containers),
			library: Some(LibraryRoot::Active),
			path: Some(settings.path_template.clone()),
		})
	}

	/// Returns the process-wide facade.
	pub fn global() -> &'static Fixtures {
		&GLOBAL_FIXTURES
	}

	/// Replaces the adapter registry.
	pub fn with_adapters(mut self, adapters: Arc<AdapterRegistry>) -> Self {
		self.adapters = adapters;
		self
	}

	/// Replaces the container registry.
	pub fn with_containers(mut self, containers: Arc<ContainerRegistry>) -> Self {
		self.containers = containers;
		self
	}

	/// Sets facade defaults. Unset fields keep the built-in defaults.
	pub fn with_defaults(mut self, defaults: FixtureOptions) -> Self {
		self.defaults = defaults.merge(&FixtureOptions::defaults());
		self
	}

	/// Returns the library registry.
	pub fn libraries(&self) -> &Libraries {
		&self.libraries
	}

	/// Returns the library registry mutably.
	pub fn libraries_mut(&mut self) -> &mut Libraries {
		&mut self.libraries
	}

	/// Returns the adapter registry.
	pub fn adapters(&self) -> &AdapterRegistry {
		&self.adapters
	}

	/// Returns the container registry.
	pub fn containers(&self) -> &ContainerRegistry {
		&self.containers
	}

	/// Returns the facade defaults.
	pub fn defaults(&self) -> &FixtureOptions {
		&self.defaults
	}

	/// Loads the fixture `name`.
	///
	/// # Errors
	///
	/// - [`FixtureError::AdapterNotFound`] before any filesystem access
	/// - [`FixtureError::LibraryNotFound`] for an unknown library
	/// - [`FixtureError::FileAccess`] if the file is missing, a directory or unreadable
	/// - [`FixtureError::InvalidName`] for a name with an unusable segment
	/// - [`FixtureError::Parse`] from the adapter
	/// - [`FixtureError::UnsupportedContainer`] for an unknown wrapper
	pub fn load(&self, name: &str, options: &FixtureOptions) -> FixtureResult<Fixture> {
		let options = options.merge(&self.defaults);
		let adapter = self.adapter_for(&options)?;
		let path = self.path_for(name, &options, adapter.as_ref())?;

		ensure_readable(&path)?;
		let data = adapter.parse(&path)?;
		tracing::debug!(fixture = name, path = %path.display(), "loaded fixture");

		match options.wrapper.unwrap_or_default() {
			Wrapper::None => Ok(Fixture::Data(data)),
			Wrapper::Named(wrapper) => self
				.containers
				.create(&wrapper, data)
				.map(Fixture::Container),
		}
	}

	/// Saves `fixture` as the fixture `name`.
	///
	/// Returns `false` without touching the file when the data is empty.
	///
	/// An adapter that encodes non-empty data to zero bytes still has its
	/// output written, so an existing fixture is truncated to an empty file
	/// and `false` is returned.
	///
	/// # Errors
	///
	/// - [`FixtureError::AdapterNotFound`] for an unknown adapter
	/// - [`FixtureError::InvalidName`] for a name with an unusable segment
	/// - [`FixtureError::FileAccess`] if the directory cannot be created or the
	///   target is a directory or read-only
	/// - [`FixtureError::Encode`] from the adapter
	pub fn save(
		&self,
		name: &str,
		fixture: &Fixture,
		options: &FixtureOptions,
	) -> FixtureResult<bool> {
		let options = options.merge(&self.defaults);
		let adapter = self.adapter_for(&options)?;
		let path = self.path_for(name, &options, adapter.as_ref())?;

		if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			create_directory(parent)?;
		}
		ensure_writable(&path)?;

		let cast = options.cast_containers.unwrap_or(true);
		let exported;
		let data = match fixture {
			Fixture::Data(data) => data,
			Fixture::Container(container) => {
				exported = if cast {
					container.to_plain_data()
				} else {
					container.export_state()
				};
				&exported
			}
		};

		if is_empty(data) {
			tracing::warn!(fixture = name, path = %path.display(), "skipping save of empty fixture");
			return Ok(false);
		}

		let bytes = adapter.encode(data)?;
		fs::write(&path, &bytes).map_err(|e| FixtureError::file_access(&path, e.to_string()))?;
		tracing::debug!(
			fixture = name,
			path = %path.display(),
			bytes = bytes.len(),
			"saved fixture"
		);
		Ok(!bytes.is_empty())
	}

	/// Returns the path the fixture `name` resolves to, without touching the
	/// filesystem.
	pub fn file(&self, name: &str, options: &FixtureOptions) -> FixtureResult<PathBuf> {
		let options = options.merge(&self.defaults);
		let adapter = self.adapter_for(&options)?;
		self.path_for(name, &options, adapter.as_ref())
	}

	fn adapter_for(&self, options: &FixtureOptions) -> FixtureResult<Arc<dyn FixtureAdapter>> {
		match &options.adapter_instance {
			Some(adapter) => Ok(Arc::clone(adapter)),
			None => self.adapters.resolve(options.adapter.as_deref()),
		}
	}

	fn path_for(
		&self,
		name: &str,
		options: &FixtureOptions,
		adapter: &dyn FixtureAdapter,
	) -> FixtureResult<PathBuf> {
		let library = options.library.clone().unwrap_or_default();
		let root = self.libraries.root_for(&library)?;
		let template = options
			.path
			.as_deref()
			.unwrap_or(super::DEFAULT_PATH_TEMPLATE);
		let path = resolve_path(name, template, &root, adapter.extension())?;
		tracing::trace!(fixture = name, path = %path.display(), "resolved fixture path");
		Ok(path)
	}
}

impl Default for Fixtures {
	fn default() -> Self {
		Self::from_settings(&FixtureSettings::default())
	}
}

fn ensure_readable(path: &Path) -> FixtureResult<()> {
	let metadata = fs::metadata(path)
		.map_err(|_| FixtureError::file_access(path, "file does not exist"))?;
	if metadata.is_dir() {
		return Err(FixtureError::file_access(path, "path is a directory"));
	}
	fs::File::open(path)
		.map(drop)
		.map_err(|e| FixtureError::file_access(path, e.to_string()))
}

fn ensure_writable(path: &Path) -> FixtureResult<()> {
	let Ok(metadata) = fs::metadata(path) else {
		return Ok(());
	};
	if metadata.is_dir() {
		return Err(FixtureError::file_access(path, "path is a directory"));
	}
	if metadata.permissions().readonly() {
		return Err(FixtureError::file_access(path, "file is not writable"));
	}
	Ok(())
}

fn create_directory(path: &Path) -> FixtureResult<()> {
	if path.is_dir() {
		return Ok(());
	}
	let mut builder = fs::DirBuilder::new();
	builder.recursive(true);
	#[cfg(unix)]
	{
		use std::os::unix::fs::DirBuilderExt;
		builder.mode(DIRECTORY_MODE);
	}
	builder
		.create(path)
		.map_err(|e| FixtureError::file_access(path, format!("cannot create directory: {}", e)))?;
	tracing::debug!(path = %path.display(), "created fixture directory");
	Ok(())
}

fn is_empty(data: &Value) -> bool {
	match data {
		Value::Null => true,
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
		_ => false,
	}
}

/// Loads a fixture through the process-wide facade.
pub fn load(name: &str, options: &FixtureOptions) -> FixtureResult<Fixture> {
	Fixtures::global().load(name, options)
}

/// Saves a fixture through the process-wide facade.
pub fn save(name: &str, fixture: &Fixture, options: &FixtureOptions) -> FixtureResult<bool> {
	Fixtures::global().save(name, fixture, options)
}

/// Resolves a fixture path through the process-wide facade.
pub fn file(name: &str, options: &FixtureOptions) -> FixtureResult<PathBuf> {
	Fixtures::global().file(name, options)
}
