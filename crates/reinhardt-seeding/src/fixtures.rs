//! Fixture loading, saving and path resolution.
//!
//! # Architecture
//!
//! - [`FixtureAdapter`] - Parser/encoder for one file format
//! - [`AdapterRegistry`] - Resolves adapter names, memoizing results
//! - [`resolve_path`] - Builds fixture paths from a template
//! - [`Container`] / [`Collection`] - Cursor-navigable wrappers for loaded data
//! - [`Fixtures`] - Facade with `load`, `save` and `file`

pub mod adapter;
pub mod container;
#[cfg(feature = "json")]
pub mod json;
pub mod loader;
pub mod options;
pub mod path;
#[cfg(feature = "php")]
pub mod php;
pub mod registry;
#[cfg(feature = "yaml")]
pub mod yaml;

pub use adapter::FixtureAdapter;
pub use container::{COLLECTION, Collection, Container, ContainerFactory, ContainerRegistry};
#[cfg(feature = "json")]
pub use json::JsonAdapter;
pub use loader::{Fixture, Fixtures, file, load, save};
pub use options::{FixtureOptions, Wrapper};
pub use path::{DEFAULT_PATH_TEMPLATE, Libraries, LibraryRoot, fixture_slug, resolve_path};
#[cfg(feature = "php")]
pub use php::PhpAdapter;
pub use registry::{AdapterRegistry, DEFAULT_ADAPTER};
#[cfg(feature = "yaml")]
pub use yaml::YamlAdapter;
