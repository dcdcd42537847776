//! Test fixture management for the Reinhardt framework.
//!
//! This crate loads static test data from fixture files, optionally wraps it in
//! cursor-navigable containers, and writes data back to disk:
//!
//! - **Adapters**: JSON, PHP `var_export` literals and YAML, behind one trait
//! - **Path templates**: `{library}/tests/fixtures/{file}.{type}` by default
//! - **Containers**: ordered collections with `first`/`next`/`prev`/`rewind`
//! - **Settings**: TOML file plus `REINHARDT_FIXTURES_*` environment overrides
//!
//! # Features
//!
//! - `json` - JSON fixture format support (enabled by default)
//! - `php` - PHP array literal support (enabled by default)
//! - `yaml` - YAML fixture format support
//! - `full` - All features enabled
//!
//! # Quick Start
//!
//! Create a fixture file (`tests/fixtures/models/pirates.json`):
//!
//! ```json
//! {
//!   "pearl": {
//!     "name": "The Black Pearl",
//!     "captain": "Jack Sparrow"
//!   }
//! }
//! ```
//!
//! Load it from a test:
//!
//! ```no_run
//! use reinhardt_seeding::prelude::*;
//!
//! let fixtures = Fixtures::new(Libraries::new("app", env!("CARGO_MANIFEST_DIR")));
//! let pirates = fixtures.load("models/Pirates", &FixtureOptions::new())?;
//! let ships = pirates.downcast_ref::<Collection>().unwrap();
//! assert_eq!(ships["pearl"]["captain"], "Jack Sparrow");
//! # Ok::<(), FixtureError>(())
//! ```
//!
//! Save data back, here as a PHP literal:
//!
//! ```no_run
//! use reinhardt_seeding::prelude::*;
//! use serde_json::json;
//!
//! let fixtures = Fixtures::default();
//! let data = Fixture::Data(json!({"pearl": {"name": "The Black Pearl"}}));
//! let written = fixtures.save("models/Pirates", &data, &FixtureOptions::new().with_adapter("php"))?;
//! assert!(written);
//! # Ok::<(), FixtureError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod fixtures;
pub mod prelude;
pub mod settings;

// Re-export commonly used types at crate root
pub use error::{FixtureError, FixtureResult};
pub use fixtures::{
	AdapterRegistry, Collection, Container, Fixture, FixtureAdapter, FixtureOptions, Fixtures,
	Libraries, LibraryRoot, Wrapper, file, load, save,
};
pub use settings::FixtureSettings;
