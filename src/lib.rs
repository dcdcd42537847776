//! # Reinhardt Fixtures
//!
//! Test fixture loading and saving for the Reinhardt framework.
//!
//! Fixtures are static data files kept next to the tests that use them. They
//! are located through a path template, decoded by a format adapter, and
//! optionally wrapped in a cursor-navigable container.
//!
//! ## Feature Flags
//!
//! - `json` (default) - JSON fixtures
//! - `php` (default) - PHP `var_export` array literals, parsed without evaluation
//! - `yaml` - YAML fixtures
//! - `full` - All formats
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use reinhardt_fixtures::prelude::*;
//!
//! // tests/fixtures/models/pirates.json under the crate root
//! let mut pirates = load("models/Pirates", &FixtureOptions::new())?;
//! let ships = pirates.as_container_mut().unwrap();
//! assert_eq!(ships.first().unwrap()["captain"], "Jack Sparrow");
//!
//! // Plain data, PHP format
//! let plain = load("models/Pirates", &FixtureOptions::new().with_adapter("php").without_wrapper())?;
//! assert!(!plain.is_container());
//! # Ok::<(), FixtureError>(())
//! ```

pub mod fixtures;
pub mod utils;

// Re-export commonly used types
pub use reinhardt_seeding::error::{FixtureError, FixtureResult};
pub use reinhardt_seeding::fixtures::{
	AdapterRegistry, Collection, Container, ContainerRegistry, Fixture, FixtureAdapter,
	FixtureOptions, Fixtures, Libraries, LibraryRoot, Wrapper, file, load, save,
};
pub use reinhardt_seeding::settings::FixtureSettings;

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::{
		AdapterRegistry, Collection, Container, ContainerRegistry, Fixture, FixtureAdapter,
		FixtureError, FixtureOptions, FixtureResult, FixtureSettings, Fixtures, Libraries,
		LibraryRoot, Wrapper, file, load, save,
	};

	pub use reinhardt_utils::{capfirst, interpolate, slugify};
}
