//! Convenience re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use reinhardt_seeding::prelude::*;
//!
//! let options = FixtureOptions::new().with_wrapper(Wrapper::None);
//! assert_eq!(options.wrapper, Some(Wrapper::None));
//! ```

// Error types
pub use crate::error::{FixtureError, FixtureResult};

// Fixture types
pub use crate::fixtures::{
	AdapterRegistry, Collection, Container, ContainerRegistry, Fixture, FixtureAdapter,
	FixtureOptions, Fixtures, Libraries, LibraryRoot, Wrapper,
};

// Adapters
#[cfg(feature = "json")]
pub use crate::fixtures::JsonAdapter;
#[cfg(feature = "php")]
pub use crate::fixtures::PhpAdapter;
#[cfg(feature = "yaml")]
pub use crate::fixtures::YamlAdapter;

// Settings
pub use crate::settings::FixtureSettings;
