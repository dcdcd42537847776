//! Fixture loading and saving module.
//!
//! This module provides access to fixture adapters, path resolution,
//! containers and the load/save facade.
//!
//! # Examples
//!
//! ```rust,no_run
//! use reinhardt_fixtures::fixtures::{FixtureOptions, Fixtures, Libraries};
//!
//! let fixtures = Fixtures::new(Libraries::new("app", "/srv/app"));
//! let path = fixtures.file("models/Pirates", &FixtureOptions::new()).unwrap();
//! ```

pub use reinhardt_seeding::fixtures::*;
pub use reinhardt_seeding::settings::{ENV_PREFIX, FixtureSettings};
