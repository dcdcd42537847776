//! Text utilities shared by the Reinhardt fixture crates.
//!
//! - [`utils_core::encoding`] - slug generation for file and path segments
//! - [`utils_core::text`] - capitalization and placeholder interpolation

pub mod utils_core;

pub use utils_core::{capfirst, interpolate, slugify};
