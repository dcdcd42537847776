//! Text utilities module.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_fixtures::utils::slugify;
//!
//! assert_eq!(slugify("Black Pearl"), "black-pearl");
//! ```

pub use reinhardt_utils::utils_core::*;
