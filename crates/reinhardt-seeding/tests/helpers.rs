//! Test helpers for reinhardt-seeding tests.
//!
//! This module provides fixture facades pointed at the committed test data
//! and at scratch directories, plus adapters for exercising the registry.

#[path = "helpers/test_data.rs"]
pub mod test_data;
