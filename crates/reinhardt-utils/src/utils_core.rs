//! Utility functions core

pub mod encoding;
pub mod text;

pub use encoding::*;
pub use text::*;
