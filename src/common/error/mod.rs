//! Unified error types for the converter.
//!
//! This module provides the error type shared by the parser, the chapter
//! assembly layer and the manifest loader.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
