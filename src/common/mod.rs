//! Shared plumbing: errors, XML escaping, namespaces and byte decoding.

pub mod bom;
pub mod error;
pub mod namespace;
pub mod xml;

pub use error::{Error, Result};
pub use namespace::{Namespace, NamespaceScope};
