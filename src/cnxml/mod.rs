//! CNXML source model: parsing, tree queries and vocabulary classification.

mod document;
pub mod node;
pub mod parser;
pub mod vocabulary;

pub use document::CnxmlDocument;
pub use node::{QName, SourceNode};
pub use parser::{parse_bytes, parse_document};
pub use vocabulary::{BlockKind, ElementClass, block_kind, classify};
