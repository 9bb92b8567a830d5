//! XML character-data helpers shared by the parser and the PreTeXt emitters.

mod escape;

pub use escape::{escape_attribute, escape_text, resolve_entity, unescape_xml};
