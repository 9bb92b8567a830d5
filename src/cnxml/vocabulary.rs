//! Fixed classification of the CNXML element vocabulary.
//!
//! Adding a source tag means adding one entry here, and a new emitter only
//! when the tag is structurally novel.

use crate::cnxml::node::SourceNode;
use phf::phf_map;

/// Content model of a source element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementClass {
    /// Renders to a single target inline tag
    InlineSpan,
    /// Renders to one or more standalone target blocks
    BlockContainer,
    /// Holds other blocks (sections, notes, exercise halves)
    StructuralContainer,
    /// MathML island handed to the math rewriter
    LeafMath,
    /// Wrapper with no target counterpart; its children render in place
    OpaquePassthrough,
}

/// Emitter selected for a direct child of a structural container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    List,
    Table,
    Figure,
    Note,
    Example,
    Exercise,
    Section,
    Equation,
    Quote,
    Preformat,
    Code,
    Media,
}

static CLASSES: phf::Map<&'static str, ElementClass> = phf_map! {
    // Inline markup
    "emphasis" => ElementClass::InlineSpan,
    "term" => ElementClass::InlineSpan,
    "link" => ElementClass::InlineSpan,
    "cnxn" => ElementClass::InlineSpan,
    "code" => ElementClass::InlineSpan,
    "sub" => ElementClass::InlineSpan,
    "sup" => ElementClass::InlineSpan,
    "quote" => ElementClass::InlineSpan,
    "foreign" => ElementClass::InlineSpan,
    "footnote" => ElementClass::InlineSpan,
    "cite" => ElementClass::InlineSpan,
    "cite-title" => ElementClass::InlineSpan,
    "newline" => ElementClass::InlineSpan,
    "space" => ElementClass::InlineSpan,
    // Blocks
    "para" => ElementClass::BlockContainer,
    "list" => ElementClass::BlockContainer,
    "table" => ElementClass::BlockContainer,
    "figure" => ElementClass::BlockContainer,
    "subfigure" => ElementClass::BlockContainer,
    "equation" => ElementClass::BlockContainer,
    "media" => ElementClass::BlockContainer,
    "image" => ElementClass::BlockContainer,
    "preformat" => ElementClass::BlockContainer,
    // Containers of blocks
    "content" => ElementClass::StructuralContainer,
    "section" => ElementClass::StructuralContainer,
    "note" => ElementClass::StructuralContainer,
    "example" => ElementClass::StructuralContainer,
    "exercise" => ElementClass::StructuralContainer,
    "problem" => ElementClass::StructuralContainer,
    "solution" => ElementClass::StructuralContainer,
    "commentary" => ElementClass::StructuralContainer,
    "glossary" => ElementClass::StructuralContainer,
    // Wrappers
    "span" => ElementClass::OpaquePassthrough,
    "div" => ElementClass::OpaquePassthrough,
    "label" => ElementClass::OpaquePassthrough,
};

static BLOCKS: phf::Map<&'static str, BlockKind> = phf_map! {
    "para" => BlockKind::Paragraph,
    "list" => BlockKind::List,
    "table" => BlockKind::Table,
    "figure" => BlockKind::Figure,
    "note" => BlockKind::Note,
    "example" => BlockKind::Example,
    "exercise" => BlockKind::Exercise,
    "section" => BlockKind::Section,
    "equation" => BlockKind::Equation,
    "quote" => BlockKind::Quote,
    "preformat" => BlockKind::Preformat,
    "code" => BlockKind::Code,
    "media" => BlockKind::Media,
};

/// Classify an element, or `None` for vocabulary the converter does not know.
///
/// A MathML `math` element is the only math-namespace element classified
/// here; the rest of a math island belongs to the math rewriter.
pub fn classify(node: &SourceNode) -> Option<ElementClass> {
    if node.is_math_ns() {
        return (node.local_name() == "math").then_some(ElementClass::LeafMath);
    }
    if !node.name.ns.is_content() {
        return None;
    }
    CLASSES.get(node.local_name()).copied()
}

/// Emitter for a direct child of a structural container.
pub fn block_kind(node: &SourceNode) -> Option<BlockKind> {
    if !node.name.ns.is_content() {
        return None;
    }
    BLOCKS.get(node.local_name()).copied()
}
