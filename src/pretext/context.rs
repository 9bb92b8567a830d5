//! Per-call conversion state.

/// Whether rendering collapses to one text-bearing unit or may keep
/// verbatim text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Paragraph-level text: incidental whitespace collapses to single spaces
    #[default]
    Inline,
    /// Verbatim content such as preformatted blocks
    Block,
}

/// Formatting state passed by value down the recursion.
///
/// `level` drives indentation only, `depth` selects the division tag for
/// nested sections. Namespaces are fixed process-wide (see
/// [`crate::common::namespace`]), so they are not carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionContext {
    pub level: usize,
    pub depth: usize,
    pub mode: RenderMode,
}

impl ConversionContext {
    pub fn new(level: usize) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Context for the children of a block.
    #[inline]
    pub fn nested(self) -> Self {
        Self {
            level: self.level + 1,
            ..self
        }
    }

    /// Context for a nested section emitted at the current level.
    #[inline]
    pub fn subdivision(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    #[inline]
    pub fn with_mode(self, mode: RenderMode) -> Self {
        Self { mode, ..self }
    }
}
