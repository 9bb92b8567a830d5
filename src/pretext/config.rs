//! Configuration types for PreTeXt conversion.
//!
//! Options only affect presentation details such as indentation and media
//! paths; the mapping from source vocabulary to target vocabulary is fixed.

/// Configuration options for PreTeXt conversion.
///
/// # Examples
///
/// ```rust
/// use cnxml2ptx::pretext::{PretextOptions, TitleMarkup};
///
/// // Create with defaults
/// let options = PretextOptions::default();
///
/// // Or customize
/// let options = PretextOptions::new()
///     .with_indent_width(4)
///     .with_title_markup(TitleMarkup::Literal)
///     .with_media_prefix("../../resources/", "images/");
/// ```
#[derive(Debug, Clone)]
pub struct PretextOptions {
    /// Spaces per nesting level in the emitted markup
    pub indent_width: usize,
    /// Source pixels per percent of text width, for pixel-sized images
    pub pixels_per_percent: u32,
    /// Ordered `(prefix, replacement)` pairs applied to image sources; the
    /// first matching prefix wins
    pub media_prefix_rewrites: Vec<(String, String)>,
    /// How titles with nested markup are rendered
    pub title_markup: TitleMarkup,
    /// Render short italic spans such as a lone `x` as inline math
    pub variable_heuristic: bool,
    /// Derive identifiers for sections and tables that lack one
    pub synthesize_ids: bool,
}

impl Default for PretextOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            pixels_per_percent: 5,
            media_prefix_rewrites: vec![
                ("../../media/".to_string(), "media/".to_string()),
                ("../media/".to_string(), "media/".to_string()),
            ],
            title_markup: TitleMarkup::Inline,
            variable_heuristic: true,
            synthesize_ids: true,
        }
    }
}

impl PretextOptions {
    /// Create a new `PretextOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of spaces per nesting level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cnxml2ptx::pretext::PretextOptions;
    ///
    /// let options = PretextOptions::new().with_indent_width(4);
    /// assert_eq!(options.indent_width, 4);
    /// ```
    #[inline]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the pixel-to-percent ratio used for pixel image widths.
    ///
    /// A ratio of zero is treated as one.
    #[inline]
    pub fn with_pixels_per_percent(mut self, ratio: u32) -> Self {
        self.pixels_per_percent = ratio.max(1);
        self
    }

    /// Append a media path rewrite, tried after the existing ones.
    #[inline]
    pub fn with_media_prefix(mut self, prefix: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.media_prefix_rewrites
            .push((prefix.into(), replacement.into()));
        self
    }

    /// Replace all media path rewrites.
    #[inline]
    pub fn with_media_prefix_rewrites(mut self, rewrites: Vec<(String, String)>) -> Self {
        self.media_prefix_rewrites = rewrites;
        self
    }

    /// Set how titles are rendered.
    #[inline]
    pub fn with_title_markup(mut self, markup: TitleMarkup) -> Self {
        self.title_markup = markup;
        self
    }

    /// Enable or disable the italic-variable heuristic.
    #[inline]
    pub fn with_variable_heuristic(mut self, enabled: bool) -> Self {
        self.variable_heuristic = enabled;
        self
    }

    /// Enable or disable identifier synthesis.
    #[inline]
    pub fn with_synthesized_ids(mut self, enabled: bool) -> Self {
        self.synthesize_ids = enabled;
        self
    }

    /// Apply the first matching media prefix rewrite to an image source.
    pub fn rewrite_media_path(&self, src: &str) -> String {
        self.media_prefix_rewrites
            .iter()
            .find_map(|(prefix, replacement)| {
                src.strip_prefix(prefix.as_str())
                    .map(|rest| format!("{}{}", replacement, rest))
            })
            .unwrap_or_else(|| src.to_string())
    }
}

/// Title rendering modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleMarkup {
    /// Only the title's leading literal text; nested markup is dropped.
    Literal,
    /// Titles go through the inline renderer like paragraph text.
    #[default]
    Inline,
}
