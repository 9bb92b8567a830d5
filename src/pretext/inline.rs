// Inline renderer
//
// Renders mixed content into one text-bearing fragment: leading text, then
// each child by classification followed by its tail. Block elements met
// along the way are emitted by the block emitters and spliced in after a
// line break.

use super::context::{ConversionContext, RenderMode};
use super::converter::{Converter, collapse_whitespace};
use super::ids::SiblingIds;
use crate::cnxml::{ElementClass, SourceNode, block_kind, classify};
use crate::common::xml::{escape_attribute, escape_text};

/// Identifiers that read as math variables when italicized.
const VARIABLE_NAMES: [&str; 12] = ["X", "Y", "Z", "P", "Q", "x", "y", "z", "p", "q", "k", "n"];

/// Whether italic text should be typeset as a math variable.
pub fn is_math_variable(text: &str) -> bool {
    let text = text.trim();
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => true,
        _ => VARIABLE_NAMES.contains(&text),
    }
}

/// Accumulates one inline fragment.
struct InlineBuffer {
    out: String,
    mode: RenderMode,
}

impl InlineBuffer {
    fn new(mode: RenderMode) -> Self {
        Self {
            out: String::new(),
            mode,
        }
    }

    /// Escaped character data; whitespace runs collapse in inline mode.
    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        match self.mode {
            RenderMode::Block => self.out.push_str(&escape_text(raw)),
            RenderMode::Inline => {
                let mut collapsed = String::with_capacity(raw.len());
                let mut at_space = self.out.ends_with([' ', '\n']);
                for ch in raw.chars() {
                    if ch.is_whitespace() {
                        if !at_space {
                            collapsed.push(' ');
                        }
                        at_space = true;
                    } else {
                        collapsed.push(ch);
                        at_space = false;
                    }
                }
                self.out.push_str(&escape_text(&collapsed));
            },
        }
    }

    fn push_markup(&mut self, markup: &str) {
        self.out.push_str(markup);
    }

    /// A complete block, placed on its own line.
    fn push_block(&mut self, block: &str) {
        let block = block.trim_end_matches('\n');
        if block.is_empty() {
            return;
        }
        self.out.push('\n');
        self.out.push_str(block);
    }

    fn finish(self) -> String {
        self.out
    }
}

impl Converter<'_> {
    /// Render an element's mixed content as one fragment.
    pub fn render_inline(&self, node: &SourceNode, ctx: ConversionContext) -> String {
        self.render_parts(&node.text, &node.children, ctx)
    }

    /// Render leading text plus a run of children with their tails.
    pub(super) fn render_parts(&self, text: &str, children: &[SourceNode], ctx: ConversionContext) -> String {
        let mut buffer = InlineBuffer::new(ctx.mode);
        self.render_into(&mut buffer, text, children, ctx);
        buffer.finish()
    }

    fn render_into(&self, buffer: &mut InlineBuffer, text: &str, children: &[SourceNode], ctx: ConversionContext) {
        buffer.push_text(text);
        for child in children {
            self.render_child(buffer, child, ctx);
            buffer.push_text(&child.tail);
        }
    }

    fn render_child(&self, buffer: &mut InlineBuffer, child: &SourceNode, ctx: ConversionContext) {
        // Titles and labels belong to the element that owns them
        if child.is("title") || child.is("label") {
            return;
        }
        match classify(child) {
            Some(ElementClass::InlineSpan) => self.render_span(buffer, child, ctx),
            Some(ElementClass::LeafMath) => self.render_math(buffer, child),
            Some(ElementClass::OpaquePassthrough) => {
                self.render_into(buffer, &child.text, &child.children, ctx)
            },
            Some(ElementClass::BlockContainer | ElementClass::StructuralContainer) => {
                self.splice_block(buffer, child, ctx)
            },
            None => buffer.push_text(&child.itertext()),
        }
    }

    fn render_span(&self, buffer: &mut InlineBuffer, child: &SourceNode, ctx: ConversionContext) {
        let display_block = child.attr("display") == Some("block");
        match child.local_name() {
            "emphasis" => self.render_emphasis(buffer, child, ctx),
            "term" => self.wrap_span(buffer, "term", "", child, ctx),
            "code" if display_block => self.splice_block(buffer, child, ctx),
            "code" => {
                let code = escape_text(&child.itertext());
                if !code.trim().is_empty() {
                    buffer.push_markup(&format!("<c>{}</c>", code));
                }
            },
            "sub" => self.wrap_span(buffer, "sub", "", child, ctx),
            "sup" => self.wrap_span(buffer, "sup", "", child, ctx),
            "quote" if display_block => self.splice_block(buffer, child, ctx),
            "quote" => self.wrap_span(buffer, "q", "", child, ctx),
            "foreign" => {
                let attrs = child
                    .attr("xml:lang")
                    .map(|lang| format!(" xml:lang=\"{}\"", escape_attribute(lang)))
                    .unwrap_or_default();
                self.wrap_span(buffer, "foreign", &attrs, child, ctx)
            },
            "footnote" => self.wrap_span(buffer, "fn", "", child, ctx),
            "cite" | "cite-title" => self.wrap_span(buffer, "pubtitle", "", child, ctx),
            "newline" => {
                let count = repeat_count(child);
                match ctx.mode {
                    RenderMode::Inline => buffer.push_markup(&"<nbsp/>".repeat(count)),
                    RenderMode::Block => buffer.push_markup(&"\n".repeat(count)),
                }
            },
            "space" => buffer.push_markup(&" ".repeat(repeat_count(child))),
            "link" | "cnxn" => self.render_link(buffer, child, ctx),
            _ => buffer.push_text(&child.itertext()),
        }
    }

    fn render_emphasis(&self, buffer: &mut InlineBuffer, child: &SourceNode, ctx: ConversionContext) {
        match child.attr("effect").unwrap_or("italics") {
            "bold" | "strong" => self.wrap_span(buffer, "term", "", child, ctx),
            "normal" | "smallcaps" => self.render_into(buffer, &child.text, &child.children, ctx),
            _ => {
                let text = child.itertext();
                if self.options.variable_heuristic && child.children.is_empty() && is_math_variable(&text) {
                    buffer.push_markup(&format!("<m>{}</m>", escape_text(text.trim())));
                } else {
                    self.wrap_span(buffer, "em", "", child, ctx);
                }
            },
        }
    }

    /// Wrap rendered content in `tag`; whitespace-only content emits no tag.
    ///
    /// Edge whitespace moves outside the element.
    fn wrap_span(&self, buffer: &mut InlineBuffer, tag: &str, attrs: &str, child: &SourceNode, ctx: ConversionContext) {
        let content = self.render_inline(child, ctx);
        let trimmed = content.trim();
        if trimmed.is_empty() {
            buffer.push_text(&content);
            return;
        }
        if content.starts_with(char::is_whitespace) {
            buffer.push_text(" ");
        }
        buffer.push_markup(&format!("<{}{}>{}</{}>", tag, attrs, trimmed, tag));
        if content.ends_with(char::is_whitespace) {
            buffer.push_text(" ");
        }
    }

    fn render_link(&self, buffer: &mut InlineBuffer, child: &SourceNode, ctx: ConversionContext) {
        let content = self.render_inline(child, ctx);
        let content = content.trim();
        let non_empty = |name: &str| child.attr(name).map(str::trim).filter(|v| !v.is_empty());

        if let Some(url) = non_empty("url") {
            let attrs = format!(" href=\"{}\"", escape_attribute(url));
            buffer.push_markup(&inline_element("url", &attrs, content));
            return;
        }

        let target = non_empty("target-id").or_else(|| non_empty("target"));
        let reference = match (non_empty("document"), target) {
            (Some(document), Some(target)) => Some(format!("{}-{}", document, target)),
            (None, Some(target)) => Some(target.to_string()),
            (Some(document), None) => Some(document.to_string()),
            (None, None) => None,
        };
        match reference {
            Some(reference) => {
                let attrs = format!(" ref=\"{}\"", escape_attribute(&reference));
                buffer.push_markup(&inline_element("xref", &attrs, content));
            },
            None => buffer.push_markup(content),
        }
    }

    fn render_math(&self, buffer: &mut InlineBuffer, math: &SourceNode) {
        let latex = self.math.rewrite(math);
        if latex.is_empty() {
            return;
        }
        let tag = if math.attr("display") == Some("block") { "me" } else { "m" };
        buffer.push_markup(&format!("<{}>{}</{}>", tag, escape_text(&latex), tag));
    }

    /// Delegate a block element to its emitter and splice the result in.
    fn splice_block(&self, buffer: &mut InlineBuffer, child: &SourceNode, ctx: ConversionContext) {
        let block_ctx = ctx.nested().with_mode(RenderMode::Inline);
        let mut ids = SiblingIds::detached();
        let block = match block_kind(child) {
            Some(kind) => self.convert_block(kind, child, &mut ids, block_ctx),
            None if child.is("image") => self.convert_image(child, None, block_ctx),
            None if child.is("subfigure") => self.convert_figure(child, block_ctx),
            None => {
                // Exercise halves and other containers have no inline form
                buffer.push_text(&collapse_whitespace(&child.itertext()));
                return;
            },
        };
        buffer.push_block(&block);
    }
}

/// Upper bound on `count` for `newline` and `space`.
const MAX_REPEAT: usize = 16;

fn repeat_count(node: &SourceNode) -> usize {
    node.attr("count")
        .and_then(|c| c.trim().parse::<usize>().ok())
        .map_or(1, |count| count.min(MAX_REPEAT))
}

fn inline_element(tag: &str, attrs: &str, content: &str) -> String {
    if content.is_empty() {
        format!("<{}{}/>", tag, attrs)
    } else {
        format!("<{}{}>{}</{}>", tag, attrs, content, tag)
    }
}
