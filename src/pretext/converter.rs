// Structural converter
//
// Walks the direct children of a content root or section, dispatching each
// to a block emitter through the vocabulary table. Every emitter returns a
// complete string; parents concatenate what their children return.

use super::config::{PretextOptions, TitleMarkup};
use super::context::{ConversionContext, RenderMode};
use super::ids::SiblingIds;
use crate::cnxml::{BlockKind, CnxmlDocument, ElementClass, SourceNode, block_kind, classify};
use crate::common::xml::{escape_attribute, escape_text};
use crate::formula::MathRewriter;
use tracing::debug;

/// Converts CNXML trees to PreTeXt markup.
#[derive(Debug, Clone)]
pub struct Converter<'a> {
    pub(super) options: &'a PretextOptions,
    pub(super) math: MathRewriter,
}

/// Division element for a section nesting depth.
pub fn division_tag(depth: usize) -> &'static str {
    match depth {
        0 => "section",
        1 => "subsection",
        2 => "subsubsection",
        _ => "paragraphs",
    }
}

impl<'a> Converter<'a> {
    pub fn new(options: &'a PretextOptions) -> Self {
        Self {
            options,
            math: MathRewriter::new(),
        }
    }

    pub fn options(&self) -> &PretextOptions {
        self.options
    }

    /// Convert one module into a division at `ctx.depth`.
    ///
    /// `title` overrides the module's own title. A module without a content
    /// root yields a division holding only its title.
    pub fn convert_unit(
        &self,
        doc: &CnxmlDocument,
        id: &str,
        title: Option<&str>,
        ctx: ConversionContext,
    ) -> String {
        let title = title
            .map(str::to_string)
            .or_else(|| doc.title())
            .map(|t| escape_text(&t));
        if doc.content().is_none() {
            debug!(module = doc.module_id(), "module has no content element");
        }
        self.convert_division(doc.content(), Some(id), title.as_deref(), ctx)
    }

    /// Emit a division shell around the blocks of `body`.
    pub fn convert_division(
        &self,
        body: Option<&SourceNode>,
        id: Option<&str>,
        title: Option<&str>,
        ctx: ConversionContext,
    ) -> String {
        let mut inner = String::new();
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            inner.push_str(&self.title_line(ctx.level + 1, title));
        }
        if let Some(body) = body {
            inner.push_str(&self.convert_blocks(body, id.unwrap_or(""), ctx.nested()));
        }
        self.wrap_block(ctx.level, division_tag(ctx.depth), &id_attr(id), inner)
    }

    /// Dispatch the direct children of a structural container.
    ///
    /// Children outside the block vocabulary are dropped.
    pub fn convert_blocks(&self, container: &SourceNode, parent_id: &str, ctx: ConversionContext) -> String {
        self.convert_blocks_where(container, parent_id, ctx, |_| true)
    }

    /// Like [`Converter::convert_blocks`], keeping only blocks whose kind
    /// passes `keep`.
    pub fn convert_blocks_where(
        &self,
        container: &SourceNode,
        parent_id: &str,
        ctx: ConversionContext,
        keep: impl Fn(BlockKind) -> bool,
    ) -> String {
        let mut ids = SiblingIds::new(parent_id, self.options.synthesize_ids);
        let mut out = String::new();
        for child in &container.children {
            match block_kind(child) {
                Some(kind) if keep(kind) => out.push_str(&self.convert_block(kind, child, &mut ids, ctx)),
                Some(_) => {},
                None if is_owned_by_parent(child) => {},
                None => debug!(element = child.local_name(), "dropping unsupported structural element"),
            }
        }
        out
    }

    pub(super) fn convert_block(
        &self,
        kind: BlockKind,
        node: &SourceNode,
        ids: &mut SiblingIds<'_>,
        ctx: ConversionContext,
    ) -> String {
        let ctx = ctx.with_mode(RenderMode::Inline);
        match kind {
            BlockKind::Paragraph => self.convert_paragraph(node, ids, ctx),
            BlockKind::List => self.convert_list(node, ctx),
            BlockKind::Table => self.convert_table(node, ids, ctx),
            BlockKind::Figure => self.convert_figure(node, ctx),
            BlockKind::Note => self.convert_note(node, ctx),
            BlockKind::Example => self.convert_example(node, ctx),
            BlockKind::Exercise => self.convert_exercise(node, ctx, None),
            BlockKind::Equation => self.convert_equation(node, ctx),
            BlockKind::Quote => self.convert_blockquote(node, ctx),
            BlockKind::Preformat | BlockKind::Code => self.convert_preformat(node, ctx),
            BlockKind::Media => self.convert_media(node, ctx),
            BlockKind::Section => {
                let id = ids.resolve(node, "section");
                let title = self.render_title(node);
                self.convert_division(Some(node), id.as_deref(), title.as_deref(), ctx.subdivision())
            },
        }
    }

    /// Blocks of a mixed-content container such as a note or solution.
    ///
    /// Loose text and inline markup between block children become
    /// paragraphs; child names in `skip` are left to the caller.
    pub(super) fn convert_body_except(
        &self,
        node: &SourceNode,
        parent_id: &str,
        ctx: ConversionContext,
        skip: &[&str],
    ) -> String {
        let mut ids = SiblingIds::new(parent_id, self.options.synthesize_ids);
        self.convert_body_scoped(node, &mut ids, ctx, skip)
    }

    /// [`Converter::convert_body_except`] numbering blocks in a caller-owned
    /// scope, for containers whose parts share one id parent.
    pub(super) fn convert_body_scoped(
        &self,
        node: &SourceNode,
        ids: &mut SiblingIds<'_>,
        ctx: ConversionContext,
        skip: &[&str],
    ) -> String {
        let mut out = String::new();
        let mut lead = node.text.as_str();
        let mut start = 0;

        for (i, child) in node.children.iter().enumerate() {
            let kind = block_kind(child).filter(|&kind| !is_run_in(kind, child));
            let skipped = skip.iter().any(|name| child.is(name));
            let structural = kind.is_none() && classify(child) == Some(ElementClass::StructuralContainer);
            if kind.is_none() && !skipped && !structural {
                continue;
            }
            out.push_str(&self.paragraph_segment(lead, &node.children[start..i], ctx));
            if let (Some(kind), false) = (kind, skipped) {
                out.push_str(&self.convert_block(kind, child, ids, ctx));
            }
            lead = &child.tail;
            start = i + 1;
        }
        out.push_str(&self.paragraph_segment(lead, &node.children[start..], ctx));
        out
    }

    pub(super) fn convert_body(&self, node: &SourceNode, parent_id: &str, ctx: ConversionContext) -> String {
        self.convert_body_except(node, parent_id, ctx, &[])
    }

    /// Render a node's `title` child, if it has a non-empty one.
    pub(super) fn render_title(&self, node: &SourceNode) -> Option<String> {
        let title = node.title_child()?;
        let rendered = match self.options.title_markup {
            TitleMarkup::Inline => self.render_inline(title, ConversionContext::default()),
            TitleMarkup::Literal => escape_text(&collapse_whitespace(&title.text)),
        };
        let trimmed = rendered.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub(super) fn pad(&self, level: usize) -> String {
        " ".repeat(level * self.options.indent_width)
    }

    pub(super) fn title_line(&self, level: usize, title: &str) -> String {
        format!("{}<title>{}</title>\n", self.pad(level), title)
    }

    /// One element on a single line; self-closing when `content` is empty.
    pub(super) fn line_element(&self, level: usize, tag: &str, attrs: &str, content: &str) -> String {
        if content.is_empty() {
            format!("{}<{}{}/>\n", self.pad(level), tag, attrs)
        } else {
            format!("{}<{}{}>{}</{}>\n", self.pad(level), tag, attrs, content, tag)
        }
    }

    /// An element whose already-indented children sit on their own lines.
    pub(super) fn wrap_block(&self, level: usize, tag: &str, attrs: &str, body: String) -> String {
        let pad = self.pad(level);
        if body.is_empty() {
            return format!("{}<{}{}/>\n", pad, tag, attrs);
        }
        let mut out = String::with_capacity(body.len() + 2 * (pad.len() + tag.len()) + attrs.len() + 8);
        out.push_str(&pad);
        out.push('<');
        out.push_str(tag);
        out.push_str(attrs);
        out.push_str(">\n");
        out.push_str(&body);
        out.push_str(&pad);
        out.push_str("</");
        out.push_str(tag);
        out.push_str(">\n");
        out
    }
}

/// ` xml:id="..."` when an id is present.
pub(super) fn id_attr(id: Option<&str>) -> String {
    match id {
        Some(id) if !id.is_empty() => format!(" xml:id=\"{}\"", escape_attribute(id)),
        _ => String::new(),
    }
}

/// Children that a container's emitter reads itself rather than dispatching.
fn is_owned_by_parent(node: &SourceNode) -> bool {
    ["title", "label", "metadata", "caption"]
        .iter()
        .any(|name| node.is(name))
}

/// Quotes and code inside running text stay inline unless marked as blocks.
fn is_run_in(kind: BlockKind, node: &SourceNode) -> bool {
    matches!(kind, BlockKind::Quote | BlockKind::Code) && node.attr("display") != Some("block")
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub(super) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pretext::test_support::{convert_fragment, module};

    #[test]
    fn test_division_tags() {
        assert_eq!(division_tag(0), "section");
        assert_eq!(division_tag(1), "subsection");
        assert_eq!(division_tag(2), "subsubsection");
        assert_eq!(division_tag(7), "paragraphs");
    }

    #[test]
    fn test_minimal_round_trip() {
        let doc = module(
            r#"<section id="s-mean"><title>Mean</title>
                 <para>The <emphasis effect="bold">population mean</emphasis> is <m:math><m:mi>μ</m:mi></m:math>.</para>
               </section>"#,
        );
        let options = PretextOptions::default();
        let out = Converter::new(&options).convert_unit(&doc, "sec-one", Some("One"), ConversionContext::new(1));
        assert_eq!(
            out,
            concat!(
                "  <section xml:id=\"sec-one\">\n",
                "    <title>One</title>\n",
                "    <subsection xml:id=\"s-mean\">\n",
                "      <title>Mean</title>\n",
                "      <p>The <term>population mean</term> is <m>\\mu</m>.</p>\n",
                "    </subsection>\n",
                "  </section>\n",
            )
        );
    }

    #[test]
    fn test_missing_content_yields_empty_shell() {
        let doc = CnxmlDocument::parse(
            "m9",
            r#"<document xmlns="http://cnx.rice.edu/cnxml"><title>Empty</title></document>"#,
        )
        .unwrap();
        let options = PretextOptions::default();
        let out = Converter::new(&options).convert_unit(&doc, "sec-empty", None, ConversionContext::default());
        assert_eq!(out, "<section xml:id=\"sec-empty\">\n  <title>Empty</title>\n</section>\n");
    }

    #[test]
    fn test_nested_sections_get_deterministic_ids() {
        let out = convert_fragment(
            r#"<content><section><title>A</title><section><title>B</title><para>x y</para></section></section>
               <section><title>C</title></section></content>"#,
            "root",
        );
        assert!(out.contains("<subsection xml:id=\"root-section1\">"));
        assert!(out.contains("<subsubsection xml:id=\"root-section1-section1\">"));
        assert!(out.contains("<subsection xml:id=\"root-section2\">"));
        // rerunning produces identical output
        assert_eq!(out, convert_fragment(
            r#"<content><section><title>A</title><section><title>B</title><para>x y</para></section></section>
               <section><title>C</title></section></content>"#,
            "root",
        ));
    }

    #[test]
    fn test_unknown_structural_elements_are_dropped() {
        let out = convert_fragment(
            "<content><para>kept</para><mystery>lost text</mystery><glossary><definition/></glossary></content>",
            "root",
        );
        assert!(out.contains("<p>kept</p>"));
        assert!(!out.contains("lost"));
        assert!(!out.contains("definition"));
    }

    #[test]
    fn test_literal_titles_drop_nested_markup() {
        let doc = module(r#"<section id="s"><title>Mean of <m:math><m:mi>x</m:mi></m:math></title></section>"#);
        let literal = PretextOptions::new().with_title_markup(TitleMarkup::Literal);
        let out = Converter::new(&literal).convert_unit(&doc, "u", Some("U"), ConversionContext::default());
        assert!(out.contains("<title>Mean of</title>"));

        let inline = PretextOptions::default();
        let out = Converter::new(&inline).convert_unit(&doc, "u", Some("U"), ConversionContext::default());
        assert!(out.contains("<title>Mean of <m>x</m></title>"));
    }
}
