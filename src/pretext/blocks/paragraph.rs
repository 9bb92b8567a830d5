use crate::cnxml::SourceNode;
use crate::pretext::context::{ConversionContext, RenderMode};
use crate::pretext::converter::Converter;
use crate::pretext::ids::SiblingIds;

impl Converter<'_> {
    /// Emit a paragraph, splitting it around any tables it contains.
    ///
    /// A titled paragraph is wrapped in `paragraphs` so the title survives.
    pub(crate) fn convert_paragraph(
        &self,
        node: &SourceNode,
        ids: &mut SiblingIds<'_>,
        ctx: ConversionContext,
    ) -> String {
        let title = self.render_title(node);
        let inner_ctx = if title.is_some() { ctx.nested() } else { ctx };

        let mut body = String::new();
        let mut lead = node.text.as_str();
        let mut start = 0;
        for (i, child) in node.children.iter().enumerate() {
            if !child.is("table") {
                continue;
            }
            body.push_str(&self.paragraph_segment(lead, &node.children[start..i], inner_ctx));
            body.push_str(&self.convert_table(child, ids, inner_ctx));
            lead = &child.tail;
            start = i + 1;
        }
        body.push_str(&self.paragraph_segment(lead, &node.children[start..], inner_ctx));

        match title {
            Some(title) if !body.is_empty() => {
                let mut inner = self.title_line(ctx.level + 1, &title);
                inner.push_str(&body);
                self.wrap_block(ctx.level, "paragraphs", "", inner)
            },
            _ => body,
        }
    }

    /// One `<p>` from a run of mixed content; empty runs emit nothing.
    pub(crate) fn paragraph_segment(&self, lead: &str, children: &[SourceNode], ctx: ConversionContext) -> String {
        let rendered = self.render_parts(lead, children, ctx.with_mode(RenderMode::Inline));
        let text = rendered.trim();
        if text.is_empty() {
            return String::new();
        }
        format!("{}<p>{}</p>\n", self.pad(ctx.level), text)
    }
}
