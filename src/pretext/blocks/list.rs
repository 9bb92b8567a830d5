use crate::cnxml::SourceNode;
use crate::pretext::context::ConversionContext;
use crate::pretext::converter::{Converter, id_attr};
use phf::phf_map;
use tracing::debug;

/// `number-style` values to PreTeXt list markers.
static MARKERS: phf::Map<&'static str, &'static str> = phf_map! {
    "arabic" => "1",
    "lower-alpha" => "a",
    "upper-alpha" => "A",
    "lower-roman" => "i",
    "upper-roman" => "I",
};

impl Converter<'_> {
    /// Emit `ol` or `ul` for a list; a titled list gets a `list` wrapper.
    pub(crate) fn convert_list(&self, node: &SourceNode, ctx: ConversionContext) -> String {
        let items: Vec<&SourceNode> = node.children_named("item").collect();
        if items.is_empty() {
            debug!(id = node.id(), "skipping list without items");
            return String::new();
        }

        let title = self.render_title(node);
        let list_level = if title.is_some() { ctx.level + 1 } else { ctx.level };
        let (tag, attrs) = if node.attr("list-type") == Some("enumerated") {
            let marker = node
                .attr("number-style")
                .and_then(|style| MARKERS.get(style))
                .map(|marker| format!(" marker=\"{}\"", marker))
                .unwrap_or_default();
            ("ol", marker)
        } else {
            ("ul", String::new())
        };

        let item_ctx = ConversionContext { level: list_level + 1, ..ctx };
        let body: String = items.iter().map(|item| self.convert_item(item, item_ctx)).collect();

        match title {
            Some(title) => {
                let mut inner = self.title_line(ctx.level + 1, &title);
                inner.push_str(&self.wrap_block(list_level, tag, &attrs, body));
                self.wrap_block(ctx.level, "list", &id_attr(node.id()), inner)
            },
            None => {
                let attrs = format!("{}{}", id_attr(node.id()), attrs);
                self.wrap_block(ctx.level, tag, &attrs, body)
            },
        }
    }

    fn convert_item(&self, item: &SourceNode, ctx: ConversionContext) -> String {
        if item.has_child("para") {
            let body = self.convert_body(item, item.id().unwrap_or(""), ctx.nested());
            return self.wrap_block(ctx.level, "li", "", body);
        }
        let content = self.render_inline(item, ctx);
        self.line_element(ctx.level, "li", "", content.trim())
    }
}

#[cfg(test)]
mod tests {
    use crate::pretext::test_support::convert_fragment;

    #[test]
    fn test_bulleted_list() {
        let out = convert_fragment(
            "<content><list id=\"l1\"><item>first</item><item>second <term>t</term></item></list></content>",
            "s",
        );
        assert_eq!(
            out,
            "<ul xml:id=\"l1\">\n  <li>first</li>\n  <li>second <term>t</term></li>\n</ul>\n"
        );
    }

    #[test]
    fn test_enumerated_list_with_marker() {
        let out = convert_fragment(
            "<content><list list-type=\"enumerated\" number-style=\"lower-alpha\"><item>a</item><item/></list></content>",
            "s",
        );
        assert_eq!(out, "<ol marker=\"a\">\n  <li>a</li>\n  <li/>\n</ol>\n");
    }

    #[test]
    fn test_titled_list() {
        let out = convert_fragment("<content><list><title>Steps</title><item>go</item></list></content>", "s");
        assert_eq!(
            out,
            "<list>\n  <title>Steps</title>\n  <ul>\n    <li>go</li>\n  </ul>\n</list>\n"
        );
    }

    #[test]
    fn test_item_with_paragraphs_uses_block_form() {
        let out = convert_fragment("<content><list><item><para>one</para><para>two</para></item></list></content>", "s");
        assert_eq!(out, "<ul>\n  <li>\n    <p>one</p>\n    <p>two</p>\n  </li>\n</ul>\n");
    }

    #[test]
    fn test_empty_list_is_skipped() {
        assert_eq!(convert_fragment("<content><list><title>Nothing</title></list></content>", "s"), "");
    }
}
