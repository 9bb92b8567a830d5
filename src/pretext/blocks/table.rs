use crate::cnxml::SourceNode;
use crate::pretext::context::ConversionContext;
use crate::pretext::converter::{Converter, id_attr};
use crate::pretext::ids::SiblingIds;
use tracing::{debug, warn};

impl Converter<'_> {
    /// Emit a `table` with one `tabular` holding every row group in order.
    ///
    /// The declared `cols` count is not enforced; ragged rows are emitted
    /// as they are and logged.
    pub(crate) fn convert_table(&self, node: &SourceNode, ids: &mut SiblingIds<'_>, ctx: ConversionContext) -> String {
        let id = ids.resolve(node, "table");
        let groups: Vec<&SourceNode> = node.children_named("tgroup").collect();
        if groups.is_empty() {
            debug!(id = id.as_deref(), "skipping table without tgroup");
            return String::new();
        }

        let row_level = ctx.level + 2;
        let mut rows = String::new();
        for group in groups {
            let declared = group.attr("cols").and_then(|c| c.trim().parse::<usize>().ok());
            for (section, header) in [("thead", true), ("tbody", false), ("tfoot", false)] {
                for part in group.children_named(section) {
                    for row in part.children_named("row") {
                        let cells = self.convert_row(row, ctx);
                        if let Some(cols) = declared.filter(|&cols| cols != cells.len()) {
                            warn!(
                                table = id.as_deref(),
                                declared = cols,
                                actual = cells.len(),
                                "row length does not match declared column count"
                            );
                        }
                        let attrs = if header { " header=\"yes\"" } else { "" };
                        rows.push_str(&self.pad(row_level));
                        rows.push_str(&format!("<row{}>", attrs));
                        rows.push_str(&cells.concat());
                        rows.push_str("</row>\n");
                    }
                }
            }
        }

        let mut inner = String::new();
        let title = self.render_title(node).or_else(|| {
            let caption = self.render_inline(node.child("caption")?, ctx);
            let caption = caption.trim();
            (!caption.is_empty()).then(|| caption.to_string())
        });
        if let Some(title) = title {
            inner.push_str(&self.title_line(ctx.level + 1, &title));
        }
        inner.push_str(&self.wrap_block(ctx.level + 1, "tabular", "", rows));
        self.wrap_block(ctx.level, "table", &id_attr(id.as_deref()), inner)
    }

    fn convert_row(&self, row: &SourceNode, ctx: ConversionContext) -> Vec<String> {
        row.children_named("entry")
            .map(|entry| {
                let content = self.render_cell(entry, ctx);
                if content.is_empty() {
                    "<cell/>".to_string()
                } else {
                    format!("<cell>{}</cell>", content)
                }
            })
            .collect()
    }

    /// Cell content; an entry with several paragraphs keeps one `line` each.
    fn render_cell(&self, entry: &SourceNode, ctx: ConversionContext) -> String {
        let paras: Vec<&SourceNode> = entry.children_named("para").collect();
        match paras.as_slice() {
            [] => return self.render_inline(entry, ctx).trim().to_string(),
            [para] => return self.render_inline(para, ctx).trim().to_string(),
            _ => {},
        }
        paras
            .iter()
            .map(|para| self.render_inline(para, ctx).trim().to_string())
            .filter(|line| !line.is_empty())
            .map(|line| format!("<line>{}</line>", line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::pretext::test_support::convert_fragment;

    #[test]
    fn test_table_with_header_and_caption() {
        let out = convert_fragment(
            r#"<content><table id="t-freq"><caption>Frequency of <term>ages</term></caption>
                 <tgroup cols="2">
                   <thead><row><entry>Age</entry><entry>Count</entry></row></thead>
                   <tbody><row><entry>20</entry><entry><m:math><m:mn>3</m:mn></m:math></entry></row></tbody>
                 </tgroup></table></content>"#,
            "s",
        );
        assert_eq!(
            out,
            concat!(
                "<table xml:id=\"t-freq\">\n",
                "  <title>Frequency of <term>ages</term></title>\n",
                "  <tabular>\n",
                "    <row header=\"yes\"><cell>Age</cell><cell>Count</cell></row>\n",
                "    <row><cell>20</cell><cell><m>3</m></cell></row>\n",
                "  </tabular>\n",
                "</table>\n",
            )
        );
    }

    #[test]
    fn test_ragged_rows_are_emitted() {
        let out = convert_fragment(
            r#"<content><table><tgroup cols="3"><tbody>
                 <row><entry>a</entry></row>
                 <row><entry>b</entry><entry/><entry>c</entry></row>
               </tbody></tgroup></table></content>"#,
            "s",
        );
        assert!(out.contains("<row><cell>a</cell></row>"));
        assert!(out.contains("<row><cell>b</cell><cell/><cell>c</cell></row>"));
    }

    #[test]
    fn test_multi_paragraph_cells_become_lines() {
        let out = convert_fragment(
            r#"<content><table><tgroup cols="1"><tbody>
                 <row><entry><para>one</para><para>two</para></entry></row>
               </tbody></tgroup></table></content>"#,
            "s",
        );
        assert!(out.contains("<cell><line>one</line><line>two</line></cell>"));
    }

    #[test]
    fn test_table_ids_count_per_kind() {
        let out = convert_fragment(
            r#"<content>
                 <table><tgroup cols="1"><tbody><row><entry>1</entry></row></tbody></tgroup></table>
                 <section><title>S</title></section>
                 <table><tgroup cols="1"><tbody><row><entry>2</entry></row></tbody></tgroup></table>
               </content>"#,
            "ch1",
        );
        assert!(out.contains("<table xml:id=\"ch1-table1\">"));
        assert!(out.contains("<table xml:id=\"ch1-table2\">"));
        assert!(out.contains("<subsection xml:id=\"ch1-section1\">"));
    }

    #[test]
    fn test_table_without_tgroup_is_dropped() {
        assert_eq!(convert_fragment("<content><table><title>Empty</title></table></content>", "s"), "");
    }
}
