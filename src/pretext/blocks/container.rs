use crate::cnxml::SourceNode;
use crate::common::xml::escape_text;
use crate::pretext::context::{ConversionContext, RenderMode};
use crate::pretext::converter::{Converter, id_attr};
use crate::pretext::ids::SiblingIds;
use tracing::debug;

/// Note `class` substrings, their target container and default title.
/// The first matching substring wins.
const NOTE_CLASSES: [(&str, &str, &str); 5] = [
    ("try", "exercise", "Try It"),
    ("collab", "activity", "Collaborative Activity"),
    ("lab", "project", "Lab"),
    ("calculator", "aside", "Calculator"),
    ("chapter-objectives", "objectives", ""),
];

/// Target container and default title for a note class.
pub(crate) fn note_container(class: Option<&str>) -> (&'static str, &'static str) {
    let class = class.unwrap_or_default().to_ascii_lowercase();
    NOTE_CLASSES
        .iter()
        .find(|(needle, _, _)| class.contains(needle))
        .map(|&(_, tag, title)| (tag, title))
        .unwrap_or(("note", ""))
}

impl Converter<'_> {
    pub(crate) fn convert_note(&self, node: &SourceNode, ctx: ConversionContext) -> String {
        let (tag, default_title) = note_container(node.attr("class"));
        let title = self
            .render_title(node)
            .or_else(|| (!default_title.is_empty()).then(|| escape_text(default_title)));

        if tag == "exercise" {
            let exercises: Vec<&SourceNode> = node.children_named("exercise").collect();
            if exercises.is_empty() {
                return self.exercise_shell(node, title.as_deref(), ctx);
            }
            return exercises
                .into_iter()
                .map(|exercise| self.convert_exercise(exercise, ctx, title.as_deref()))
                .collect();
        }

        let id = node.id();
        let mut inner = String::new();
        if let Some(title) = &title {
            inner.push_str(&self.title_line(ctx.level + 1, title));
        }
        inner.push_str(&self.convert_body(node, id.unwrap_or(""), ctx.nested()));
        self.wrap_block(ctx.level, tag, &id_attr(id), inner)
    }

    /// Emit an exercise; `fallback_title` applies when it has no title.
    pub(crate) fn convert_exercise(
        &self,
        node: &SourceNode,
        ctx: ConversionContext,
        fallback_title: Option<&str>,
    ) -> String {
        let title = self
            .render_title(node)
            .or_else(|| fallback_title.map(str::to_string));
        self.exercise_shell(node, title.as_deref(), ctx)
    }

    fn exercise_shell(&self, node: &SourceNode, title: Option<&str>, ctx: ConversionContext) -> String {
        // Statement, hints and solutions number their blocks in one scope
        let mut ids = SiblingIds::new(node.id().unwrap_or(""), self.options.synthesize_ids);
        let part_ctx = ctx.nested();
        let mut inner = String::new();
        if let Some(title) = title {
            inner.push_str(&self.title_line(part_ctx.level, title));
        }

        let statement = match node.child("problem") {
            Some(problem) => self.convert_body_scoped(problem, &mut ids, part_ctx.nested(), &[]),
            None => self.convert_body_scoped(node, &mut ids, part_ctx.nested(), &["solution", "commentary"]),
        };
        inner.push_str(&self.wrap_block(part_ctx.level, "statement", "", statement));
        for commentary in node.children_named("commentary") {
            inner.push_str(&self.exercise_part(commentary, "hint", &mut ids, part_ctx));
        }
        for solution in node.children_named("solution") {
            inner.push_str(&self.exercise_part(solution, "solution", &mut ids, part_ctx));
        }
        self.wrap_block(ctx.level, "exercise", &id_attr(node.id()), inner)
    }

    /// A hint or solution; empty ones are dropped.
    fn exercise_part(&self, node: &SourceNode, tag: &str, ids: &mut SiblingIds<'_>, ctx: ConversionContext) -> String {
        let body = self.convert_body_scoped(node, ids, ctx.nested(), &[]);
        if body.is_empty() {
            return String::new();
        }
        self.wrap_block(ctx.level, tag, &id_attr(node.id()), body)
    }

    /// Emit a worked example.
    ///
    /// Without solutions the body is emitted directly. Otherwise the loose
    /// blocks and every problem form the statement, and each solution, direct
    /// or inside a contained exercise, follows it.
    pub(crate) fn convert_example(&self, node: &SourceNode, ctx: ConversionContext) -> String {
        let mut ids = SiblingIds::new(node.id().unwrap_or(""), self.options.synthesize_ids);
        let part_ctx = ctx.nested();
        let mut inner = String::new();
        if let Some(title) = self.render_title(node) {
            inner.push_str(&self.title_line(part_ctx.level, &title));
        }

        let exercises: Vec<&SourceNode> = node.children_named("exercise").collect();
        let solutions: Vec<&SourceNode> = node
            .children_named("solution")
            .chain(exercises.iter().flat_map(|e| e.children_named("solution")))
            .collect();

        if solutions.is_empty() && exercises.is_empty() {
            inner.push_str(&self.convert_body_scoped(node, &mut ids, part_ctx, &[]));
            return self.wrap_block(ctx.level, "example", &id_attr(node.id()), inner);
        }

        let body_ctx = part_ctx.nested();
        let mut statement = self.convert_body_scoped(node, &mut ids, body_ctx, &["exercise", "problem", "solution"]);
        for exercise in &exercises {
            statement.push_str(&match exercise.child("problem") {
                Some(problem) => self.convert_body_scoped(problem, &mut ids, body_ctx, &[]),
                None => self.convert_body_scoped(exercise, &mut ids, body_ctx, &["solution", "commentary"]),
            });
        }
        for problem in node.children_named("problem") {
            statement.push_str(&self.convert_body_scoped(problem, &mut ids, body_ctx, &[]));
        }
        inner.push_str(&self.wrap_block(part_ctx.level, "statement", "", statement));
        for solution in solutions {
            inner.push_str(&self.exercise_part(solution, "solution", &mut ids, part_ctx));
        }
        self.wrap_block(ctx.level, "example", &id_attr(node.id()), inner)
    }

    /// Display math; a source id makes it a numbered `men`.
    pub(crate) fn convert_equation(&self, node: &SourceNode, ctx: ConversionContext) -> String {
        let latex = node.find_math().map(|math| self.math.rewrite(math)).unwrap_or_default();
        if latex.is_empty() {
            debug!(id = node.id(), "skipping equation without math");
            return String::new();
        }
        let tag = if node.id().is_some() { "men" } else { "me" };
        self.line_element(ctx.level, tag, &id_attr(node.id()), &escape_text(&latex))
    }

    pub(crate) fn convert_blockquote(&self, node: &SourceNode, ctx: ConversionContext) -> String {
        let body = self.convert_body(node, node.id().unwrap_or(""), ctx.nested());
        if body.is_empty() {
            return String::new();
        }
        self.wrap_block(ctx.level, "blockquote", &id_attr(node.id()), body)
    }

    /// Preformatted text and block code, whitespace kept verbatim.
    pub(crate) fn convert_preformat(&self, node: &SourceNode, ctx: ConversionContext) -> String {
        let rendered = self.render_inline(node, ctx.with_mode(RenderMode::Block));
        let text = rendered.trim_matches('\n');
        if text.trim().is_empty() {
            return String::new();
        }
        format!("{}<pre>{}</pre>\n", self.pad(ctx.level), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pretext::test_support::convert_fragment;

    #[test]
    fn test_note_class_mapping() {
        assert_eq!(note_container(Some("statistics try")), ("exercise", "Try It"));
        assert_eq!(note_container(Some("statistics collab")), ("activity", "Collaborative Activity"));
        assert_eq!(note_container(Some("statistics lab")), ("project", "Lab"));
        assert_eq!(note_container(Some("statistics calculator")), ("aside", "Calculator"));
        assert_eq!(note_container(Some("chapter-objectives")), ("objectives", ""));
        assert_eq!(note_container(Some("interesting-note")), ("note", ""));
        assert_eq!(note_container(None), ("note", ""));
    }

    #[test]
    fn test_plain_note_with_mixed_content() {
        let out = convert_fragment(
            r#"<content><note id="n1"><title>Remember</title>Loose text <term>here</term>.
                 <list><item>x</item></list>after</note></content>"#,
            "s",
        );
        assert_eq!(
            out,
            concat!(
                "<note xml:id=\"n1\">\n",
                "  <title>Remember</title>\n",
                "  <p>Loose text <term>here</term>.</p>\n",
                "  <ul>\n",
                "    <li>x</li>\n",
                "  </ul>\n",
                "  <p>after</p>\n",
                "</note>\n",
            )
        );
    }

    #[test]
    fn test_collab_note_gets_default_title() {
        let out = convert_fragment(r#"<content><note class="statistics collab"><para>Work together.</para></note></content>"#, "s");
        assert_eq!(
            out,
            "<activity>\n  <title>Collaborative Activity</title>\n  <p>Work together.</p>\n</activity>\n"
        );
    }

    #[test]
    fn test_try_note_emits_each_exercise() {
        let out = convert_fragment(
            r#"<content><note class="statistics try">
                 <exercise id="e1"><problem><para>Find the mean.</para></problem></exercise>
                 <exercise id="e2"><title>Second</title><problem><para>Find the mode.</para></problem></exercise>
               </note></content>"#,
            "s",
        );
        assert_eq!(
            out,
            concat!(
                "<exercise xml:id=\"e1\">\n",
                "  <title>Try It</title>\n",
                "  <statement>\n",
                "    <p>Find the mean.</p>\n",
                "  </statement>\n",
                "</exercise>\n",
                "<exercise xml:id=\"e2\">\n",
                "  <title>Second</title>\n",
                "  <statement>\n",
                "    <p>Find the mode.</p>\n",
                "  </statement>\n",
                "</exercise>\n",
            )
        );
    }

    #[test]
    fn test_exercise_parts() {
        let out = convert_fragment(
            r#"<content><exercise id="ex1">
                 <problem><para>What is <m:math><m:mi>σ</m:mi></m:math>?</para></problem>
                 <commentary><para>Think spread.</para></commentary>
                 <solution><para>The standard deviation.</para></solution>
               </exercise></content>"#,
            "s",
        );
        assert_eq!(
            out,
            concat!(
                "<exercise xml:id=\"ex1\">\n",
                "  <statement>\n",
                "    <p>What is <m>\\sigma</m>?</p>\n",
                "  </statement>\n",
                "  <hint>\n",
                "    <p>Think spread.</p>\n",
                "  </hint>\n",
                "  <solution>\n",
                "    <p>The standard deviation.</p>\n",
                "  </solution>\n",
                "</exercise>\n",
            )
        );
    }

    #[test]
    fn test_exercise_without_problem_uses_direct_children() {
        let out = convert_fragment(
            r#"<content><exercise><para>Loose statement.</para><solution><para>Answer.</para></solution></exercise></content>"#,
            "s",
        );
        assert!(out.contains("<statement>\n    <p>Loose statement.</p>\n  </statement>"));
        assert!(out.contains("<solution>\n    <p>Answer.</p>\n  </solution>"));
    }

    #[test]
    fn test_exercise_parts_share_one_id_scope() {
        let out = convert_fragment(
            r#"<content><exercise id="ex1">
                 <problem><table><tgroup cols="1"><tbody><row><entry>q</entry></row></tbody></tgroup></table></problem>
                 <commentary><table><tgroup cols="1"><tbody><row><entry>h</entry></row></tbody></tgroup></table></commentary>
                 <solution><table><tgroup cols="1"><tbody><row><entry>a</entry></row></tbody></tgroup></table></solution>
               </exercise></content>"#,
            "s",
        );
        assert_eq!(out.matches("xml:id=\"ex1-table1\"").count(), 1);
        assert_eq!(out.matches("xml:id=\"ex1-table2\"").count(), 1);
        assert_eq!(out.matches("xml:id=\"ex1-table3\"").count(), 1);
    }

    #[test]
    fn test_example_exercises_share_one_id_scope() {
        let table = r#"<table><tgroup cols="1"><tbody><row><entry>x</entry></row></tbody></tgroup></table>"#;
        let xml = format!(
            r#"<content><example id="ex"><exercise><problem>{t}</problem><solution>{t}</solution></exercise>
               <exercise><problem>{t}</problem></exercise></example></content>"#,
            t = table
        );
        let out = convert_fragment(&xml, "s");
        for n in 1..=3 {
            assert_eq!(out.matches(&format!("xml:id=\"ex-table{}\"", n)).count(), 1, "ex-table{}", n);
        }
        assert!(!out.contains("ex-table4"));
    }

    #[test]
    fn test_example_collects_statement_and_solutions() {
        let out = convert_fragment(
            r#"<content><example id="ex"><para>Data: 1, 2, 3.</para>
                 <exercise><problem><para>Find the median.</para></problem>
                 <solution><para>2</para></solution></exercise></example></content>"#,
            "s",
        );
        assert_eq!(
            out,
            concat!(
                "<example xml:id=\"ex\">\n",
                "  <statement>\n",
                "    <p>Data: 1, 2, 3.</p>\n",
                "    <p>Find the median.</p>\n",
                "  </statement>\n",
                "  <solution>\n",
                "    <p>2</p>\n",
                "  </solution>\n",
                "</example>\n",
            )
        );
    }

    #[test]
    fn test_example_without_solution_is_plain() {
        let out = convert_fragment("<content><example><title>Ages</title><para>Ten people.</para></example></content>", "s");
        assert_eq!(out, "<example>\n  <title>Ages</title>\n  <p>Ten people.</p>\n</example>\n");
    }

    #[test]
    fn test_equation_and_preformat() {
        let out = convert_fragment(
            r#"<content><equation id="eq1"><m:math><m:mfrac><m:mi>a</m:mi><m:mi>b</m:mi></m:mfrac></m:math></equation>
               <equation><m:math><m:mi>x</m:mi><m:mo>&lt;</m:mo><m:mn>1</m:mn></m:math></equation>
               <equation/>
               <preformat>
  a  &lt; b
c</preformat></content>"#,
            "s",
        );
        assert_eq!(
            out,
            concat!(
                "<men xml:id=\"eq1\">\\frac{a}{b}</men>\n",
                "<me>x&lt;1</me>\n",
                "<pre>  a  &lt; b\nc</pre>\n",
            )
        );
    }

    #[test]
    fn test_blockquote_and_inline_quote() {
        let out = convert_fragment(
            r#"<content><quote id="q">To be.</quote><note>He said <quote>hi</quote> twice.</note></content>"#,
            "s",
        );
        assert!(out.contains("<blockquote xml:id=\"q\">\n  <p>To be.</p>\n</blockquote>\n"));
        assert!(out.contains("<p>He said <q>hi</q> twice.</p>"));
    }
}
