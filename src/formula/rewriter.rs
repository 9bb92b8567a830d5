// MathML to LaTeX rewriter
//
// A recursive descent over a math-namespace subtree. Every construct is
// dispatched on its arity class; missing operands render as empty groups
// and unknown tags concatenate their children, so rewriting never fails.

use super::arity::{MathConstruct, TokenKind, operands};
use super::matrix::{convert_fenced, convert_matrix};
use super::symbols::{
    SymbolRole, function_name, is_large_operator, lookup_symbol, over_accent, under_accent,
};
use super::utils::{escape_text_mode, push_latex};
use crate::cnxml::SourceNode;

/// Converts MathML subtrees to linear LaTeX notation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathRewriter;

impl MathRewriter {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite a `math` element (or any MathML element) to LaTeX.
    pub fn rewrite(&self, node: &SourceNode) -> String {
        let mut buffer = String::with_capacity(64);
        self.convert_node(&mut buffer, node, SymbolRole::Identifier);
        buffer.trim().to_string()
    }

    fn render(&self, node: Option<&SourceNode>, role: SymbolRole) -> String {
        let mut buffer = String::new();
        if let Some(node) = node {
            self.convert_node(&mut buffer, node, role);
        }
        buffer.trim().to_string()
    }

    fn convert_node(&self, buffer: &mut String, node: &SourceNode, role: SymbolRole) {
        let construct = MathConstruct::of(node);

        if node.children.is_empty() {
            self.convert_leaf(buffer, node, construct, role);
            return;
        }

        let Some(construct) = construct else {
            self.convert_row(buffer, node, role);
            return;
        };

        match construct {
            MathConstruct::Token(_)
            | MathConstruct::Group
            | MathConstruct::TableRow
            | MathConstruct::LabeledRow
            | MathConstruct::TableCell => self.convert_row(buffer, node, role),
            MathConstruct::Ignored => {},
            MathConstruct::Semantics => {
                if let Some(first) = node.children.first() {
                    self.convert_node(buffer, first, role);
                }
            },
            MathConstruct::Sqrt => {
                let inner = self.render_row(node);
                push_latex(buffer, &format!("\\sqrt{{{}}}", inner));
            },
            MathConstruct::Root => {
                let ops = operands(node, 2);
                let base = self.render(ops[0], SymbolRole::Identifier);
                let index = self.render(ops[1], SymbolRole::Identifier);
                if index.is_empty() {
                    push_latex(buffer, &format!("\\sqrt{{{}}}", base));
                } else {
                    push_latex(buffer, &format!("\\sqrt[{}]{{{}}}", index, base));
                }
            },
            MathConstruct::Fraction => self.convert_fraction(buffer, node),
            MathConstruct::Sub | MathConstruct::Sup | MathConstruct::SubSup => {
                self.convert_scripts(buffer, node, construct)
            },
            MathConstruct::Under => self.convert_under(buffer, node),
            MathConstruct::Over => self.convert_over(buffer, node),
            MathConstruct::UnderOver => {
                let ops = operands(node, 3);
                let base = self.render(ops[0], SymbolRole::LimitBase);
                let under = self.render(ops[1], SymbolRole::Identifier);
                let over = self.render(ops[2], SymbolRole::Identifier);
                push_latex(buffer, &format!("{}_{{{}}}^{{{}}}", script_base(&base), under, over));
            },
            MathConstruct::Fenced => {
                let items: Vec<String> = node
                    .children
                    .iter()
                    .map(|c| self.render(Some(c), SymbolRole::Identifier))
                    .collect();
                convert_fenced(
                    buffer,
                    node.attr("open").unwrap_or("("),
                    node.attr("close").unwrap_or(")"),
                    node.attr("separators").unwrap_or(","),
                    &items,
                );
            },
            MathConstruct::Table => self.convert_table(buffer, node),
            MathConstruct::Phantom => {
                let inner = self.render_row(node);
                push_latex(buffer, &format!("\\phantom{{{}}}", inner));
            },
            MathConstruct::Enclose => self.convert_enclose(buffer, node),
        }
    }

    /// A node without element children: token text, or nothing.
    fn convert_leaf(
        &self,
        buffer: &mut String,
        node: &SourceNode,
        construct: Option<MathConstruct>,
        role: SymbolRole,
    ) {
        let text = node.text.trim();
        match construct {
            Some(MathConstruct::Token(TokenKind::Space)) => push_latex(buffer, "\\,"),
            Some(MathConstruct::Ignored) => {},
            _ if text.is_empty() => {},
            Some(MathConstruct::Token(TokenKind::Text)) => {
                let mut body = String::with_capacity(text.len() + 8);
                escape_text_mode(text, &mut body);
                push_latex(buffer, &format!("\\text{{{}}}", body));
            },
            Some(MathConstruct::Token(TokenKind::StringLiteral)) => {
                let mut body = String::with_capacity(text.len() + 8);
                escape_text_mode(text, &mut body);
                push_latex(buffer, &format!("\\text{{\"{}\"}}", body));
            },
            Some(MathConstruct::Token(TokenKind::Identifier)) => {
                match function_name(text) {
                    Some(name) => push_latex(buffer, &name),
                    None => push_symbols(buffer, text, role),
                }
            },
            Some(MathConstruct::Token(TokenKind::Operator)) => {
                let role = match role {
                    SymbolRole::LimitBase => SymbolRole::LimitBase,
                    _ => SymbolRole::Operator,
                };
                push_symbols(buffer, text, role);
            },
            _ => push_symbols(buffer, text, role),
        }
    }

    /// Own text, then each child followed by its trimmed tail.
    fn convert_row(&self, buffer: &mut String, node: &SourceNode, role: SymbolRole) {
        push_symbols(buffer, node.text.trim(), role);
        // A single wrapped child keeps the caller's role
        let child_role = if node.children.len() == 1 {
            role
        } else {
            SymbolRole::Identifier
        };
        for child in &node.children {
            self.convert_node(buffer, child, child_role);
            push_latex(buffer, child.tail.trim());
        }
    }

    fn render_row(&self, node: &SourceNode) -> String {
        let mut buffer = String::new();
        self.convert_row(&mut buffer, node, SymbolRole::Identifier);
        buffer.trim().to_string()
    }

    fn convert_fraction(&self, buffer: &mut String, node: &SourceNode) {
        let ops = operands(node, 2);
        let numerator = self.render(ops[0], SymbolRole::Identifier);
        let denominator = self.render(ops[1], SymbolRole::Identifier);
        let command = match node.attr("linethickness").map(str::trim) {
            Some("0") | Some("0px") | Some("0pt") | Some("0em") => "\\binom",
            _ => "\\frac",
        };
        push_latex(buffer, &format!("{}{{{}}}{{{}}}", command, numerator, denominator));
    }

    fn convert_scripts(&self, buffer: &mut String, node: &SourceNode, construct: MathConstruct) {
        let rendered: Vec<String> = operands(node, construct.arity().unwrap_or(2))
            .into_iter()
            .map(|op| self.render(op, SymbolRole::Identifier))
            .collect();
        let base = script_base(&rendered[0]);
        let latex = match construct {
            MathConstruct::Sub => format!("{}_{{{}}}", base, rendered[1]),
            MathConstruct::Sup => format!("{}^{{{}}}", base, rendered[1]),
            _ => format!("{}_{{{}}}^{{{}}}", base, rendered[1], rendered[2]),
        };
        push_latex(buffer, &latex);
    }

    fn convert_under(&self, buffer: &mut String, node: &SourceNode) {
        let ops = operands(node, 2);
        let script_text = ops[1].map(|n| n.itertext()).unwrap_or_default();

        // An accented base is an ordinary symbol, not a limit operator
        if let Some(accent) = under_accent(&script_text) {
            let base = self.render(ops[0], SymbolRole::Identifier);
            push_latex(buffer, &format!("{}{{{}}}", accent, base));
            return;
        }
        let base = self.render(ops[0], SymbolRole::LimitBase);
        let under = self.render(ops[1], SymbolRole::Identifier);
        if under.is_empty() {
            push_latex(buffer, &base);
        } else if is_large_operator(&base) {
            push_latex(buffer, &format!("{}_{{{}}}", base, under));
        } else {
            push_latex(buffer, &format!("\\underset{{{}}}{{{}}}", under, base));
        }
    }

    fn convert_over(&self, buffer: &mut String, node: &SourceNode) {
        let ops = operands(node, 2);
        let script_text = ops[1].map(|n| n.itertext()).unwrap_or_default();

        // An accented base is an ordinary symbol, not a limit operator
        if let Some(accent) = over_accent(&script_text) {
            let base = self.render(ops[0], SymbolRole::Identifier);
            push_latex(buffer, &format!("{}{{{}}}", accent, base));
            return;
        }
        let base = self.render(ops[0], SymbolRole::LimitBase);
        let over = self.render(ops[1], SymbolRole::Identifier);
        if over.is_empty() {
            push_latex(buffer, &base);
        } else if is_large_operator(&base) {
            push_latex(buffer, &format!("{}^{{{}}}", base, over));
        } else {
            push_latex(buffer, &format!("\\overset{{{}}}{{{}}}", over, base));
        }
    }

    fn convert_table(&self, buffer: &mut String, node: &SourceNode) {
        let rows: Vec<Vec<String>> = node
            .children
            .iter()
            .filter(|row| MathConstruct::of(row) != Some(MathConstruct::Ignored))
            .map(|row| match MathConstruct::of(row) {
                Some(MathConstruct::TableRow) => self.render_cells(&row.children),
                // The first cell of a labeled row is its equation label
                Some(MathConstruct::LabeledRow) => self.render_cells(row.children.get(1..).unwrap_or(&[])),
                _ => vec![self.render(Some(row), SymbolRole::Identifier)],
            })
            .collect();
        convert_matrix(buffer, &rows);
    }

    fn render_cells(&self, cells: &[SourceNode]) -> Vec<String> {
        cells
            .iter()
            .map(|cell| self.render(Some(cell), SymbolRole::Identifier))
            .collect()
    }

    fn convert_enclose(&self, buffer: &mut String, node: &SourceNode) {
        let inner = self.render_row(node);
        let notation = node.attr("notation").unwrap_or("longdiv");
        let latex = if notation.contains("box") {
            format!("\\boxed{{{}}}", inner)
        } else if notation.contains("radical") {
            format!("\\sqrt{{{}}}", inner)
        } else if notation.split_whitespace().any(|n| n == "top") {
            format!("\\overline{{{}}}", inner)
        } else if notation.split_whitespace().any(|n| n == "bottom") {
            format!("\\underline{{{}}}", inner)
        } else {
            inner
        };
        push_latex(buffer, &latex);
    }
}

/// Substitute each glyph of token text through the symbol table.
fn push_symbols(buffer: &mut String, text: &str, role: SymbolRole) {
    let mut literal = [0u8; 4];
    for ch in text.chars() {
        match lookup_symbol(ch, role) {
            Some(latex) => push_latex(buffer, latex),
            None => push_latex(buffer, ch.encode_utf8(&mut literal)),
        }
    }
}

/// An empty base still needs a group to attach scripts to.
fn script_base(base: &str) -> &str {
    if base.is_empty() { "{}" } else { base }
}

/// Rewrite a MathML subtree to LaTeX with the default rewriter.
pub fn mathml_to_latex(node: &SourceNode) -> String {
    MathRewriter::new().rewrite(node)
}
