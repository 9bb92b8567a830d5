// Matrix and fence conversion to LaTeX

use super::symbols::delimiter;
use super::utils::push_latex;

/// Write rows of rendered cells as a `matrix` environment.
///
/// Cells are joined with ` & `, rows with ` \\ `. Rows may be ragged.
pub fn convert_matrix(buffer: &mut String, rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let estimated: usize = rows.iter().flatten().map(|c| c.len() + 3).sum();
    buffer.reserve(estimated + 32);

    push_latex(buffer, "\\begin{matrix}");
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            buffer.push_str(" \\\\ ");
        }
        for (j, cell) in row.iter().enumerate() {
            if j > 0 {
                buffer.push_str(" & ");
            }
            buffer.push_str(cell);
        }
    }
    buffer.push_str("\\end{matrix}");
}

/// Wrap rendered operands in stretchy delimiters.
///
/// `separators` follows MathML: the i-th glyph separates operands i and i+1,
/// and the last glyph repeats when there are more gaps than glyphs.
pub fn convert_fenced(buffer: &mut String, open: &str, close: &str, separators: &str, items: &[String]) {
    let separators: Vec<char> = separators.chars().filter(|c| !c.is_whitespace()).collect();

    push_latex(buffer, "\\left");
    buffer.push_str(&delimiter(open));
    for (i, item) in items.iter().enumerate() {
        if i > 0
            && let Some(sep) = separators.get(i - 1).or(separators.last())
        {
            buffer.push(*sep);
        }
        push_latex(buffer, item);
    }
    push_latex(buffer, "\\right");
    buffer.push_str(&delimiter(close));
}
