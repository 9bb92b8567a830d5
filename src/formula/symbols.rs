// Symbol conversion to LaTeX
//
// Static lookup tables from MathML glyphs to LaTeX commands. The same glyph
// may render differently depending on the position it occupies, so lookups
// are keyed on the symbol together with its role.

use phf::{phf_map, phf_set};

/// Position a leaf symbol occupies in its expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SymbolRole {
    /// Identifiers, numbers and text
    #[default]
    Identifier,
    /// Content of an `mo` element
    Operator,
    /// Base operand of an under/over construct
    LimitBase,
}

/// Unicode to LaTeX mapping for mathematical symbols
static UNICODE_TO_LATEX: phf::Map<char, &'static str> = phf_map! {
    // Greek letters
    'α' => "\\alpha",
    'β' => "\\beta",
    'γ' => "\\gamma",
    'δ' => "\\delta",
    'ε' => "\\epsilon",
    'ϵ' => "\\epsilon",
    'ζ' => "\\zeta",
    'η' => "\\eta",
    'θ' => "\\theta",
    'ϑ' => "\\vartheta",
    'ι' => "\\iota",
    'κ' => "\\kappa",
    'λ' => "\\lambda",
    'μ' => "\\mu",
    'µ' => "\\mu",
    'ν' => "\\nu",
    'ξ' => "\\xi",
    'ο' => "o",
    'π' => "\\pi",
    'ρ' => "\\rho",
    'σ' => "\\sigma",
    'ς' => "\\varsigma",
    'τ' => "\\tau",
    'υ' => "\\upsilon",
    'φ' => "\\phi",
    'ϕ' => "\\phi",
    'χ' => "\\chi",
    'ψ' => "\\psi",
    'ω' => "\\omega",

    // Uppercase Greek
    'Γ' => "\\Gamma",
    'Δ' => "\\Delta",
    'Θ' => "\\Theta",
    'Λ' => "\\Lambda",
    'Ξ' => "\\Xi",
    'Π' => "\\Pi",
    'Σ' => "\\Sigma",
    'Υ' => "\\Upsilon",
    'Φ' => "\\Phi",
    'Ψ' => "\\Psi",
    'Ω' => "\\Omega",

    // Dashes and tildes that stand for arithmetic or relations
    '−' => "-",
    '–' => "-",
    '∼' => "\\sim",
    '~' => "\\sim",

    // Operators and symbols
    '∑' => "\\sum",
    '∏' => "\\prod",
    '∐' => "\\coprod",
    '∫' => "\\int",
    '∮' => "\\oint",
    '√' => "\\surd",
    '∂' => "\\partial",
    '∇' => "\\nabla",
    '∞' => "\\infty",
    '∅' => "\\emptyset",
    '∀' => "\\forall",
    '∃' => "\\exists",
    '∄' => "\\nexists",
    '∴' => "\\therefore",
    '∵' => "\\because",
    '⊂' => "\\subset",
    '⊃' => "\\supset",
    '⊆' => "\\subseteq",
    '⊇' => "\\supseteq",
    '∈' => "\\in",
    '∉' => "\\notin",
    '∩' => "\\cap",
    '∪' => "\\cup",
    '∖' => "\\setminus",
    '≠' => "\\neq",
    '≤' => "\\leq",
    '≥' => "\\geq",
    '≦' => "\\leqq",
    '≧' => "\\geqq",
    '≈' => "\\approx",
    '≅' => "\\cong",
    '∝' => "\\propto",
    '≡' => "\\equiv",
    '≪' => "\\ll",
    '≫' => "\\gg",
    '∣' => "\\mid",
    '→' => "\\to",
    '←' => "\\gets",
    '↔' => "\\leftrightarrow",
    '↑' => "\\uparrow",
    '↓' => "\\downarrow",
    '⇒' => "\\Rightarrow",
    '⇐' => "\\Leftarrow",
    '⇔' => "\\Leftrightarrow",
    '±' => "\\pm",
    '∓' => "\\mp",
    '×' => "\\times",
    '÷' => "\\div",
    '⋅' => "\\cdot",
    '·' => "\\cdot",
    '∙' => "\\cdot",
    '∗' => "\\ast",
    '∘' => "\\circ",
    '∧' => "\\wedge",
    '∨' => "\\vee",
    '¬' => "\\neg",
    '⊕' => "\\oplus",
    '⊗' => "\\otimes",
    '△' => "\\triangle",
    '∠' => "\\angle",
    '⊥' => "\\perp",
    '∥' => "\\parallel",
    '…' => "\\ldots",
    '⋯' => "\\cdots",
    '⋮' => "\\vdots",
    '⋱' => "\\ddots",
    '°' => "^{\\circ}",
    '′' => "'",
    '″' => "''",
    '‴' => "'''",
    'ℓ' => "\\ell",
    'ℏ' => "\\hbar",
    'ℕ' => "\\mathbb{N}",
    'ℤ' => "\\mathbb{Z}",
    'ℚ' => "\\mathbb{Q}",
    'ℝ' => "\\mathbb{R}",
    'ℂ' => "\\mathbb{C}",

    // Characters LaTeX reserves
    '{' => "\\{",
    '}' => "\\}",
    '%' => "\\%",
    '#' => "\\#",
    '&' => "\\&",
    '$' => "\\$",
    '\u{a0}' => "~",
};

/// Glyphs that read as operators rather than letters inside `mo`
static OPERATOR_OVERRIDES: phf::Map<char, &'static str> = phf_map! {
    'Σ' => "\\sum",
    'Π' => "\\prod",
};

/// Glyphs that carry limits when they are the base of an under/over construct
static LIMIT_OVERRIDES: phf::Map<char, &'static str> = phf_map! {
    'Σ' => "\\sum",
    'Π' => "\\prod",
    '∪' => "\\bigcup",
    '∩' => "\\bigcap",
    '∨' => "\\bigvee",
    '∧' => "\\bigwedge",
    '⊕' => "\\bigoplus",
    '⊗' => "\\bigotimes",
};

/// Multi-letter identifiers typeset as upright function names
static FUNCTION_NAMES: phf::Set<&'static str> = phf_set! {
    "sin", "cos", "tan", "cot", "sec", "csc",
    "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh", "coth",
    "log", "ln", "lg", "exp",
    "lim", "liminf", "limsup", "max", "min", "sup", "inf",
    "det", "dim", "gcd", "deg", "arg", "ker", "hom", "Pr",
};

/// Commands that typeset their scripts as limits
static LARGE_OPERATORS: phf::Set<&'static str> = phf_set! {
    "\\sum", "\\prod", "\\coprod", "\\int", "\\oint",
    "\\bigcup", "\\bigcap", "\\bigvee", "\\bigwedge", "\\bigoplus", "\\bigotimes",
    "\\lim", "\\liminf", "\\limsup", "\\max", "\\min", "\\sup", "\\inf",
};

/// Fence glyphs as `\left`/`\right` delimiters
static DELIMITERS: phf::Map<char, &'static str> = phf_map! {
    '(' => "(",
    ')' => ")",
    '[' => "[",
    ']' => "]",
    '{' => "\\{",
    '}' => "\\}",
    '|' => "|",
    '∣' => "|",
    '‖' => "\\|",
    '⟨' => "\\langle",
    '⟩' => "\\rangle",
    '〈' => "\\langle",
    '〉' => "\\rangle",
    '⌊' => "\\lfloor",
    '⌋' => "\\rfloor",
    '⌈' => "\\lceil",
    '⌉' => "\\rceil",
};

/// Accent glyphs placed over a base, as single-argument commands
static OVER_ACCENTS: phf::Map<char, &'static str> = phf_map! {
    '¯' => "\\overline",
    '‾' => "\\overline",
    '_' => "\\overline",
    '―' => "\\overline",
    '^' => "\\hat",
    'ˆ' => "\\hat",
    '\u{302}' => "\\hat",
    '~' => "\\tilde",
    '˜' => "\\tilde",
    '\u{303}' => "\\tilde",
    '→' => "\\vec",
    '\u{20d7}' => "\\vec",
    '˙' => "\\dot",
    '.' => "\\dot",
    '¨' => "\\ddot",
    '⏞' => "\\overbrace",
    '︷' => "\\overbrace",
};

/// Accent glyphs placed under a base
static UNDER_ACCENTS: phf::Map<char, &'static str> = phf_map! {
    '¯' => "\\underline",
    '_' => "\\underline",
    '‾' => "\\underline",
    '⏟' => "\\underbrace",
    '︸' => "\\underbrace",
};

/// Look up the LaTeX form of one glyph in the given role.
///
/// Returns `None` when the glyph has no mapping and should be kept literally.
pub fn lookup_symbol(symbol: char, role: SymbolRole) -> Option<&'static str> {
    let overridden = match role {
        SymbolRole::Identifier => None,
        SymbolRole::Operator => OPERATOR_OVERRIDES.get(&symbol),
        SymbolRole::LimitBase => LIMIT_OVERRIDES.get(&symbol),
    };
    overridden.or_else(|| UNICODE_TO_LATEX.get(&symbol)).copied()
}

/// `\name` when `text` is a known function name.
pub fn function_name(text: &str) -> Option<String> {
    FUNCTION_NAMES
        .contains(text)
        .then(|| format!("\\{}", text))
}

/// Whether rendered LaTeX is a command that takes limits.
pub fn is_large_operator(latex: &str) -> bool {
    LARGE_OPERATORS.contains(latex.trim())
}

/// Delimiter for `\left`/`\right`; an empty fence becomes `.`.
pub fn delimiter(glyph: &str) -> String {
    let glyph = glyph.trim();
    let mut chars = glyph.chars();
    match (chars.next(), chars.next()) {
        (None, _) => ".".to_string(),
        (Some(c), None) => DELIMITERS
            .get(&c)
            .map_or_else(|| c.to_string(), |d| (*d).to_string()),
        _ => glyph.to_string(),
    }
}

/// Accent command for a lone over-script glyph.
pub fn over_accent(glyph: &str) -> Option<&'static str> {
    single_char(glyph).and_then(|c| OVER_ACCENTS.get(&c).copied())
}

/// Accent command for a lone under-script glyph.
pub fn under_accent(glyph: &str) -> Option<&'static str> {
    single_char(glyph).and_then(|c| UNDER_ACCENTS.get(&c).copied())
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_lookup() {
        assert_eq!(lookup_symbol('μ', SymbolRole::Identifier), Some("\\mu"));
        assert_eq!(lookup_symbol('Ω', SymbolRole::Operator), Some("\\Omega"));
        assert_eq!(lookup_symbol('x', SymbolRole::Identifier), None);
    }

    #[test]
    fn test_sigma_depends_on_role() {
        assert_eq!(lookup_symbol('Σ', SymbolRole::Identifier), Some("\\Sigma"));
        assert_eq!(lookup_symbol('Σ', SymbolRole::Operator), Some("\\sum"));
        assert_eq!(lookup_symbol('Σ', SymbolRole::LimitBase), Some("\\sum"));
        assert_eq!(lookup_symbol('∪', SymbolRole::Operator), Some("\\cup"));
        assert_eq!(lookup_symbol('∪', SymbolRole::LimitBase), Some("\\bigcup"));
    }

    #[test]
    fn test_minus_signs() {
        assert_eq!(lookup_symbol('−', SymbolRole::Operator), Some("-"));
        assert_eq!(lookup_symbol('–', SymbolRole::Operator), Some("-"));
    }

    #[test]
    fn test_function_names() {
        assert_eq!(function_name("sin").as_deref(), Some("\\sin"));
        assert_eq!(function_name("SD"), None);
        assert!(is_large_operator("\\lim"));
        assert!(!is_large_operator("x"));
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(delimiter("("), "(");
        assert_eq!(delimiter("{"), "\\{");
        assert_eq!(delimiter(""), ".");
        assert_eq!(delimiter("§"), "§");
    }

    #[test]
    fn test_accents() {
        assert_eq!(over_accent("¯"), Some("\\overline"));
        assert_eq!(over_accent(" ^ "), Some("\\hat"));
        assert_eq!(over_accent("ab"), None);
        assert_eq!(under_accent("⏟"), Some("\\underbrace"));
    }
}
