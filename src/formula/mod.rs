//! Embedded math rewriting: MathML expression trees to LaTeX.
//!
//! The rewriter is total. Unknown elements concatenate their children,
//! operands missing from fixed-arity constructs render as empty groups, and
//! whitespace-only text never produces separators.
//!
//! ```
//! use cnxml2ptx::cnxml::parse_document;
//! use cnxml2ptx::formula::mathml_to_latex;
//!
//! let math = parse_document(
//!     r#"<math xmlns="http://www.w3.org/1998/Math/MathML">
//!          <mfrac><mi>x</mi><mi>σ</mi></mfrac>
//!        </math>"#,
//! )
//! .unwrap();
//! assert_eq!(mathml_to_latex(&math), "\\frac{x}{\\sigma}");
//! ```

pub mod arity;
mod matrix;
mod rewriter;
pub mod symbols;
mod utils;

pub use arity::MathConstruct;
pub use rewriter::{MathRewriter, mathml_to_latex};
pub use symbols::{SymbolRole, lookup_symbol};
