//! cnxml2ptx - Convert CNXML textbook modules to PreTeXt
//!
//! This library rewrites textbook content stored as CNXML (with embedded
//! MathML) into PreTeXt markup, keeping section nesting, mixed-content
//! paragraphs, lists, tables, figures, worked examples, notes, exercises and
//! math.
//!
//! # Features
//!
//! - **Source model**: Namespace-aware CNXML parsing into an element tree with
//!   text and tail placement
//! - **Math rewriting**: MathML to LaTeX with context-sensitive symbols
//! - **Structural conversion**: Table-driven block dispatch with deterministic
//!   identifiers
//! - **Chapter assembly**: Multi-module chapters written as single files,
//!   chapters converted in parallel
//! - **Glossary check**: Source glossary terms missing from converted output
//!
//! # Example - Converting a module
//!
//! ```rust
//! use cnxml2ptx::{CnxmlDocument, ToPretext};
//!
//! # fn main() -> Result<(), cnxml2ptx::Error> {
//! let doc = CnxmlDocument::parse(
//!     "m46925",
//!     r#"<document xmlns="http://cnx.rice.edu/cnxml" xmlns:m="http://www.w3.org/1998/Math/MathML">
//!          <title>Measures of Center</title>
//!          <content>
//!            <para>The <emphasis effect="bold">mean</emphasis> is <m:math><m:mi>μ</m:mi></m:math>.</para>
//!          </content>
//!        </document>"#,
//! )?;
//! let ptx = doc.to_pretext()?;
//! assert!(ptx.contains("<p>The <term>mean</term> is <m>\\mu</m>.</p>"));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Rewriting MathML
//!
//! ```rust
//! use cnxml2ptx::cnxml::parse_document;
//! use cnxml2ptx::formula::mathml_to_latex;
//!
//! # fn main() -> Result<(), cnxml2ptx::Error> {
//! let math = parse_document(
//!     r#"<math xmlns="http://www.w3.org/1998/Math/MathML"><mfrac><mi>x</mi><mn>2</mn></mfrac></math>"#,
//! )?;
//! assert_eq!(mathml_to_latex(&math), "\\frac{x}{2}");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Converting a chapter
//!
//! ```no_run
//! use cnxml2ptx::chapter::{BookManifest, DirectorySource, write_book};
//! use cnxml2ptx::pretext::PretextOptions;
//!
//! # fn main() -> Result<(), cnxml2ptx::Error> {
//! let manifest = BookManifest::from_path("book.yaml")?;
//! let source = DirectorySource::new("modules");
//! for (chapter, result) in write_book(&manifest, &source, &PretextOptions::default(), "source") {
//!     match result {
//!         Ok(path) => println!("{}: {}", chapter, path.display()),
//!         Err(e) => eprintln!("{}: {}", chapter, e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Shared infrastructure: errors, namespaces, XML escaping and BOM handling
pub mod common;

/// CNXML parsing and vocabulary classification
pub mod cnxml;

/// MathML to LaTeX rewriting
pub mod formula;

/// PreTeXt emission
pub mod pretext;

/// Multi-module chapter assembly
pub mod chapter;

/// Glossary coverage check
pub mod glossary;

// Re-export commonly used types for convenience
pub use cnxml::{CnxmlDocument, SourceNode};
pub use common::{Error, Result};
pub use formula::mathml_to_latex;
pub use pretext::{PretextOptions, ToPretext};
