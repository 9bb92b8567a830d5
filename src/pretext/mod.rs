//! CNXML to PreTeXt conversion.
//!
//! The [`Converter`] walks a module's content root, dispatching each block
//! child through the fixed vocabulary table to an emitter and rendering mixed
//! text through the inline renderer. Every emitter returns a complete string;
//! parents concatenate what their children return.
//!
//! # Example
//!
//! ```rust
//! use cnxml2ptx::CnxmlDocument;
//! use cnxml2ptx::pretext::{ConversionContext, Converter, PretextOptions};
//!
//! # fn main() -> Result<(), cnxml2ptx::Error> {
//! let doc = CnxmlDocument::parse(
//!     "m1",
//!     r#"<document xmlns="http://cnx.rice.edu/cnxml"><content>
//!          <para>The <emphasis effect="bold">median</emphasis> splits data.</para>
//!        </content></document>"#,
//! )?;
//! let options = PretextOptions::default();
//! let ptx = Converter::new(&options).convert_unit(&doc, "sec-median", Some("Median"), ConversionContext::default());
//! assert!(ptx.contains("<p>The <term>median</term> splits data.</p>"));
//! # Ok(())
//! # }
//! ```

mod blocks;
pub mod config;
pub mod context;
mod converter;
mod ids;
mod inline;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{PretextOptions, TitleMarkup};
pub use context::{ConversionContext, RenderMode};
pub use converter::{Converter, division_tag};
pub use inline::is_math_variable;
pub use traits::ToPretext;
