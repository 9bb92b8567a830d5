//! Core trait for PreTeXt conversion.
//!
//! This module defines the `ToPretext` trait that enables source types to be
//! converted to PreTeXt markup.

use super::config::PretextOptions;
use super::context::ConversionContext;
use super::converter::Converter;
use super::ids::SiblingIds;
use crate::cnxml::{CnxmlDocument, SourceNode, block_kind};
use crate::common::Result;

/// Core trait for types that can be converted to PreTeXt.
///
/// # Examples
///
/// ```rust
/// use cnxml2ptx::{CnxmlDocument, pretext::ToPretext};
///
/// # fn main() -> Result<(), cnxml2ptx::Error> {
/// let doc = CnxmlDocument::parse(
///     "m46925",
///     r#"<document xmlns="http://cnx.rice.edu/cnxml"><title>Sampling</title>
///        <content><para>Samples vary.</para></content></document>"#,
/// )?;
/// let ptx = doc.to_pretext()?;
/// assert!(ptx.contains("<p>Samples vary.</p>"));
/// # Ok(())
/// # }
/// ```
pub trait ToPretext {
    /// Convert this item to PreTeXt with default options.
    fn to_pretext(&self) -> Result<String> {
        self.to_pretext_with_options(&PretextOptions::default())
    }

    /// Convert this item to PreTeXt with custom options.
    fn to_pretext_with_options(&self, options: &PretextOptions) -> Result<String>;
}

impl ToPretext for CnxmlDocument {
    /// A `section` identified by the module id.
    fn to_pretext_with_options(&self, options: &PretextOptions) -> Result<String> {
        let converter = Converter::new(options);
        Ok(converter.convert_unit(self, self.module_id(), None, ConversionContext::default()))
    }
}

impl ToPretext for SourceNode {
    /// A block element renders through its emitter; anything else renders
    /// its mixed content as a run of blocks.
    fn to_pretext_with_options(&self, options: &PretextOptions) -> Result<String> {
        let converter = Converter::new(options);
        let ctx = ConversionContext::default();
        Ok(match block_kind(self) {
            Some(kind) => converter.convert_block(kind, self, &mut SiblingIds::detached(), ctx),
            None => converter.convert_body(self, self.id().unwrap_or(""), ctx),
        })
    }
}
