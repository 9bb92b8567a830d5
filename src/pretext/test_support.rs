//! Fixtures shared by the converter tests.

use super::config::PretextOptions;
use super::context::ConversionContext;
use super::converter::Converter;
use crate::cnxml::{CnxmlDocument, SourceNode, parse_document};
use crate::common::namespace::{CNXML_NS, MATHML_NS};

/// A module `m1` titled `T` whose content element holds `inner`.
pub(crate) fn module(inner: &str) -> CnxmlDocument {
    let xml = format!(
        r#"<document xmlns="{}" xmlns:m="{}" id="m1"><title>T</title><content>{}</content></document>"#,
        CNXML_NS, MATHML_NS, inner
    );
    CnxmlDocument::parse("m1", &xml).unwrap()
}

/// Parse a fragment with the content namespace as default and `m:` bound
/// to MathML.
pub(crate) fn fragment(xml: &str) -> SourceNode {
    let wrapped = format!(r#"<wrapper xmlns="{}" xmlns:m="{}">{}</wrapper>"#, CNXML_NS, MATHML_NS, xml);
    parse_document(&wrapped)
        .unwrap()
        .children
        .into_iter()
        .next()
        .unwrap()
}

/// Convert the children of a fragment's root with default options.
pub(crate) fn convert_fragment(xml: &str, parent_id: &str) -> String {
    let options = PretextOptions::default();
    Converter::new(&options).convert_blocks(&fragment(xml), parent_id, ConversionContext::default())
}
