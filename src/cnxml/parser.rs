//! Build a [`SourceNode`] tree from CNXML bytes with `quick-xml`.
//!
//! Whitespace is kept as-is: mixed content depends on it. Comments,
//! processing instructions and the document type declaration are skipped.

use crate::cnxml::node::{QName, SourceNode};
use crate::common::bom::decode_utf8;
use crate::common::xml::{resolve_entity, unescape_xml};
use crate::common::{Error, NamespaceScope, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parse raw module bytes. A UTF-8 byte-order mark is skipped.
pub fn parse_bytes(data: &[u8]) -> Result<SourceNode> {
    parse_document(decode_utf8(data)?)
}

/// Parse a complete document and return its root element.
///
/// Fails on markup that is not well-formed, on undeclared entity references,
/// and when the input does not contain exactly one root element.
pub fn parse_document(xml: &str) -> Result<SourceNode> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut scope = NamespaceScope::new();
    let mut stack: Vec<SourceNode> = Vec::new();
    let mut root: Option<SourceNode> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                ensure_single_root(&root, position)?;
                let element = open_element(e, &mut scope)?;
                stack.push(element);
            },
            Ok(Event::Empty(ref e)) => {
                ensure_single_root(&root, position)?;
                let element = open_element(e, &mut scope)?;
                scope.pop();
                close_element(element, &mut stack, &mut root);
            },
            Ok(Event::End(_)) => {
                scope.pop();
                let element = stack.pop().ok_or_else(|| Error::Xml {
                    message: "end tag without matching start tag".to_string(),
                    position,
                })?;
                close_element(element, &mut stack, &mut root);
            },
            Ok(Event::Text(ref t)) => {
                let text = std::str::from_utf8(t)?;
                push_text(&mut stack, text, position)?;
            },
            Ok(Event::CData(ref t)) => {
                let text = std::str::from_utf8(t)?;
                push_text(&mut stack, text, position)?;
            },
            Ok(Event::GeneralRef(ref r)) => {
                let name = std::str::from_utf8(r)?;
                let resolved = resolve_entity(name).ok_or_else(|| Error::Xml {
                    message: format!("unknown entity reference &{};", name),
                    position,
                })?;
                let mut utf8 = [0u8; 4];
                push_text(&mut stack, resolved.encode_utf8(&mut utf8), position)?;
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml {
                    message: e.to_string(),
                    position: reader.error_position(),
                });
            },
            _ => {},
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(Error::MalformedDocument(format!(
            "unclosed element <{}>",
            open.name.local
        )));
    }
    root.ok_or_else(|| Error::MalformedDocument("no root element".to_string()))
}

fn ensure_single_root(root: &Option<SourceNode>, position: u64) -> Result<()> {
    if root.is_some() {
        return Err(Error::Xml {
            message: "content after the root element".to_string(),
            position,
        });
    }
    Ok(())
}

fn open_element(e: &BytesStart<'_>, scope: &mut NamespaceScope) -> Result<SourceNode> {
    let mut bindings = Vec::new();
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = unescape_xml(std::str::from_utf8(&attr.value)?);

        if key == "xmlns" {
            bindings.push((String::new(), value));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            bindings.push((prefix.to_string(), value));
        } else {
            attributes.push((key.to_string(), value));
        }
    }

    // Declarations on an element apply to its own name
    scope.push(bindings);
    let name = e.name();
    let qname = std::str::from_utf8(name.as_ref())?;
    let (ns, local) = scope.resolve_element(qname);

    Ok(SourceNode {
        name: QName::new(ns, local),
        attributes,
        text: String::new(),
        children: Vec::new(),
        tail: String::new(),
    })
}

fn close_element(element: SourceNode, stack: &mut [SourceNode], root: &mut Option<SourceNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// Append character data at the current position of the open element.
fn push_text(stack: &mut [SourceNode], text: &str, position: u64) -> Result<()> {
    let Some(current) = stack.last_mut() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(Error::Xml {
            message: "text outside the root element".to_string(),
            position,
        });
    };

    let target = match current.children.last_mut() {
        Some(last) => &mut last.tail,
        None => &mut current.text,
    };
    if text.contains('\r') {
        target.push_str(&text.replace("\r\n", "\n"));
    } else {
        target.push_str(text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Namespace;

    const MODULE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- module m1 -->
<document xmlns="http://cnx.rice.edu/cnxml" xmlns:m="http://www.w3.org/1998/Math/MathML"
          xmlns:md="http://cnx.rice.edu/mdml" id="m1">
  <title>Sampling</title>
  <metadata><md:title>Sampling and Data</md:title></metadata>
  <content>
    <para id="p1">Mean <emphasis effect="bold">value</emphasis> is <m:math><m:mi>&#956;</m:mi></m:math>.</para>
  </content>
</document>"#;

    #[test]
    fn test_parse_namespaces() {
        let root = parse_document(MODULE).unwrap();
        assert_eq!(root.name.ns, Namespace::Content);
        assert_eq!(root.local_name(), "document");
        assert_eq!(root.attr("id"), Some("m1"));
        // namespace declarations are not attributes
        assert_eq!(root.attributes.len(), 1);

        let metadata = root.child("metadata").unwrap();
        assert_eq!(metadata.children[0].name.ns, Namespace::Metadata);
        let math = root.find_math().unwrap();
        assert_eq!(math.name.ns, Namespace::Math);
        assert_eq!(math.children[0].text, "μ");
    }

    #[test]
    fn test_text_and_tail_placement() {
        let root = parse_document(MODULE).unwrap();
        let para = root.descendant("para").unwrap();
        assert_eq!(para.text, "Mean ");
        assert_eq!(para.children[0].text, "value");
        assert_eq!(para.children[0].tail, " is ");
        assert_eq!(para.children[1].tail, ".");
        assert_eq!(para.itertext(), "Mean value is μ.");
    }

    #[test]
    fn test_entities_and_cdata() {
        let root = parse_document("<p a=\"x &amp; y\">a &lt; b<![CDATA[ & c]]></p>").unwrap();
        assert_eq!(root.attr("a"), Some("x & y"));
        assert_eq!(root.text, "a < b & c");
    }

    #[test]
    fn test_default_namespace_override_for_math() {
        let root = parse_document(
            "<para xmlns=\"http://cnx.rice.edu/cnxml\"><math xmlns=\"http://www.w3.org/1998/Math/MathML\"><mi>x</mi></math></para>",
        )
        .unwrap();
        assert!(root.is("para"));
        assert!(root.children[0].is_math_ns());
        assert!(root.children[0].children[0].is_math_ns());
    }

    #[test]
    fn test_bom_is_skipped() {
        let mut data = vec![0xEF, 0xBB, 0xBF];
        data.extend_from_slice(b"<document/>");
        assert_eq!(parse_bytes(&data).unwrap().local_name(), "document");
    }

    #[test]
    fn test_malformed_input_fails() {
        for bad in [
            "<para><emphasis></para>",
            "<para>",
            "",
            "<a/><b/>",
            "<a>&bogus;</a>",
            "stray<a/>",
        ] {
            let err = parse_document(bad).unwrap_err();
            assert!(err.is_malformed_input(), "{bad:?} gave {err}");
        }
    }
}
