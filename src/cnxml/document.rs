use crate::cnxml::node::SourceNode;
use crate::cnxml::parser::{parse_bytes, parse_document};
use crate::common::{Namespace, Result};

/// One parsed source module.
#[derive(Debug, Clone)]
pub struct CnxmlDocument {
    module_id: String,
    root: SourceNode,
}

impl CnxmlDocument {
    pub fn from_bytes(module_id: impl Into<String>, data: &[u8]) -> Result<Self> {
        Ok(Self {
            module_id: module_id.into(),
            root: parse_bytes(data)?,
        })
    }

    pub fn parse(module_id: impl Into<String>, xml: &str) -> Result<Self> {
        Ok(Self {
            module_id: module_id.into(),
            root: parse_document(xml)?,
        })
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn root(&self) -> &SourceNode {
        &self.root
    }

    /// The module's `content` element, if any.
    pub fn content(&self) -> Option<&SourceNode> {
        if self.root.is("content") {
            return Some(&self.root);
        }
        self.root.descendant("content")
    }

    /// The module's `glossary` element, if any.
    pub fn glossary(&self) -> Option<&SourceNode> {
        self.root.descendant("glossary")
    }

    /// Document title: the root `title` child, falling back to `md:title`.
    pub fn title(&self) -> Option<String> {
        let literal = self
            .root
            .title_child()
            .or_else(|| find_metadata_title(&self.root))?;
        let text = literal.itertext();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

fn find_metadata_title(node: &SourceNode) -> Option<&SourceNode> {
    node.children.iter().find_map(|c| {
        if c.name.ns == Namespace::Metadata && c.local_name() == "title" {
            Some(c)
        } else {
            find_metadata_title(c)
        }
    })
}
