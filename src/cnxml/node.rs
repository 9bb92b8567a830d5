//! In-memory source tree with element-tree text placement.
//!
//! Character data before an element's first child lives in `text`; character
//! data after a child, up to the next sibling or the parent's end tag, lives
//! in that child's `tail`. Document order is `text`, then each child followed
//! by its tail.

use crate::common::Namespace;

/// Qualified element name, resolved to its namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub ns: Namespace,
    pub local: String,
}

impl QName {
    pub fn new(ns: Namespace, local: impl Into<String>) -> Self {
        Self {
            ns,
            local: local.into(),
        }
    }
}

/// A parsed source element.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceNode {
    pub name: QName,
    /// Attributes in document order, keyed by their qualified source name
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<SourceNode>,
    pub tail: String,
}

impl SourceNode {
    pub fn new(ns: Namespace, local: impl Into<String>) -> Self {
        Self {
            name: QName::new(ns, local),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            tail: String::new(),
        }
    }

    /// Convenience constructor for a content-namespace element.
    pub fn content(local: impl Into<String>) -> Self {
        Self::new(Namespace::Content, local)
    }

    /// Convenience constructor for a MathML element.
    pub fn math(local: impl Into<String>) -> Self {
        Self::new(Namespace::Math, local)
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    pub fn with_child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    /// Whether this is the content-vocabulary element `local`.
    #[inline]
    pub fn is(&self, local: &str) -> bool {
        self.name.ns.is_content() && self.name.local == local
    }

    #[inline]
    pub fn is_math_ns(&self) -> bool {
        self.name.ns.is_math()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The `id` attribute, when present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    /// First direct content-vocabulary child named `local`.
    pub fn child(&self, local: &str) -> Option<&SourceNode> {
        self.children.iter().find(|c| c.is(local))
    }

    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a SourceNode> {
        self.children.iter().filter(move |c| c.is(local))
    }

    /// First content-vocabulary descendant named `local`, in document order.
    pub fn descendant(&self, local: &str) -> Option<&SourceNode> {
        self.children.iter().find_map(|c| {
            if c.is(local) {
                Some(c)
            } else {
                c.descendant(local)
            }
        })
    }

    /// All content-vocabulary descendants named `local`, in document order.
    pub fn descendants_named(&self, local: &str) -> Vec<&SourceNode> {
        let mut found = Vec::new();
        self.collect_named(local, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, local: &str, found: &mut Vec<&'a SourceNode>) {
        for child in &self.children {
            if child.is(local) {
                found.push(child);
            }
            child.collect_named(local, found);
        }
    }

    /// This node if it is a MathML `math` element, else its first such descendant.
    pub fn find_math(&self) -> Option<&SourceNode> {
        if self.is_math_ns() && self.name.local == "math" {
            return Some(self);
        }
        self.children.iter().find_map(SourceNode::find_math)
    }

    /// The direct `title` child.
    pub fn title_child(&self) -> Option<&SourceNode> {
        self.child("title")
    }

    /// All descendant character data in document order, markup ignored.
    ///
    /// The node's own tail is not included.
    pub fn itertext(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.push_text(out);
            out.push_str(&child.tail);
        }
    }

    /// True when the element holds neither children nor non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.children.is_empty() && self.text.trim().is_empty()
    }

    /// Whether any direct child is the content element `local`.
    pub fn has_child(&self, local: &str) -> bool {
        self.child(local).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SourceNode {
        SourceNode::content("para")
            .with_attr("id", "p1")
            .with_text("Let ")
            .with_child(
                SourceNode::content("emphasis")
                    .with_attr("effect", "bold")
                    .with_text("mean")
                    .with_tail(" be "),
            )
            .with_child(
                SourceNode::math("math")
                    .with_child(SourceNode::math("mi").with_text("μ"))
                    .with_tail("."),
            )
    }

    #[test]
    fn test_itertext_preserves_document_order() {
        assert_eq!(sample().itertext(), "Let mean be μ.");
    }

    #[test]
    fn test_attr_and_id() {
        let node = sample();
        assert_eq!(node.attr("id"), Some("p1"));
        assert_eq!(node.id(), Some("p1"));
        assert_eq!(node.attr("class"), None);
        assert_eq!(SourceNode::content("x").with_attr("id", "").id(), None);
    }

    #[test]
    fn test_child_queries_respect_namespace() {
        let node = sample();
        assert!(node.child("emphasis").is_some());
        // MathML elements never match content queries
        assert!(node.child("math").is_none());
        assert!(node.find_math().is_some());
    }

    #[test]
    fn test_descendants_in_document_order() {
        let list = SourceNode::content("list")
            .with_child(SourceNode::content("item").with_text("a"))
            .with_child(
                SourceNode::content("item")
                    .with_child(SourceNode::content("list").with_child(SourceNode::content("item").with_text("b1"))),
            );
        let items = list.descendants_named("item");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].text, "a");
        assert_eq!(items[2].text, "b1");
        assert_eq!(list.children_named("item").count(), 2);
        assert_eq!(list.descendant("item").map(|i| i.text.as_str()), Some("a"));
    }

    #[test]
    fn test_is_blank() {
        assert!(SourceNode::content("para").with_text("  \n ").is_blank());
        assert!(!sample().is_blank());
    }
}
