//! Deterministic identifiers for emitted elements.
//!
//! Source ids are copied verbatim. A missing id is derived from the parent's
//! id and the element's 1-based position among siblings of the same kind,
//! so re-converting the same input yields the same identifiers.

use crate::cnxml::SourceNode;
use smallvec::SmallVec;

pub(crate) struct SiblingIds<'p> {
    parent: &'p str,
    synthesize: bool,
    seen: SmallVec<[(&'static str, usize); 4]>,
}

impl<'p> SiblingIds<'p> {
    pub(crate) fn new(parent: &'p str, synthesize: bool) -> Self {
        Self {
            parent,
            synthesize: synthesize && !parent.is_empty(),
            seen: SmallVec::new(),
        }
    }

    /// Scope for blocks spliced outside any division; only source ids survive.
    pub(crate) fn detached() -> Self {
        Self::new("", false)
    }

    fn next_position(&mut self, kind: &'static str) -> usize {
        match self.seen.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, count)) => {
                *count += 1;
                *count
            },
            None => {
                self.seen.push((kind, 1));
                1
            },
        }
    }

    /// Identifier for the next sibling of `kind`.
    pub(crate) fn resolve(&mut self, node: &SourceNode, kind: &'static str) -> Option<String> {
        let position = self.next_position(kind);
        match node.id() {
            Some(id) => Some(id.to_string()),
            None if self.synthesize => Some(format!("{}-{}{}", self.parent, kind, position)),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_ids_follow_sibling_position() {
        let mut ids = SiblingIds::new("sec-intro", true);
        let plain = SourceNode::content("table");
        let named = SourceNode::content("table").with_attr("id", "t-fixed");

        assert_eq!(ids.resolve(&plain, "table").as_deref(), Some("sec-intro-table1"));
        assert_eq!(ids.resolve(&named, "table").as_deref(), Some("t-fixed"));
        assert_eq!(ids.resolve(&plain, "table").as_deref(), Some("sec-intro-table3"));
        assert_eq!(ids.resolve(&plain, "section").as_deref(), Some("sec-intro-section1"));
    }

    #[test]
    fn test_synthesis_disabled_or_detached() {
        let plain = SourceNode::content("section");
        assert_eq!(SiblingIds::new("sec", false).resolve(&plain, "section"), None);
        assert_eq!(SiblingIds::detached().resolve(&plain, "section"), None);
        let named = plain.with_attr("id", "keep");
        assert_eq!(SiblingIds::detached().resolve(&named, "section").as_deref(), Some("keep"));
    }
}
