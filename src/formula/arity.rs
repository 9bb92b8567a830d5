//! MathML constructs and the number of positional operands each consumes.

use crate::cnxml::SourceNode;
use phf::phf_map;
use smallvec::SmallVec;

/// Token element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Number,
    Operator,
    Text,
    StringLiteral,
    Space,
}

/// A MathML element, classified by how its children are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathConstruct {
    Token(TokenKind),
    /// Row-like wrappers whose children are concatenated
    Group,
    Sqrt,
    Root,
    Fraction,
    Sub,
    Sup,
    SubSup,
    Under,
    Over,
    UnderOver,
    Fenced,
    Table,
    TableRow,
    LabeledRow,
    TableCell,
    Semantics,
    /// Annotations and script placeholders that render to nothing
    Ignored,
    Phantom,
    Enclose,
}

static CONSTRUCTS: phf::Map<&'static str, MathConstruct> = phf_map! {
    "mi" => MathConstruct::Token(TokenKind::Identifier),
    "mn" => MathConstruct::Token(TokenKind::Number),
    "mo" => MathConstruct::Token(TokenKind::Operator),
    "mtext" => MathConstruct::Token(TokenKind::Text),
    "ms" => MathConstruct::Token(TokenKind::StringLiteral),
    "mspace" => MathConstruct::Token(TokenKind::Space),
    "math" => MathConstruct::Group,
    "mrow" => MathConstruct::Group,
    "mstyle" => MathConstruct::Group,
    "mpadded" => MathConstruct::Group,
    "merror" => MathConstruct::Group,
    "msqrt" => MathConstruct::Sqrt,
    "mroot" => MathConstruct::Root,
    "mfrac" => MathConstruct::Fraction,
    "msub" => MathConstruct::Sub,
    "msup" => MathConstruct::Sup,
    "msubsup" => MathConstruct::SubSup,
    "munder" => MathConstruct::Under,
    "mover" => MathConstruct::Over,
    "munderover" => MathConstruct::UnderOver,
    "mfenced" => MathConstruct::Fenced,
    "mtable" => MathConstruct::Table,
    "mtr" => MathConstruct::TableRow,
    "mlabeledtr" => MathConstruct::LabeledRow,
    "mtd" => MathConstruct::TableCell,
    "semantics" => MathConstruct::Semantics,
    "annotation" => MathConstruct::Ignored,
    "annotation-xml" => MathConstruct::Ignored,
    "none" => MathConstruct::Ignored,
    "mprescripts" => MathConstruct::Ignored,
    "mphantom" => MathConstruct::Phantom,
    "menclose" => MathConstruct::Enclose,
};

impl MathConstruct {
    /// Classify a MathML element by local name; `None` for unknown tags.
    pub fn of(node: &SourceNode) -> Option<Self> {
        CONSTRUCTS.get(node.local_name()).copied()
    }

    /// Number of positional operands, or `None` when all children are
    /// consumed as a row.
    pub const fn arity(&self) -> Option<usize> {
        match self {
            MathConstruct::Token(_) => Some(0),
            MathConstruct::Phantom | MathConstruct::Enclose => Some(1),
            MathConstruct::Root
            | MathConstruct::Fraction
            | MathConstruct::Sub
            | MathConstruct::Sup
            | MathConstruct::Under
            | MathConstruct::Over => Some(2),
            MathConstruct::SubSup | MathConstruct::UnderOver => Some(3),
            _ => None,
        }
    }
}

/// Children consumed positionally; absent operands are `None`.
pub fn operands(node: &SourceNode, arity: usize) -> SmallVec<[Option<&SourceNode>; 3]> {
    (0..arity).map(|i| node.children.get(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_classes() {
        let arity = |tag: &str| MathConstruct::of(&SourceNode::math(tag)).and_then(|c| c.arity());
        assert_eq!(arity("mi"), Some(0));
        assert_eq!(arity("mfrac"), Some(2));
        assert_eq!(arity("msubsup"), Some(3));
        assert_eq!(arity("munderover"), Some(3));
        assert_eq!(arity("mrow"), None);
        assert_eq!(MathConstruct::of(&SourceNode::math("mblink")), None);
    }

    #[test]
    fn test_missing_operands_are_none() {
        let frac = SourceNode::math("mfrac").with_child(SourceNode::math("mn").with_text("1"));
        let ops = operands(&frac, 2);
        assert_eq!(ops.len(), 2);
        assert!(ops[0].is_some());
        assert!(ops[1].is_none());
    }
}
