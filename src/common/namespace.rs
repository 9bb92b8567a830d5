//! XML namespaces that CNXML modules draw from, and prefix resolution.

/// CNXML content namespace.
pub const CNXML_NS: &str = "http://cnx.rice.edu/cnxml";
/// MathML namespace.
pub const MATHML_NS: &str = "http://www.w3.org/1998/Math/MathML";
/// Connexions metadata namespace.
pub const MDML_NS: &str = "http://cnx.rice.edu/mdml";
/// XInclude namespace, declared on emitted chapters.
pub const XINCLUDE_NS: &str = "http://www.w3.org/2001/XInclude";
/// Namespace bound to the reserved `xml` prefix.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace of an element, as far as the converter cares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// `http://cnx.rice.edu/cnxml`
    Content,
    /// MathML
    Math,
    /// `http://cnx.rice.edu/mdml`
    Metadata,
    /// Any other namespace URI
    Other(String),
    /// No namespace in scope
    None,
}

impl Namespace {
    /// Classify a namespace URI.
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            "" => Namespace::None,
            CNXML_NS => Namespace::Content,
            MATHML_NS => Namespace::Math,
            MDML_NS => Namespace::Metadata,
            other => Namespace::Other(other.to_string()),
        }
    }

    /// Whether elements in this namespace belong to the content vocabulary.
    ///
    /// Unqualified elements are treated as content, since some modules omit
    /// the default namespace declaration.
    pub fn is_content(&self) -> bool {
        matches!(self, Namespace::Content | Namespace::None)
    }

    pub fn is_math(&self) -> bool {
        matches!(self, Namespace::Math)
    }
}

/// Stack of prefix bindings in scope while walking a document.
///
/// Each element pushes one frame; bindings declared on that element live in
/// its frame and are dropped with it.
#[derive(Debug, Default)]
pub struct NamespaceScope {
    frames: Vec<Vec<(String, String)>>,
}

impl NamespaceScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a frame with the bindings declared on an element.
    ///
    /// The empty prefix stands for the default namespace.
    pub fn push(&mut self, bindings: Vec<(String, String)>) {
        self.frames.push(bindings);
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Resolve a prefix to its URI, innermost binding first.
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NS);
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Resolve a qualified element name into its namespace and local part.
    pub fn resolve_element(&self, qname: &str) -> (Namespace, String) {
        let (prefix, local) = split_qname(qname);
        let ns = self
            .resolve(prefix)
            .map(Namespace::from_uri)
            .unwrap_or(Namespace::None);
        (ns, local.to_string())
    }
}

/// Split `prefix:local` into its parts; the prefix is empty when absent.
pub fn split_qname(qname: &str) -> (&str, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (prefix, local),
        None => ("", qname),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace_resolution() {
        let mut scope = NamespaceScope::new();
        scope.push(vec![(String::new(), CNXML_NS.to_string())]);
        let (ns, local) = scope.resolve_element("para");
        assert_eq!(ns, Namespace::Content);
        assert_eq!(local, "para");
    }

    #[test]
    fn test_inner_binding_shadows_outer() {
        let mut scope = NamespaceScope::new();
        scope.push(vec![(String::new(), CNXML_NS.to_string())]);
        scope.push(vec![(String::new(), MATHML_NS.to_string())]);
        assert_eq!(scope.resolve_element("mi").0, Namespace::Math);
        scope.pop();
        assert_eq!(scope.resolve_element("mi").0, Namespace::Content);
    }

    #[test]
    fn test_prefixed_names() {
        let mut scope = NamespaceScope::new();
        scope.push(vec![
            ("m".to_string(), MATHML_NS.to_string()),
            ("md".to_string(), MDML_NS.to_string()),
        ]);
        assert_eq!(scope.resolve_element("m:math").0, Namespace::Math);
        assert_eq!(scope.resolve_element("md:title").0, Namespace::Metadata);
        assert_eq!(scope.resolve_element("q:odd").0, Namespace::None);
        assert_eq!(scope.resolve("xml"), Some(XML_NS));
    }

    #[test]
    fn test_unqualified_without_declaration_is_content() {
        let scope = NamespaceScope::new();
        let (ns, _) = scope.resolve_element("document");
        assert!(ns.is_content());
    }
}
