//! Glossary coverage check.
//!
//! Compares the glossary definitions of source modules against the glossary
//! item titles of converted PreTeXt output and reports source terms with no
//! target counterpart. Terms are compared after [`normalize_term`].

use crate::cnxml::{CnxmlDocument, parse_document};
use crate::common::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Normalize a term for comparison.
///
/// Parenthetical groups such as abbreviations are dropped, the rest is
/// lowercased with whitespace runs collapsed to single spaces.
///
/// ```rust
/// use cnxml2ptx::glossary::normalize_term;
///
/// assert_eq!(normalize_term("Interquartile Range (IQR)"), "interquartile range");
/// ```
pub fn normalize_term(term: &str) -> String {
    let mut stripped = String::with_capacity(term.len());
    let mut depth = 0usize;
    for ch in term.chars() {
        match ch {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => stripped.push(ch),
            _ => {},
        }
    }
    stripped
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Term to definition for every `glossary/definition` of a module.
///
/// Definitions missing a term or a meaning are skipped.
pub fn extract_glossary(doc: &CnxmlDocument) -> BTreeMap<String, String> {
    let mut terms = BTreeMap::new();
    let Some(glossary) = doc.glossary() else {
        return terms;
    };
    for definition in glossary.children_named("definition") {
        let (Some(term), Some(meaning)) = (definition.child("term"), definition.child("meaning")) else {
            continue;
        };
        let term = term.itertext().trim().to_string();
        if term.is_empty() {
            continue;
        }
        let meaning = meaning.itertext().split_whitespace().collect::<Vec<_>>().join(" ");
        terms.insert(term, meaning);
    }
    terms
}

/// Titles of every glossary item (`gi`) in a PreTeXt document.
pub fn extract_target_terms(ptx: &str) -> Result<Vec<String>> {
    let root = parse_document(ptx)?;
    let mut items = Vec::new();
    if root.is("gi") {
        items.push(&root);
    }
    items.extend(root.descendants_named("gi"));
    Ok(items
        .into_iter()
        .filter_map(|gi| gi.title_child())
        .map(|title| title.itertext().trim().to_string())
        .filter(|title| !title.is_empty())
        .collect())
}

/// Outcome of a glossary comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlossaryReport {
    /// Source terms absent from the target, with their definitions
    pub missing: Vec<(String, String)>,
    pub matched: usize,
}

impl GlossaryReport {
    pub fn total(&self) -> usize {
        self.matched + self.missing.len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for GlossaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} of {} glossary terms present, {} missing",
            self.matched,
            self.total(),
            self.missing.len()
        )?;
        for (term, definition) in &self.missing {
            writeln!(f, "  - {}: {}", term, definition)?;
        }
        Ok(())
    }
}

/// Source terms with no matching target title.
pub fn compare_glossary<S: AsRef<str>>(source: &BTreeMap<String, String>, target_titles: &[S]) -> GlossaryReport {
    let present: BTreeSet<String> = target_titles
        .iter()
        .map(|title| normalize_term(title.as_ref()))
        .collect();

    let mut report = GlossaryReport::default();
    for (term, definition) in source {
        if present.contains(&normalize_term(term)) {
            report.matched += 1;
        } else {
            report.missing.push((term.clone(), definition.clone()));
        }
    }
    report
}
