//! Book manifests: which modules form which chapter, in what order.

use serde::{Deserialize, Serialize};

/// Ordered chapters of one book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookManifest {
    pub chapters: Vec<ChapterSpec>,
}

/// Top-level division kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Division {
    #[default]
    Chapter,
    Appendix,
}

impl Division {
    pub fn tag(self) -> &'static str {
        match self {
            Division::Chapter => "chapter",
            Division::Appendix => "appendix",
        }
    }
}

/// One output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSpec {
    /// Identifier of the root element
    pub id: String,
    pub title: String,
    /// File stem of the written chapter
    pub slug: String,
    #[serde(default)]
    pub division: Division,
    /// Module whose leading blocks form the chapter introduction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(default)]
    pub units: Vec<UnitSpec>,
}

/// One module converted to a section of the chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub module: String,
    /// Section identifier; defaults to the module id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Replaces the module's own title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl UnitSpec {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            id: None,
            title: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn section_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.module)
    }
}

#[cfg(feature = "yaml")]
mod yaml {
    use super::BookManifest;
    use crate::common::{Error, Result};
    use std::path::Path;

    impl BookManifest {
        /// Parse a manifest from YAML text.
        pub fn from_yaml_str(yaml: &str) -> Result<Self> {
            serde_saphyr::from_str(yaml).map_err(|e| Error::Manifest(e.to_string()))
        }

        /// Read and parse a YAML manifest file.
        pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
            let yaml = std::fs::read_to_string(path)?;
            Self::from_yaml_str(&yaml)
        }

        /// Serialize the manifest back to YAML.
        pub fn to_yaml_string(&self) -> Result<String> {
            serde_saphyr::to_string(self).map_err(|e| Error::Manifest(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_defaults() {
        let unit = UnitSpec::new("m46925");
        assert_eq!(unit.section_id(), "m46925");
        let unit = unit.with_id("sec-stem").with_title("Stem Plots");
        assert_eq!(unit.section_id(), "sec-stem");
        assert_eq!(unit.title.as_deref(), Some("Stem Plots"));
        assert_eq!(Division::default().tag(), "chapter");
        assert_eq!(Division::Appendix.tag(), "appendix");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_manifest_from_yaml() {
        let manifest = BookManifest::from_yaml_str(
            r#"
chapters:
  - id: ch-descriptive
    title: Descriptive Statistics
    slug: descriptive-statistics
    introduction: m46925
    units:
      - module: m46925
        id: sec-intro
      - module: m46927
        title: Histograms
  - id: app-tables
    title: Tables
    slug: tables
    division: appendix
"#,
        )
        .unwrap();

        assert_eq!(manifest.chapters.len(), 2);
        let first = &manifest.chapters[0];
        assert_eq!(first.division, Division::Chapter);
        assert_eq!(first.introduction.as_deref(), Some("m46925"));
        assert_eq!(first.units[0].section_id(), "sec-intro");
        assert_eq!(first.units[1].title.as_deref(), Some("Histograms"));
        assert_eq!(manifest.chapters[1].division, Division::Appendix);
        assert!(manifest.chapters[1].units.is_empty());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_manifest_yaml_errors() {
        let err = BookManifest::from_yaml_str("chapters: [ {id: 1").unwrap_err();
        assert!(matches!(err, crate::common::Error::Manifest(_)));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_manifest_yaml_serializes() {
        let manifest = BookManifest {
            chapters: vec![ChapterSpec {
                id: "ch1".into(),
                title: "Sampling".into(),
                slug: "sampling".into(),
                division: Division::Chapter,
                introduction: None,
                units: vec![UnitSpec::new("m1")],
            }],
        };
        let yaml = manifest.to_yaml_string().unwrap();
        assert!(yaml.contains("slug: sampling"));
        assert!(yaml.contains("module: m1"));
    }
}
