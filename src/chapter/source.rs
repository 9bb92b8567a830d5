//! Module lookup: where the source bytes of a module come from.

use crate::common::{Error, Result};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Supplies the raw bytes of a module by its id.
pub trait ModuleSource: Sync {
    fn load(&self, module: &str) -> Result<Vec<u8>>;
}

/// Modules laid out as `{root}/{module}/index.cnxml`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn module_path(&self, module: &str) -> PathBuf {
        self.root.join(module).join("index.cnxml")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ModuleSource for DirectorySource {
    fn load(&self, module: &str) -> Result<Vec<u8>> {
        match std::fs::read(self.module_path(module)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::ModuleNotFound(module.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

/// Modules held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    modules: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module: impl Into<String>, source: impl Into<Vec<u8>>) {
        self.modules.insert(module.into(), source.into());
    }

    pub fn with_module(mut self, module: impl Into<String>, source: impl Into<Vec<u8>>) -> Self {
        self.insert(module, source);
        self
    }
}

impl ModuleSource for MemorySource {
    fn load(&self, module: &str) -> Result<Vec<u8>> {
        self.modules
            .get(module)
            .cloned()
            .ok_or_else(|| Error::ModuleNotFound(module.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_source_layout() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("m1")).unwrap();
        std::fs::write(dir.path().join("m1").join("index.cnxml"), b"<document/>").unwrap();

        let source = DirectorySource::new(dir.path());
        assert_eq!(source.load("m1").unwrap(), b"<document/>");
        assert!(matches!(source.load("m2"), Err(Error::ModuleNotFound(id)) if id == "m2"));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new().with_module("m1", "<document/>");
        assert_eq!(source.load("m1").unwrap(), b"<document/>");
        assert!(source.load("missing").is_err());
    }
}
