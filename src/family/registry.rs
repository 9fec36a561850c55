//! Family registry.
//!
//! Simple in-memory registry of family descriptors: the five embedded
//! families, optionally extended or overridden by descriptor files found in
//! user directories.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::schema::{Family, FamilyFile};

/// Descriptors embedded in the binary, one per supported family.
const EMBEDDED_DESCRIPTORS: [&str; 5] = [
    include_str!("../../resources/families/sudoku.toml"),
    include_str!("../../resources/families/takuzu.toml"),
    include_str!("../../resources/families/nonogram.toml"),
    include_str!("../../resources/families/kemaru.toml"),
    include_str!("../../resources/families/matoku.toml"),
];

/// In-memory family registry.
#[derive(Debug, Clone, Default)]
pub struct FamilyRegistry {
    families: HashMap<String, Family>,
}

impl FamilyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the embedded descriptors.
    pub fn with_embedded() -> Self {
        let mut registry = Self::new();
        registry.add_embedded_families();
        registry
    }

    /// Add a family, replacing any previous descriptor with the same name.
    pub fn add_family(&mut self, family: Family) {
        self.families.insert(family.name.clone(), family);
    }

    pub fn get(&self, name: &str) -> Option<&Family> {
        self.families.get(name)
    }

    /// Registered family names, sorted for stable output.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.families.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Register the descriptors embedded in the binary.
    pub fn add_embedded_families(&mut self) {
        for source in EMBEDDED_DESCRIPTORS {
            match parse_descriptor(source) {
                Ok(family) => self.add_family(family),
                Err(e) => {
                    // embedded descriptors are fixed at build time; a failure
                    // here means the resource itself is broken
                    log::warn!("Skipping unusable embedded family descriptor: {}", e);
                }
            }
        }
    }

    /// Load every `*.toml` descriptor in a directory, overriding embedded
    /// families with the same name. A missing directory is not an error;
    /// an unusable file is skipped with a warning.
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Ok(0);
        }

        let mut loaded = 0;
        let entries = fs::read_dir(dir)
            .with_context(|| format!("reading family directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }
            let source = fs::read_to_string(&path)
                .with_context(|| format!("reading family descriptor {}", path.display()))?;
            match parse_descriptor(&source) {
                Ok(family) => {
                    log::debug!("Loaded family '{}' from {}", family.name, path.display());
                    self.add_family(family);
                    loaded += 1;
                }
                Err(e) => {
                    log::warn!("Skipping family descriptor {}: {}", path.display(), e);
                }
            }
        }
        Ok(loaded)
    }
}

fn parse_descriptor(source: &str) -> Result<Family, String> {
    let file: FamilyFile = toml::from_str(source).map_err(|e| e.to_string())?;
    Family::try_from(file)
}
