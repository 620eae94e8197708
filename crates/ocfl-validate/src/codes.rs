//! The diagnostic code catalog.
//!
//! Maps each code (`E###` for errors, `W###` for warnings) to per-language
//! message templates and the ordered names of the parameters the templates
//! expect. The built-in catalog is embedded in the binary and parsed once per
//! process; it is never mutated afterwards.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use serde::Deserialize;

use crate::config::DEFAULT_LANG;
use crate::error::{Result, ValidateError};

/// Codes whose number is below this cite a section of the OCFL specification.
pub const SPEC_CITED_BELOW: u16 = 200;

static BUILTIN: LazyLock<std::result::Result<Arc<CodeCatalog>, String>> = LazyLock::new(|| {
    CodeCatalog::from_json(include_str!("../data/validation-codes.json"))
        .map(Arc::new)
        .map_err(|e| e.to_string())
});

/// One catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CodeEntry {
    /// Message template per language code.
    #[serde(default)]
    pub description: BTreeMap<String, String>,
    /// Parameter names, in the order their values fill the template.
    #[serde(default)]
    pub params: Vec<String>,
}

impl CodeEntry {
    /// Template for `lang`, falling back to the default language and then to
    /// the alphabetically first language available.
    pub fn template(&self, lang: &str) -> Option<&str> {
        self.description
            .get(lang)
            .or_else(|| self.description.get(DEFAULT_LANG))
            .or_else(|| self.description.values().next())
            .map(String::as_str)
    }
}

/// Immutable code → entry catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CodeCatalog {
    entries: BTreeMap<String, CodeEntry>,
}

impl CodeCatalog {
    /// The catalog shipped with this crate, shared by every logger.
    pub fn builtin() -> Result<Arc<CodeCatalog>> {
        (*BUILTIN).clone().map_err(ValidateError::Catalog)
    }

    /// Parse a catalog from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ValidateError::Catalog(e.to_string()))
    }

    pub fn get(&self, code: &str) -> Option<&CodeEntry> {
        self.entries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Returns the code itself if it cites the OCFL specification, that is if
/// it is `E` or `W` followed by three digits numbering below
/// [`SPEC_CITED_BELOW`].
pub fn spec_citation(code: &str) -> Option<&str> {
    let digits = code.strip_prefix('E').or_else(|| code.strip_prefix('W'))?;
    if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number: u16 = digits.parse().ok()?;
    (number < SPEC_CITED_BELOW).then_some(code)
}
