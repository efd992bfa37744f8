//! The .br TLD registry and suffix matching.
//!
//! The registry is a static table from TLD (e.g. "com.br") to its metadata,
//! embedded at build time and parsed once on first use.

use crate::error::DomainCheckError;
use crate::types::TldInfo;
use std::collections::BTreeMap;

/// Embedded TLD table, keyed by TLD.
const BUILTIN_TLDS: &str = include_str!("../data/tlds.json");

// Parsed once; a parse failure is kept and handed out on every access
lazy_static::lazy_static! {
    static ref BUILTIN_REGISTRY: Result<TldRegistry, DomainCheckError> =
        TldRegistry::from_json(BUILTIN_TLDS);
}

/// Immutable mapping from TLD to its metadata.
///
/// Keys are kept sorted so listings and error messages are stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldRegistry {
    entries: BTreeMap<String, TldInfo>,
}

impl TldRegistry {
    /// The registry embedded in the library.
    pub fn builtin() -> Result<&'static TldRegistry, DomainCheckError> {
        BUILTIN_REGISTRY.as_ref().map_err(Clone::clone)
    }

    /// Parse a registry from a JSON object of `tld -> metadata`.
    pub fn from_json(json: &str) -> Result<Self, DomainCheckError> {
        let entries: BTreeMap<String, TldInfo> = serde_json::from_str(json).map_err(|e| {
            DomainCheckError::internal(format!("Invalid TLD registry data: {}", e))
        })?;

        if entries.is_empty() {
            return Err(DomainCheckError::internal("TLD registry is empty"));
        }

        if let Some(bad) = entries
            .keys()
            .find(|tld| tld.is_empty() || tld.starts_with('.') || *tld != &tld.to_lowercase())
        {
            return Err(DomainCheckError::internal(format!(
                "Invalid TLD key in registry: '{}'",
                bad
            )));
        }

        Ok(Self { entries })
    }

    /// Metadata for a TLD, if it is supported.
    pub fn get(&self, tld: &str) -> Option<&TldInfo> {
        self.entries.get(tld)
    }

    pub fn contains(&self, tld: &str) -> bool {
        self.entries.contains_key(tld)
    }

    /// All supported TLDs in sorted order.
    pub fn tlds(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All supported TLDs as owned strings, sorted.
    pub fn tld_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TldInfo)> {
        self.entries.iter().map(|(tld, info)| (tld.as_str(), info))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category name for a TLD (e.g. "Genéricos").
    pub fn category_of(&self, tld: &str) -> Option<&str> {
        self.get(tld).map(|info| info.category_name.as_str())
    }

    /// Longest registry key that `input` ends with.
    pub fn match_tld(&self, input: &str) -> Option<&str> {
        match_tld(input, self.tlds())
    }

    /// Longest registry key that `input` ends with at a label boundary.
    ///
    /// "meusite.com.br" matches "com.br", while "fooblog.br" does not match
    /// "blog.br" because no dot separates the two.
    pub fn match_label_tld(&self, input: &str) -> Option<&str> {
        match_tld(
            input,
            self.tlds().filter(|tld| on_label_boundary(input, tld)),
        )
    }
}

/// Find the TLD that `input` ends with.
///
/// Only keys no longer than the input and that are an exact, case-sensitive
/// suffix of it are candidates. When several keys match (e.g. "br" and
/// "com.br") the longest wins.
pub fn match_tld<'a, I>(input: &str, tlds: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    tlds.into_iter()
        .filter(|tld| tld.len() <= input.len() && input.ends_with(tld))
        .max_by_key(|tld| tld.len())
}

fn on_label_boundary(input: &str, tld: &str) -> bool {
    match input.strip_suffix(tld) {
        Some(rest) => rest.is_empty() || rest.ends_with('.'),
        None => false,
    }
}

/// Get every supported TLD, sorted alphabetically.
pub fn supported_tlds() -> Result<Vec<String>, DomainCheckError> {
    Ok(TldRegistry::builtin()?.tld_names())
}
