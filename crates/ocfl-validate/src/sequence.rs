//! Version directory sequence resolution.
//!
//! Given the version directory names of an inventory, find the numbering
//! scheme and the longest contiguous run `1..=k` present under it.

use std::collections::BTreeSet;

use ocfl_types::VersionScheme;

/// Outcome of resolving a set of version directory names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionSequence {
    /// Scheme fixed by the name of version 1, if one was found.
    pub scheme: Option<VersionScheme>,
    /// Names of versions `1..=k` in order.
    pub versions: Vec<String>,
    /// Names present but outside the contiguous run, sorted.
    pub extraneous: Vec<String>,
}

impl VersionSequence {
    /// Returns `true` if version 1 was found and no name was left over.
    pub fn is_complete(&self) -> bool {
        self.scheme.is_some() && self.extraneous.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.versions.last().map(String::as_str)
    }
}

/// Resolve the version sequence formed by `names`.
///
/// Version 1 fixes the scheme: `v1` if present, otherwise the narrowest
/// zero-padded form (`v01` through `v0000000001`) present. The sequence then
/// extends through 2, 3, ... until the first missing number or the largest
/// number the scheme can express. Every other name is extraneous.
///
/// # Examples
///
/// ```
/// use ocfl_validate::sequence::resolve_version_sequence;
///
/// let seq = resolve_version_sequence(["v1", "v2", "v4"]);
/// assert_eq!(seq.versions, vec!["v1", "v2"]);
/// assert_eq!(seq.extraneous, vec!["v4"]);
/// ```
pub fn resolve_version_sequence<'a, I>(names: I) -> VersionSequence
where
    I: IntoIterator<Item = &'a str>,
{
    let names: BTreeSet<&str> = names.into_iter().collect();
    let Some(scheme) =
        VersionScheme::candidates().find(|scheme| names.contains(scheme.name(1).as_str()))
    else {
        return VersionSequence {
            scheme: None,
            versions: Vec::new(),
            extraneous: names.iter().map(|n| n.to_string()).collect(),
        };
    };

    let mut versions = Vec::new();
    for number in 1..=scheme.max_version() {
        let name = scheme.name(number);
        if !names.contains(name.as_str()) {
            break;
        }
        versions.push(name);
    }

    let extraneous = if versions.len() == names.len() {
        Vec::new()
    } else {
        let in_sequence: BTreeSet<&str> = versions.iter().map(String::as_str).collect();
        names
            .iter()
            .filter(|n| !in_sequence.contains(*n))
            .map(|n| n.to_string())
            .collect()
    };

    VersionSequence {
        scheme: Some(scheme),
        versions,
        extraneous,
    }
}
