use std::fmt;

use serde::Serialize;

use crate::error::TypeError;

/// Digest algorithm declared by an inventory's `digestAlgorithm` field.
///
/// OCFL 1.0 names `sha512` as the preferred algorithm and permits `sha256`.
/// Any other name is only representable through [`DigestAlgorithm::Lax`],
/// which callers reach by opting in to lax digest handling.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum DigestAlgorithm {
    #[default]
    Sha512,
    Sha256,
    /// An algorithm accepted without knowledge of its digest format.
    Lax(String),
}

impl DigestAlgorithm {
    /// Resolve an algorithm name.
    ///
    /// `sha512` and `sha256` are always recognized. Other names resolve to
    /// [`DigestAlgorithm::Lax`] when `lax` is set and are an error otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocfl_types::DigestAlgorithm;
    ///
    /// assert_eq!(DigestAlgorithm::from_name("sha512", false).unwrap(), DigestAlgorithm::Sha512);
    /// assert!(DigestAlgorithm::from_name("md5", false).is_err());
    /// assert!(DigestAlgorithm::from_name("md5", true).is_ok());
    /// ```
    pub fn from_name(name: &str, lax: bool) -> Result<Self, TypeError> {
        match name {
            "sha512" => Ok(Self::Sha512),
            "sha256" => Ok(Self::Sha256),
            other if lax => Ok(Self::Lax(other.to_string())),
            other => Err(TypeError::UnsupportedDigestAlgorithm(other.to_string())),
        }
    }

    /// The algorithm name as written in an inventory.
    pub fn name(&self) -> &str {
        match self {
            Self::Sha512 => "sha512",
            Self::Sha256 => "sha256",
            Self::Lax(name) => name,
        }
    }

    /// Length in characters of a hex digest, when the algorithm fixes one.
    pub fn hex_len(&self) -> Option<usize> {
        match self {
            Self::Sha512 => Some(128),
            Self::Sha256 => Some(64),
            Self::Lax(_) => None,
        }
    }

    /// Returns `true` if `digest` is well formed for this algorithm.
    ///
    /// Known algorithms require lowercase hex of exactly [`hex_len`](Self::hex_len)
    /// characters. Lax algorithms accept any non-empty string.
    pub fn is_valid_digest(&self, digest: &str) -> bool {
        match self.hex_len() {
            Some(len) => digest.len() == len && digest.bytes().all(is_lower_hex),
            None => !digest.is_empty(),
        }
    }
}

fn is_lower_hex(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'a'..=b'f')
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<DigestAlgorithm> for String {
    fn from(alg: DigestAlgorithm) -> Self {
        alg.name().to_string()
    }
}
