use std::fmt;

use serde::Serialize;

/// Largest version number considered for unpadded version directories.
pub const MAX_UNPADDED_VERSION: u64 = 999_999;

/// Narrowest and widest zero-padded version directory names probed.
pub const MIN_PADDED_WIDTH: usize = 2;
pub const MAX_PADDED_WIDTH: usize = 10;

/// Numbering scheme shared by all version directories of one object.
///
/// The scheme is fixed by whichever name represents version 1: `v1` selects
/// [`VersionScheme::Unpadded`], `v01`, `v001`, ... select
/// [`VersionScheme::Padded`] with the width of the numeric part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionScheme {
    Unpadded,
    /// Zero-padded to this many digits.
    Padded(usize),
}

impl VersionScheme {
    /// Every scheme in the order it is probed: unpadded first, then padded
    /// widths from narrowest to widest.
    pub fn candidates() -> impl Iterator<Item = Self> {
        std::iter::once(Self::Unpadded)
            .chain((MIN_PADDED_WIDTH..=MAX_PADDED_WIDTH).map(Self::Padded))
    }

    /// Directory name for version `number` under this scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocfl_types::VersionScheme;
    ///
    /// assert_eq!(VersionScheme::Unpadded.name(12), "v12");
    /// assert_eq!(VersionScheme::Padded(3).name(7), "v007");
    /// ```
    pub fn name(&self, number: u64) -> String {
        match self {
            Self::Unpadded => format!("v{number}"),
            Self::Padded(width) => format!("v{number:0width$}"),
        }
    }

    /// Highest version number the scheme can express.
    ///
    /// A padded scheme keeps a leading zero, so width `n` stops at
    /// `10^(n-1) - 1`.
    pub fn max_version(&self) -> u64 {
        match self {
            Self::Unpadded => MAX_UNPADDED_VERSION,
            Self::Padded(width) => 10u64.pow(*width as u32 - 1) - 1,
        }
    }

    pub fn is_padded(&self) -> bool {
        matches!(self, Self::Padded(_))
    }
}

impl fmt::Display for VersionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unpadded => f.write_str("unpadded"),
            Self::Padded(width) => write!(f, "zero-padded to {width} digits"),
        }
    }
}
