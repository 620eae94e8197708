//! Foundation types for OCFL (Oxford Common File Layout) inventories.
//!
//! This crate holds the pieces of the OCFL data model that carry no
//! validation state of their own. `ocfl-validate` builds on them.
//!
//! # Key Types
//!
//! - [`DigestAlgorithm`]: Digest algorithm named by an inventory, with its digest format
//! - [`VersionScheme`]: Unpadded (`v1`) or zero-padded (`v001`) version directory naming
//! - [`Created`]: Parsed W3C datetime from a version's `created` field
//! - [`naming`]: Content directory, content path, and object id conventions

pub mod created;
pub mod digest;
pub mod error;
pub mod naming;
pub mod version;

pub use created::Created;
pub use digest::DigestAlgorithm;
pub use error::TypeError;
pub use version::VersionScheme;

/// The `type` value required of an OCFL 1.0 inventory.
pub const INVENTORY_TYPE: &str = "https://ocfl.io/1.0/spec/#inventory";

/// Content directory used when an inventory does not declare one.
pub const DEFAULT_CONTENT_DIRECTORY: &str = "content";
