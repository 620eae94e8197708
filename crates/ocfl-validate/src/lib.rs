//! Validation of OCFL (Oxford Common File Layout) inventories.
//!
//! This crate checks the internal consistency of an `inventory.json`
//! document held in memory. It never touches the filesystem for the
//! document itself and never recomputes digests. It provides:
//! - A catalog of stable diagnostic codes with localized message templates
//! - [`ValidationLogger`], the run-scoped sink that renders and counts them
//! - Version directory sequence resolution, including zero-padding detection
//! - [`InventoryValidator`] for structural and manifest/state consistency checks
//! - Lineage checks between an inventory and an earlier one of the same object
//!
//! # Example
//!
//! ```
//! use ocfl_validate::{InventoryValidator, ValidateConfig, ValidationLogger};
//! use serde_json::json;
//!
//! let config = ValidateConfig::default();
//! let mut log = ValidationLogger::new(&config).unwrap();
//! let mut validator = InventoryValidator::with_config("inventory.json", &config);
//! validator.validate(&json!({"id": "info:x"}), &mut log);
//! assert!(!log.is_valid());
//! assert!(log.has_code("E102"));
//! ```

pub mod codes;
pub mod config;
pub mod error;
pub mod inventory;
pub mod lineage;
pub mod logger;
pub mod sequence;

pub use codes::{CodeCatalog, CodeEntry};
pub use config::ValidateConfig;
pub use error::{Result, ValidateError};
pub use inventory::{InventoryValidator, VersionRecord};
pub use logger::{Context, Diagnostic, Report, Severity, ValidationLogger};
pub use sequence::{resolve_version_sequence, VersionSequence};
