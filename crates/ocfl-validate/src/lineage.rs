//! Lineage checks between two inventories of the same object.
//!
//! A later inventory must extend an earlier one without rewriting history:
//! every prior version and content path survives, and every shared version
//! maps the same logical files to the same digests. Descriptive metadata of a
//! shared version may change, which only draws a warning.

use std::collections::BTreeSet;

use tracing::debug;

use crate::inventory::InventoryValidator;
use crate::logger::{Context, ValidationLogger};

/// Version metadata keys compared between inventories.
pub const METADATA_KEYS: [&str; 3] = ["created", "message", "user"];

impl InventoryValidator {
    /// Check that `prior`, an already validated earlier inventory of the same
    /// object, is a legal ancestor of this one.
    ///
    /// Both validators must have run [`validate`](Self::validate). Every rule
    /// is checked independently and reported to `log` under this validator's
    /// location. Metadata is compared for every shared version directory.
    pub fn validate_as_prior_version(&self, prior: &InventoryValidator, log: &mut ValidationLogger) {
        let prior_head = prior.head().unwrap_or("(none)");
        debug!(location = %self.location(), prior_head, "checking lineage against prior inventory");
        let at = || Context::new().with("prior_head", prior_head);

        let ours: BTreeSet<&str> = self.all_versions().iter().map(String::as_str).collect();
        if !prior.all_versions().iter().all(|v| ours.contains(v.as_str())) {
            self.error(log, "E407", at());
        }

        if !prior
            .manifest_files()
            .keys()
            .all(|path| self.manifest_files().contains_key(path))
        {
            self.error(log, "E408", at());
        }

        for version_dir in prior.all_versions().iter().filter(|v| ours.contains(v.as_str())) {
            let prior_files = prior.file_map(version_dir);
            let our_files = self.file_map(version_dir);
            if !prior_files.keys().eq(our_files.keys()) {
                self.error(log, "E409", at().with("version_dir", version_dir));
            } else {
                for (file, digest) in &prior_files {
                    if our_files.get(file) != Some(digest) {
                        self.error(
                            log,
                            "E411",
                            at().with("version_dir", version_dir).with("file", file),
                        );
                    }
                }
            }

            let (Some(prior_version), Some(our_version)) =
                (prior.version(version_dir), self.version(version_dir))
            else {
                continue;
            };
            for key in METADATA_KEYS {
                if prior_version.metadata(key) != our_version.metadata(key) {
                    self.warn(
                        log,
                        "W212",
                        at().with("version_dir", version_dir).with("key", key),
                    );
                }
            }
        }
    }
}
