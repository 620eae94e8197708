//! Structural and semantic validation of one OCFL inventory document.
//!
//! [`InventoryValidator::validate`] walks the whole document and reports
//! every problem it finds to a [`ValidationLogger`]; a missing or malformed
//! block only suppresses the checks that depend on it. Afterwards the
//! validator holds a snapshot of what it learned (digest algorithm, content
//! directory, version sequence, manifest and version states) that lineage
//! checks and callers can read.

use std::collections::{BTreeMap, BTreeSet};

use ocfl_types::naming::{has_authority_prefix, is_content_path, is_valid_content_directory};
use ocfl_types::{
    Created, DigestAlgorithm, TypeError, VersionScheme, DEFAULT_CONTENT_DIRECTORY, INVENTORY_TYPE,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::ValidateConfig;
use crate::logger::{Context, ValidationLogger};
use crate::sequence::resolve_version_sequence;

/// What the validator retained about one version block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VersionRecord {
    /// Raw `created` value, if present.
    pub created: Option<Value>,
    /// Raw `message` value, if present.
    pub message: Option<Value>,
    /// Raw `user` value, if present.
    pub user: Option<Value>,
    /// Digest → logical paths, for well-formed state entries.
    pub state: BTreeMap<String, Vec<String>>,
}

impl VersionRecord {
    /// Descriptive metadata field by its inventory key.
    pub fn metadata(&self, key: &str) -> Option<&Value> {
        match key {
            "created" => self.created.as_ref(),
            "message" => self.message.as_ref(),
            "user" => self.user.as_ref(),
            _ => None,
        }
    }
}

/// Validator for a single inventory document.
///
/// Create one per document, call [`validate`](Self::validate) once, then
/// treat it as read-only. A validated instance can serve as the `prior`
/// operand of [`validate_as_prior_version`](Self::validate_as_prior_version)
/// on a later inventory of the same object.
#[derive(Clone, Debug)]
pub struct InventoryValidator {
    location: String,
    lax_digests: bool,
    digest_algorithm: DigestAlgorithm,
    content_directory: String,
    head: Option<String>,
    version_scheme: Option<VersionScheme>,
    all_versions: Vec<String>,
    manifest: BTreeMap<String, Vec<String>>,
    manifest_files: BTreeMap<String, String>,
    versions: BTreeMap<String, VersionRecord>,
}

impl InventoryValidator {
    /// Create a validator. `location` names the inventory in diagnostics.
    pub fn new(location: impl Into<String>, lax_digests: bool) -> Self {
        Self {
            location: location.into(),
            lax_digests,
            digest_algorithm: DigestAlgorithm::default(),
            content_directory: DEFAULT_CONTENT_DIRECTORY.to_string(),
            head: None,
            version_scheme: None,
            all_versions: Vec::new(),
            manifest: BTreeMap::new(),
            manifest_files: BTreeMap::new(),
            versions: BTreeMap::new(),
        }
    }

    /// Create a validator using the digest leniency of `config`.
    pub fn with_config(location: impl Into<String>, config: &ValidateConfig) -> Self {
        Self::new(location, config.lax_digests)
    }

    pub(crate) fn error(&self, log: &mut ValidationLogger, code: &str, context: Context) {
        log.error(code, &context.with("where", &self.location));
    }

    pub(crate) fn warn(&self, log: &mut ValidationLogger, code: &str, context: Context) {
        log.warn(code, &context.with("where", &self.location));
    }

    /// Validate `inventory`, reporting every problem to `log`.
    pub fn validate(&mut self, inventory: &Value, log: &mut ValidationLogger) {
        *self = Self::new(std::mem::take(&mut self.location), self.lax_digests);
        debug!(location = %self.location, "validating inventory");

        let empty = Map::new();
        let doc = inventory.as_object().unwrap_or(&empty);

        self.check_id(doc.get("id"), log);

        match doc.get("type") {
            None => self.error(log, "E102", Context::new()),
            Some(Value::String(t)) if t == INVENTORY_TYPE => {}
            Some(other) => self.error(log, "E103", Context::new().with("got", describe(other))),
        }

        self.check_digest_algorithm(doc.get("digestAlgorithm"), log);

        if let Some(cd) = doc.get("contentDirectory") {
            match cd.as_str() {
                Some(cd) if is_valid_content_directory(cd) => self.content_directory = cd.to_string(),
                _ => self.error(
                    log,
                    "E051",
                    Context::new().with("content_directory", describe(cd)),
                ),
            }
        }

        let manifest_ok = match doc.get("manifest") {
            None => {
                self.error(log, "E107", Context::new());
                false
            }
            Some(manifest) => self.validate_manifest(manifest, log),
        };

        let mut digests_used = BTreeSet::new();
        let versions_ok = match doc.get("versions") {
            None => {
                self.error(log, "E108", Context::new());
                false
            }
            Some(Value::Object(versions)) => {
                self.validate_version_sequence(versions, log);
                digests_used = self.validate_versions(versions, log);
                true
            }
            Some(_) => {
                self.error(log, "E310", Context::new());
                false
            }
        };

        self.head = self.all_versions.last().cloned();
        if let Some(head) = doc.get("head") {
            if head.as_str() != self.head.as_deref() {
                self.error(
                    log,
                    "E914",
                    Context::new()
                        .with("got", describe(head))
                        .with("expected", self.head.as_deref().unwrap_or("(none)")),
                );
            }
        }

        if manifest_ok && versions_ok {
            self.check_digests_present_and_used(&digests_used, log);
        }

        debug!(
            location = %self.location,
            versions = self.all_versions.len(),
            errors = log.error_count(),
            warnings = log.warning_count(),
            "inventory validated"
        );
    }

    fn check_id(&self, id: Option<&Value>, log: &mut ValidationLogger) {
        match id {
            None => self.error(log, "E100", Context::new()),
            Some(Value::String(id)) if !id.is_empty() => {
                if !has_authority_prefix(id) {
                    self.warn(log, "W207", Context::new().with("id", id));
                }
            }
            Some(_) => self.error(log, "E101", Context::new()),
        }
    }

    /// `sha512` is taken as is, `sha256` with a warning, anything else is an
    /// error unless lax digests were requested.
    fn check_digest_algorithm(&mut self, value: Option<&Value>, log: &mut ValidationLogger) {
        let Some(value) = value else {
            self.error(log, "E104", Context::new());
            return;
        };
        let resolved = match value.as_str() {
            Some(name) => DigestAlgorithm::from_name(name, self.lax_digests),
            None => Err(TypeError::UnsupportedDigestAlgorithm(describe(value))),
        };
        match resolved {
            Ok(alg) => {
                if alg == DigestAlgorithm::Sha256 {
                    self.warn(log, "W206", Context::new());
                }
                self.digest_algorithm = alg;
            }
            Err(_) => self.error(
                log,
                "E105",
                Context::new().with("digest_algorithm", describe(value)),
            ),
        }
    }

    /// Check the manifest block, recording digest → content paths. Returns
    /// `true` if the block was an object.
    fn validate_manifest(&mut self, manifest: &Value, log: &mut ValidationLogger) -> bool {
        let Some(manifest) = manifest.as_object() else {
            self.error(log, "E307", Context::new());
            return false;
        };
        for (digest, paths) in manifest {
            if !self.digest_algorithm.is_valid_digest(digest) {
                self.error(log, "E304", Context::new().with("digest", digest));
            }
            let Some(paths) = paths.as_array() else {
                self.error(log, "E308", Context::new().with("digest", digest));
                self.manifest.insert(digest.clone(), Vec::new());
                continue;
            };
            let mut content_paths = Vec::with_capacity(paths.len());
            for path in paths {
                match path.as_str() {
                    Some(path) => {
                        if !is_content_path(path, &self.content_directory) {
                            self.error(log, "E913", Context::new().with("path", path));
                        }
                        self.manifest_files.insert(path.to_string(), digest.clone());
                        content_paths.push(path.to_string());
                    }
                    None => self.error(log, "E913", Context::new().with("path", describe(path))),
                }
            }
            self.manifest.insert(digest.clone(), content_paths);
        }
        true
    }

    fn validate_version_sequence(&mut self, versions: &Map<String, Value>, log: &mut ValidationLogger) {
        let sequence = resolve_version_sequence(versions.keys().map(String::as_str));
        match sequence.scheme {
            None => self.error(log, "E311", Context::new()),
            Some(scheme) => {
                if scheme.is_padded() {
                    self.warn(log, "W203", Context::new());
                }
                if !sequence.extraneous.is_empty() {
                    self.error(
                        log,
                        "E312",
                        Context::new().with("description", sequence.extraneous.join(", ")),
                    );
                }
            }
        }
        self.version_scheme = sequence.scheme;
        self.all_versions = sequence.versions;
    }

    /// Check each version in the valid sequence. Returns every digest the
    /// version states reference.
    fn validate_versions(
        &mut self,
        versions: &Map<String, Value>,
        log: &mut ValidationLogger,
    ) -> BTreeSet<String> {
        let mut digests_used = BTreeSet::new();
        let empty = Map::new();
        for name in self.all_versions.clone() {
            let version = versions
                .get(&name)
                .and_then(Value::as_object)
                .unwrap_or(&empty);
            let at = || Context::new().with("version", &name);

            match version.get("created") {
                Some(Value::String(created)) => match Created::parse(created) {
                    Ok(created) => {
                        if !created.has_offset() {
                            self.warn(log, "W208", at());
                        }
                        if !created.has_seconds() {
                            self.warn(log, "W209", at());
                        }
                    }
                    Err(e) => {
                        let reason = match e {
                            TypeError::InvalidTimestamp { reason, .. } => reason,
                            other => other.to_string(),
                        };
                        self.error(log, "E402", at().with("description", reason));
                    }
                },
                _ => self.error(log, "E401", at()),
            }

            let mut state = BTreeMap::new();
            match version.get("state") {
                Some(block) => {
                    state = self.validate_state_block(&name, block, &mut digests_used, log);
                }
                None => self.error(log, "E410", at()),
            }

            match version.get("message") {
                None => self.warn(log, "W201", at()),
                Some(Value::String(_)) => {}
                Some(_) => self.error(log, "E403", at()),
            }

            match version.get("user") {
                None => self.warn(log, "W202", at()),
                Some(Value::Object(user)) => {
                    if !matches!(user.get("name"), Some(Value::String(_))) {
                        self.error(log, "E405", at());
                    }
                    match user.get("address") {
                        None => self.warn(log, "W210", at()),
                        Some(Value::String(_)) => {}
                        Some(_) => self.error(log, "E406", at()),
                    }
                }
                Some(_) => self.error(log, "E404", at()),
            }

            self.versions.insert(
                name.clone(),
                VersionRecord {
                    created: version.get("created").cloned(),
                    message: version.get("message").cloned(),
                    user: version.get("user").cloned(),
                    state,
                },
            );
        }
        digests_used
    }

    /// Check one state block, adding every digest it references to
    /// `digests_used`. Duplicate logical paths are not checked here.
    fn validate_state_block(
        &self,
        version: &str,
        block: &Value,
        digests_used: &mut BTreeSet<String>,
        log: &mut ValidationLogger,
    ) -> BTreeMap<String, Vec<String>> {
        let mut state = BTreeMap::new();
        let Some(block) = block.as_object() else {
            self.error(log, "E912", Context::new().with("version", version));
            return state;
        };
        for (digest, files) in block {
            let at = || Context::new().with("version", version).with("digest", digest);
            if !self.digest_algorithm.is_valid_digest(digest) {
                self.error(log, "E305", at());
            }
            digests_used.insert(digest.clone());
            let logical: Option<Vec<String>> = files.as_array().and_then(|files| {
                files
                    .iter()
                    .map(|f| f.as_str().map(str::to_string))
                    .collect()
            });
            match logical {
                Some(logical) => {
                    state.insert(digest.clone(), logical);
                }
                None => self.error(log, "E915", at()),
            }
        }
        state
    }

    /// Every manifest digest must be used by some state and every digest a
    /// state uses must be in the manifest.
    fn check_digests_present_and_used(
        &self,
        digests_used: &BTreeSet<String>,
        log: &mut ValidationLogger,
    ) {
        let not_in_state: Vec<&str> = self
            .manifest
            .keys()
            .filter(|d| !digests_used.contains(*d))
            .map(String::as_str)
            .collect();
        let not_in_manifest: Vec<&str> = digests_used
            .iter()
            .filter(|d| !self.manifest.contains_key(*d))
            .map(String::as_str)
            .collect();
        if !not_in_manifest.is_empty() {
            self.error(
                log,
                "E916",
                Context::new().with(
                    "description",
                    format!("in state but not in manifest: {}", not_in_manifest.join(", ")),
                ),
            );
        }
        if !not_in_state.is_empty() {
            self.error(
                log,
                "E302",
                Context::new().with(
                    "description",
                    format!("in manifest but not in state: {}", not_in_state.join(", ")),
                ),
            );
        }
    }

    /// Label used as the `where` parameter of every diagnostic.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn lax_digests(&self) -> bool {
        self.lax_digests
    }

    /// Digest algorithm in force; `sha512` unless the inventory declared an
    /// accepted alternative.
    pub fn digest_algorithm(&self) -> &DigestAlgorithm {
        &self.digest_algorithm
    }

    /// Content directory in force; `content` unless the inventory declared a
    /// valid alternative.
    pub fn content_directory(&self) -> &str {
        &self.content_directory
    }

    /// Last version of the valid sequence.
    pub fn head(&self) -> Option<&str> {
        self.head.as_deref()
    }

    pub fn version_scheme(&self) -> Option<VersionScheme> {
        self.version_scheme
    }

    /// Versions of the valid sequence, in order.
    pub fn all_versions(&self) -> &[String] {
        &self.all_versions
    }

    /// Digest → content paths, as listed in the manifest.
    pub fn manifest(&self) -> &BTreeMap<String, Vec<String>> {
        &self.manifest
    }

    /// Content path → digest for every path in the manifest.
    pub fn manifest_files(&self) -> &BTreeMap<String, String> {
        &self.manifest_files
    }

    pub fn version(&self, name: &str) -> Option<&VersionRecord> {
        self.versions.get(name)
    }

    /// Logical path → digest for `version`, limited to digests the manifest
    /// knows. Empty if the version is not part of the valid sequence.
    pub fn file_map(&self, version: &str) -> BTreeMap<String, String> {
        let mut files = BTreeMap::new();
        if let Some(record) = self.versions.get(version) {
            for (digest, logical) in &record.state {
                if self.manifest.contains_key(digest) {
                    for file in logical {
                        files.insert(file.clone(), digest.clone());
                    }
                }
            }
        }
        files
    }
}

/// Render a JSON value for a message: strings bare, anything else as JSON.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::json;

    use super::*;

    pub(crate) fn digest(c: char) -> String {
        c.to_string().repeat(128)
    }

    pub(crate) fn version(state: Value) -> Value {
        json!({
            "created": "2020-01-01T00:00:00Z",
            "message": "An update",
            "user": {"name": "A Person", "address": "mailto:a@example.org"},
            "state": state,
        })
    }

    /// A minimal valid inventory with one file per version.
    pub(crate) fn inventory(versions: usize) -> Value {
        let mut manifest = Map::new();
        let mut all = Map::new();
        let mut state = Map::new();
        for n in 1..=versions {
            let d = digest(char::from(b'a' + n as u8));
            manifest.insert(d.clone(), json!([format!("v{n}/content/file{n}.txt")]));
            state.insert(d, json!([format!("file{n}.txt")]));
            all.insert(format!("v{n}"), version(Value::Object(state.clone())));
        }
        json!({
            "id": "info:example/object",
            "type": INVENTORY_TYPE,
            "digestAlgorithm": "sha512",
            "head": format!("v{versions}"),
            "manifest": manifest,
            "versions": all,
        })
    }

    pub(crate) fn logger() -> ValidationLogger {
        ValidationLogger::new(&ValidateConfig::default()).unwrap()
    }

    fn run(doc: &Value) -> (InventoryValidator, ValidationLogger) {
        run_with(doc, false)
    }

    fn run_with(doc: &Value, lax: bool) -> (InventoryValidator, ValidationLogger) {
        let mut log = logger();
        let mut validator = InventoryValidator::new("test", lax);
        validator.validate(doc, &mut log);
        (validator, log)
    }

    fn codes(log: &ValidationLogger) -> Vec<&str> {
        log.codes().collect()
    }

    #[test]
    fn valid_inventory_has_no_errors_or_warnings() {
        let (v, log) = run(&inventory(3));
        assert_eq!(log.error_count(), 0, "{log}");
        assert_eq!(log.warning_count(), 0);
        assert_eq!(v.all_versions(), ["v1", "v2", "v3"]);
        assert_eq!(v.head(), Some("v3"));
        assert_eq!(v.digest_algorithm(), &DigestAlgorithm::Sha512);
        assert_eq!(v.content_directory(), "content");
        assert_eq!(v.version_scheme(), Some(VersionScheme::Unpadded));
        assert_eq!(v.manifest_files().len(), 3);
        assert_eq!(v.manifest_files()["v2/content/file2.txt"], digest('c'));
    }

    #[test]
    fn empty_object_reports_every_missing_block() {
        let (v, log) = run(&json!({}));
        assert_eq!(codes(&log), vec!["E100", "E102", "E104", "E107", "E108"]);
        assert!(v.all_versions().is_empty());
        assert_eq!(v.head(), None);
    }

    #[test]
    fn non_object_document_is_treated_as_empty() {
        let (_, log) = run(&json!([1, 2, 3]));
        assert_eq!(codes(&log), vec!["E100", "E102", "E104", "E107", "E108"]);
    }

    #[test]
    fn id_checks() {
        let mut doc = inventory(1);
        doc["id"] = json!("");
        assert_eq!(codes(&run(&doc).1), vec!["E101"]);

        doc["id"] = json!(42);
        assert_eq!(codes(&run(&doc).1), vec!["E101"]);

        doc["id"] = json!("no-authority");
        let (_, log) = run(&doc);
        assert_eq!(codes(&log), vec!["W207"]);
        assert!(log.is_valid());
        assert!(log.message("W207").unwrap().contains("no-authority"));

        doc.as_object_mut().unwrap().remove("id");
        assert_eq!(codes(&run(&doc).1), vec!["E100"]);
    }

    #[test]
    fn type_checks() {
        let mut doc = inventory(1);
        doc["type"] = json!("https://ocfl.io/0.9/spec/#inventory");
        let (_, log) = run(&doc);
        assert_eq!(codes(&log), vec!["E103"]);
        assert!(log.message("E103").unwrap().contains("0.9"));

        doc.as_object_mut().unwrap().remove("type");
        assert_eq!(codes(&run(&doc).1), vec!["E102"]);
    }

    #[test]
    fn sha256_is_accepted_with_a_warning() {
        let d = "e".repeat(64);
        let doc = json!({
            "id": "info:x",
            "type": INVENTORY_TYPE,
            "digestAlgorithm": "sha256",
            "head": "v1",
            "manifest": {d.clone(): ["v1/content/a"]},
            "versions": {"v1": version(json!({d: ["a"]}))},
        });
        let (v, log) = run(&doc);
        assert_eq!(codes(&log), vec!["W206"]);
        assert_eq!(v.digest_algorithm(), &DigestAlgorithm::Sha256);
    }

    #[test]
    fn unknown_algorithm_is_an_error_in_strict_mode() {
        let mut doc = inventory(1);
        doc["digestAlgorithm"] = json!("md5");
        let (v, log) = run(&doc);
        assert!(log.has_code("E105"));
        assert!(log.message("E105").unwrap().contains("md5"));
        assert_eq!(v.digest_algorithm(), &DigestAlgorithm::Sha512);
    }

    #[test]
    fn non_string_algorithm_is_an_error() {
        let mut doc = inventory(1);
        doc["digestAlgorithm"] = json!(["sha512"]);
        assert!(run(&doc).1.has_code("E105"));
    }

    #[test]
    fn lax_mode_adopts_unknown_algorithm_and_accepts_any_digest() {
        let doc = json!({
            "id": "info:x",
            "type": INVENTORY_TYPE,
            "digestAlgorithm": "md5",
            "head": "v1",
            "manifest": {"ABC-not-hex": ["v1/content/a"]},
            "versions": {"v1": version(json!({"ABC-not-hex": ["a"]}))},
        });
        let (v, log) = run_with(&doc, true);
        assert_eq!(log.error_count(), 0, "{log}");
        assert_eq!(v.digest_algorithm(), &DigestAlgorithm::Lax("md5".into()));
        assert!(v.lax_digests());
    }

    #[test]
    fn content_directory_checks() {
        let mut doc = inventory(1);
        for bad in [json!("a/b"), json!("."), json!(".."), json!(7)] {
            doc["contentDirectory"] = bad;
            let (v, log) = run(&doc);
            assert!(log.has_code("E051"));
            assert_eq!(v.content_directory(), "content");
        }
    }

    #[test]
    fn custom_content_directory_governs_content_paths() {
        let mut doc = inventory(1);
        doc["contentDirectory"] = json!("data");
        let (v, log) = run(&doc);
        assert_eq!(v.content_directory(), "data");
        assert_eq!(codes(&log), vec!["E913"]);
        assert!(log.message("E913").unwrap().contains("v1/content/file1.txt"));
    }

    #[test]
    fn manifest_not_an_object() {
        let mut doc = inventory(1);
        doc["manifest"] = json!(["x"]);
        let (_, log) = run(&doc);
        assert_eq!(codes(&log), vec!["E307"]);
    }

    #[test]
    fn manifest_entries_are_checked_independently() {
        let mut doc = inventory(1);
        let good = digest('b');
        doc["manifest"] = json!({
            good.clone(): ["v1/content/file1.txt", "elsewhere/file.txt", 5],
            "short": ["v1/content/x"],
            digest('f'): "not-a-list",
        });
        doc["versions"]["v1"]["state"] = json!({good: ["file1.txt"], "short": ["x"], digest('f'): ["y"]});
        let (v, log) = run(&doc);
        assert!(log.has_code("E304"));
        assert!(log.has_code("E308"));
        assert!(log.has_code("E913"));
        assert!(log.has_code("E305"));
        assert!(!log.has_code("E302"));
        assert!(!log.has_code("E916"));
        // "elsewhere/file.txt" and the non-string entry both fail E913.
        assert_eq!(log.diagnostics().iter().filter(|d| d.code == "E913").count(), 2);
        assert!(v.manifest_files().contains_key("elsewhere/file.txt"));
    }

    #[test]
    fn missing_manifest_skips_consistency() {
        let mut doc = inventory(2);
        doc.as_object_mut().unwrap().remove("manifest");
        assert_eq!(codes(&run(&doc).1), vec!["E107"]);
    }

    #[test]
    fn missing_versions_skips_consistency_and_head() {
        let mut doc = inventory(2);
        doc.as_object_mut().unwrap().remove("versions");
        let (v, log) = run(&doc);
        assert_eq!(codes(&log), vec!["E108", "E914"]);
        assert!(log.message("E914").unwrap().contains("(none)"));
        assert_eq!(v.head(), None);
    }

    #[test]
    fn versions_not_an_object() {
        let mut doc = inventory(1);
        doc["versions"] = json!("v1");
        assert_eq!(codes(&run(&doc).1), vec!["E310", "E914"]);
    }

    #[test]
    fn zero_padded_versions_warn() {
        let mut doc = inventory(2);
        let versions = doc["versions"].as_object().unwrap().clone();
        doc["versions"] = json!({"v01": versions["v1"], "v02": versions["v2"]});
        doc["manifest"] = json!({
            digest('b'): ["v01/content/file1.txt"],
            digest('c'): ["v02/content/file2.txt"],
        });
        doc["head"] = json!("v02");
        let (v, log) = run(&doc);
        assert_eq!(codes(&log), vec!["W203"]);
        assert_eq!(v.all_versions(), ["v01", "v02"]);
        assert_eq!(v.version_scheme(), Some(VersionScheme::Padded(2)));
    }

    #[test]
    fn version_gap_is_an_error() {
        let mut doc = inventory(3);
        doc["versions"].as_object_mut().unwrap().remove("v2");
        doc["head"] = json!("v1");
        let (v, log) = run(&doc);
        assert!(log.has_code("E312"));
        assert!(log.message("E312").unwrap().contains("v3"));
        assert_eq!(v.all_versions(), ["v1"]);
        assert!(!log.has_code("E914"));
    }

    #[test]
    fn extraneous_version_is_an_error() {
        let mut doc = inventory(2);
        let extra = doc["versions"]["v2"].clone();
        doc["versions"]["v99"] = extra;
        let (v, log) = run(&doc);
        assert_eq!(codes(&log), vec!["E312"]);
        assert_eq!(v.all_versions(), ["v1", "v2"]);
    }

    #[test]
    fn no_version_one() {
        let mut doc = inventory(2);
        doc["versions"].as_object_mut().unwrap().remove("v1");
        let (v, log) = run(&doc);
        assert!(log.has_code("E311"));
        assert!(!log.has_code("E312"));
        assert!(v.all_versions().is_empty());
    }

    #[test]
    fn head_mismatch_names_both_values() {
        let mut doc = inventory(2);
        doc["head"] = json!("v1");
        let (_, log) = run(&doc);
        assert_eq!(codes(&log), vec!["E914"]);
        let message = log.message("E914").unwrap();
        assert!(message.contains("head v1"));
        assert!(message.contains("last version v2"));
    }

    #[test]
    fn absent_head_defaults_to_last_version() {
        let mut doc = inventory(2);
        doc.as_object_mut().unwrap().remove("head");
        let (v, log) = run(&doc);
        assert_eq!(log.error_count(), 0);
        assert_eq!(v.head(), Some("v2"));
    }

    #[test]
    fn unused_manifest_digest() {
        let mut doc = inventory(1);
        doc["manifest"][digest('f')] = json!(["v1/content/orphan"]);
        let (_, log) = run(&doc);
        assert_eq!(codes(&log), vec!["E302"]);
        assert!(log.message("E302").unwrap().contains(&digest('f')));
    }

    #[test]
    fn dangling_state_reference() {
        let mut doc = inventory(1);
        doc["versions"]["v1"]["state"][digest('f')] = json!(["ghost.txt"]);
        let (_, log) = run(&doc);
        assert_eq!(codes(&log), vec!["E916"]);
        assert!(log.message("E916").unwrap().contains(&digest('f')));
    }

    #[test]
    fn both_directions_are_reported_with_full_lists() {
        let mut doc = inventory(1);
        doc["manifest"][digest('e')] = json!(["v1/content/e"]);
        doc["manifest"][digest('f')] = json!(["v1/content/f"]);
        doc["versions"]["v1"]["state"][digest('0')] = json!(["zero"]);
        let (_, log) = run(&doc);
        assert_eq!(codes(&log), vec!["E302", "E916"]);
        let unused = log.message("E302").unwrap();
        assert!(unused.contains(&format!("{}, {}", digest('e'), digest('f'))));
    }

    #[test]
    fn created_checks() {
        let mut doc = inventory(1);
        doc["versions"]["v1"]["created"] = json!("2020-01-01T00:00:00");
        assert_eq!(codes(&run(&doc).1), vec!["W208"]);

        doc["versions"]["v1"]["created"] = json!("2020-01-01");
        assert_eq!(codes(&run(&doc).1), vec!["W208", "W209"]);

        doc["versions"]["v1"]["created"] = json!("2020-01-01T00:00Z");
        assert_eq!(codes(&run(&doc).1), vec!["W209"]);

        doc["versions"]["v1"]["created"] = json!("last tuesday");
        let (_, log) = run(&doc);
        assert_eq!(codes(&log), vec!["E402"]);
        assert!(log.message("E402").unwrap().contains("not a W3C datetime"));

        doc["versions"]["v1"]["created"] = json!(20200101);
        assert_eq!(codes(&run(&doc).1), vec!["E401"]);

        doc["versions"]["v1"].as_object_mut().unwrap().remove("created");
        assert_eq!(codes(&run(&doc).1), vec!["E401"]);
    }

    #[test]
    fn message_and_user_checks() {
        let mut doc = inventory(1);
        doc["versions"]["v1"]["message"] = json!(1);
        doc["versions"]["v1"]["user"] = json!({"name": 5, "address": false});
        assert_eq!(codes(&run(&doc).1), vec!["E403", "E405", "E406"]);

        doc["versions"]["v1"].as_object_mut().unwrap().remove("message");
        doc["versions"]["v1"]["user"] = json!({"name": "Someone"});
        let (_, log) = run(&doc);
        assert_eq!(codes(&log), vec!["W201", "W210"]);
        assert!(log.is_valid());

        doc["versions"]["v1"]["user"] = json!("Someone");
        assert_eq!(codes(&run(&doc).1), vec!["E404", "W201"]);

        doc["versions"]["v1"].as_object_mut().unwrap().remove("user");
        assert_eq!(codes(&run(&doc).1), vec!["W201", "W202"]);
    }

    #[test]
    fn state_checks() {
        let mut doc = inventory(1);
        doc["versions"]["v1"]["state"] = json!("nope");
        let (_, log) = run(&doc);
        assert!(log.has_code("E912"));
        // Without a usable state the manifest digest goes unused.
        assert!(log.has_code("E302"));

        doc["versions"]["v1"]["state"] = json!({digest('b'): "file1.txt"});
        assert_eq!(codes(&run(&doc).1), vec!["E915"]);

        doc["versions"]["v1"]["state"] = json!({digest('b'): ["ok", 3]});
        assert_eq!(codes(&run(&doc).1), vec!["E915"]);

        doc["versions"]["v1"].as_object_mut().unwrap().remove("state");
        assert_eq!(codes(&run(&doc).1), vec!["E302", "E410"]);
    }

    #[test]
    fn version_that_is_not_an_object() {
        let mut doc = inventory(2);
        doc["versions"]["v2"] = json!(null);
        let (_, log) = run(&doc);
        assert!(log.has_code("E401"));
        assert!(log.has_code("E410"));
        assert!(log.has_code("E302"));
    }

    #[test]
    fn duplicate_logical_paths_are_not_flagged() {
        let mut doc = inventory(1);
        doc["manifest"][digest('f')] = json!(["v1/content/other"]);
        doc["versions"]["v1"]["state"][digest('f')] = json!(["file1.txt"]);
        assert_eq!(run(&doc).1.error_count(), 0);
    }

    #[test]
    fn every_diagnostic_names_the_location() {
        let (_, log) = run(&json!({}));
        assert!(log.diagnostics().iter().all(|d| d.message.contains("Object test ")));
    }

    #[test]
    fn file_map_resolves_through_manifest() {
        let mut doc = inventory(2);
        doc["versions"]["v2"]["state"][digest('f')] = json!(["ghost.txt"]);
        let (v, _) = run(&doc);
        let files = v.file_map("v2");
        assert_eq!(files.len(), 2);
        assert_eq!(files["file1.txt"], digest('b'));
        assert_eq!(files["file2.txt"], digest('c'));
        assert!(v.file_map("v9").is_empty());
    }

    #[test]
    fn version_record_keeps_metadata() {
        let (v, _) = run(&inventory(1));
        let record = v.version("v1").unwrap();
        assert_eq!(record.metadata("message"), Some(&json!("An update")));
        assert_eq!(record.metadata("created"), Some(&json!("2020-01-01T00:00:00Z")));
        assert!(record.metadata("state").is_none());
    }

    #[test]
    fn independent_validators_agree() {
        let mut doc = inventory(3);
        doc["id"] = json!("x");
        doc["versions"]["v7"] = json!({});
        doc["manifest"]["zz"] = json!([]);
        let (_, a) = run(&doc);
        let (_, b) = run(&doc);
        assert_eq!(codes(&a), codes(&b));
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn revalidation_starts_from_a_clean_snapshot() {
        let mut log = logger();
        let mut validator = InventoryValidator::new("test", false);
        validator.validate(&inventory(3), &mut log);
        validator.validate(&inventory(1), &mut log);
        assert_eq!(validator.all_versions(), ["v1"]);
        assert_eq!(validator.manifest_files().len(), 1);
        assert_eq!(validator.location(), "test");
    }
}
