//! Run-scoped sink for coded validation diagnostics.
//!
//! A [`ValidationLogger`] resolves each code against the [`CodeCatalog`],
//! renders its template with the caller's [`Context`], and keeps both the
//! latest message per code and the full append-only log. One logger may be
//! shared by every validator taking part in one validation run.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::codes::{spec_citation, CodeCatalog};
use crate::config::ValidateConfig;
use crate::error::Result;

/// Rendered in place of a parameter the caller did not supply.
pub const MISSING_PARAM: &str = "???";

/// Severity of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// Named parameter values for one diagnostic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Context(BTreeMap<String, String>);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing any earlier value of the same name.
    pub fn with(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// A rendered diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub message: String,
}

/// Summary of a validation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub valid: bool,
    pub errors: usize,
    pub warnings: usize,
    /// Latest diagnostic per distinct code, sorted by message.
    pub diagnostics: Vec<Diagnostic>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&diagnostic.message)?;
        }
        Ok(())
    }
}

/// Accumulates diagnostics for one validation run.
#[derive(Clone, Debug)]
pub struct ValidationLogger {
    catalog: Arc<CodeCatalog>,
    lang: String,
    show_warnings: bool,
    spec_url: String,
    latest: BTreeMap<String, Diagnostic>,
    log: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl ValidationLogger {
    /// Create a logger backed by the built-in catalog.
    pub fn new(config: &ValidateConfig) -> Result<Self> {
        Ok(Self::with_catalog(CodeCatalog::builtin()?, config))
    }

    /// Create a logger backed by a caller-supplied catalog.
    pub fn with_catalog(catalog: Arc<CodeCatalog>, config: &ValidateConfig) -> Self {
        Self {
            catalog,
            lang: config.lang.clone(),
            show_warnings: config.show_warnings,
            spec_url: config.spec_url.clone(),
            latest: BTreeMap::new(),
            log: Vec::new(),
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Record an error.
    pub fn error(&mut self, code: &str, context: &Context) {
        self.record(code, Severity::Error, context);
    }

    /// Record a warning.
    pub fn warn(&mut self, code: &str, context: &Context) {
        self.record(code, Severity::Warning, context);
    }

    fn record(&mut self, code: &str, severity: Severity, context: &Context) {
        let message = self.render(code, severity, context);
        debug!(code, %severity, %message, "diagnostic recorded");
        match severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        let diagnostic = Diagnostic {
            code: code.to_string(),
            severity,
            message,
        };
        self.latest.insert(code.to_string(), diagnostic.clone());
        self.log.push(diagnostic);
    }

    /// Render the message for `code` without recording it.
    pub fn render(&self, code: &str, severity: Severity, context: &Context) -> String {
        let mut message = match self.catalog.get(code) {
            Some(entry) => match entry.template(&self.lang) {
                Some(template) => {
                    format!("[{code}] {}", fill_template(template, &entry.params, context))
                }
                None => format!("[{code}] Unknown {severity}: {code} - no description, params ({context})"),
            },
            None => format!("Unknown {severity}: {code} - params ({context})"),
        };
        if let Some(cited) = spec_citation(code) {
            message.push_str(&format!(" (see {}#{cited})", self.spec_url));
        }
        message
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Returns `true` if no error has been recorded. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.error_count == 0
    }

    /// Distinct codes recorded so far, in code order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.latest.keys().map(String::as_str)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.latest.contains_key(code)
    }

    /// The most recent message recorded for `code`.
    pub fn message(&self, code: &str) -> Option<&str> {
        self.latest.get(code).map(|d| d.message.as_str())
    }

    /// Every diagnostic in the order it was recorded.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.log
    }

    /// Build the report: the latest message of each distinct code, sorted,
    /// with warnings left out unless the configuration shows them.
    pub fn report(&self) -> Report {
        let mut diagnostics: Vec<Diagnostic> = self
            .latest
            .values()
            .filter(|d| self.show_warnings || d.severity == Severity::Error)
            .cloned()
            .collect();
        diagnostics.sort_by(|a, b| a.message.cmp(&b.message));
        Report {
            valid: self.is_valid(),
            errors: self.error_count,
            warnings: self.warning_count,
            diagnostics,
        }
    }
}

impl fmt::Display for ValidationLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report().fmt(f)
    }
}

/// Substitute parameter values into the `%s` markers of `template`, in the
/// declared order of `params`.
///
/// Absent values and markers beyond the declared parameters render as
/// [`MISSING_PARAM`]. Declared parameters beyond the markers are appended as
/// `(name=value, ...)`.
fn fill_template(template: &str, params: &[String], context: &Context) -> String {
    let values: Vec<&str> = params
        .iter()
        .map(|name| context.get(name).unwrap_or(MISSING_PARAM))
        .collect();
    let mut pieces = template.split("%s");
    let mut out = pieces.next().unwrap_or_default().to_string();
    let mut used = 0;
    for piece in pieces {
        out.push_str(values.get(used).copied().unwrap_or(MISSING_PARAM));
        out.push_str(piece);
        used += 1;
    }
    if used < values.len() {
        let extra: Vec<String> = params[used..]
            .iter()
            .zip(&values[used..])
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        out.push_str(&format!(" ({})", extra.join(", ")));
    }
    out
}
