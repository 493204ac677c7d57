//! Migration outcomes and their human-readable report

use crate::resolver::UnresolvedDependency;
use std::fmt;

/// Whether a run submits changes or only computes them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Migrate,
    /// Dry run: match and resolve, never create or update
    Check,
}

impl RunMode {
    pub fn is_check(&self) -> bool {
        matches!(self, RunMode::Check)
    }
}

/// Why an entity was not migrated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The entity has no title in the selected language
    MissingTitle { language: String },
    /// One or more mandatory references have no destination counterpart
    Unresolved(Vec<UnresolvedDependency>),
    /// The instance answered with `"success": false`
    Rejected(String),
    /// An earlier source entity with the same natural key was already created
    /// (or queued, in check mode) during this run
    DuplicateKey,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MissingTitle { language } => {
                write!(f, "no title in language '{}'", language)
            }
            FailureReason::Unresolved(missing) => {
                let names: Vec<String> = missing.iter().map(|m| m.to_string()).collect();
                write!(f, "not found at destination: {}", names.join(", "))
            }
            FailureReason::Rejected(errors) => write!(f, "rejected: {}", errors),
            FailureReason::DuplicateKey => f.write_str("duplicate natural key in source"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedEntity {
    pub key: String,
    pub reason: FailureReason,
}

/// Outcome sets of one pipeline run or reconciliation stage
///
/// Every processed entity lands in exactly one set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOutcome {
    /// Run title, e.g. `licenses` or `categories stage 2/3: update category children`
    pub title: String,
    pub mode: RunMode,
    pub skipped: Vec<String>,
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub failed: Vec<FailedEntity>,
    /// Entities of a variant this tool cannot copy
    pub unsupported: Vec<String>,
}

impl MigrationOutcome {
    pub fn new(title: impl Into<String>, mode: RunMode) -> Self {
        Self {
            title: title.into(),
            mode,
            skipped: Vec::new(),
            created: Vec::new(),
            updated: Vec::new(),
            failed: Vec::new(),
            unsupported: Vec::new(),
        }
    }

    pub fn fail(&mut self, key: impl Into<String>, reason: FailureReason) {
        let key = key.into();
        tracing::warn!(run = %self.title, key = %key, reason = %reason, "Entity not migrated");
        self.failed.push(FailedEntity { key, reason });
    }

    /// Names of the failed entities
    pub fn failed_keys(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.key.as_str()).collect()
    }

    /// Number of entities this outcome accounts for
    pub fn total(&self) -> usize {
        self.skipped.len()
            + self.created.len()
            + self.updated.len()
            + self.failed.len()
            + self.unsupported.len()
    }
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (created, updated) = match self.mode {
            RunMode::Migrate => ("created", "updated"),
            RunMode::Check => ("would create", "would update"),
        };

        writeln!(f, "{}", self.title)?;
        writeln!(f, "  skipped: {:?}", self.skipped)?;
        writeln!(f, "  {}: {:?}", created, self.created)?;
        if !self.updated.is_empty() {
            writeln!(f, "  {}: {:?}", updated, self.updated)?;
        }
        if !self.unsupported.is_empty() {
            writeln!(f, "  not supported: {:?}", self.unsupported)?;
        }
        if !self.failed.is_empty() {
            writeln!(f, "  failed:")?;
            for failure in &self.failed {
                writeln!(f, "    {:?}: {}", failure.key, failure.reason)?;
            }
        }
        Ok(())
    }
}
