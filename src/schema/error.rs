use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One violated constraint, located by a dot-joined path relative to the
/// validated payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Schema errors with structured error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{}", summarize(.0))]
    Violations(Vec<FieldIssue>),

    #[error("Invalid schema key: {0}")]
    UnknownSection(String),

    #[error("Schema key '{0}' is a field, not a section")]
    NotASection(String),
}

impl SchemaError {
    /// Issues as reported to callers. Non-violation errors collapse to one entry.
    pub fn issues(&self) -> Vec<FieldIssue> {
        match self {
            SchemaError::Violations(issues) => issues.clone(),
            SchemaError::UnknownSection(key) => vec![FieldIssue::new(key.clone(), self.to_string())],
            SchemaError::NotASection(_) => vec![FieldIssue::new("unknown", self.to_string())],
        }
    }

    /// Multi-line summary, one `✖` bullet per issue.
    pub fn pretty(&self) -> String {
        self.issues()
            .iter()
            .map(|issue| {
                if issue.path.is_empty() {
                    format!("✖ {}", issue.message)
                } else {
                    format!("✖ {}\n  → at {}", issue.message, issue.path)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Single-line summary: `path: message, path: message`
pub fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
