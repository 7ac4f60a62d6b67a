use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{self, profile_schema, summarize, FieldIssue, Mode, SchemaError, SectionKey};

/// Result of validating a payload. `errors` is omitted on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldIssue>>,
}

impl ValidationOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            errors: None,
        }
    }

    pub fn failed(errors: Vec<FieldIssue>) -> Self {
        Self {
            success: false,
            errors: Some(errors),
        }
    }

    /// Issues reported, empty on success
    pub fn issues(&self) -> &[FieldIssue] {
        self.errors.as_deref().unwrap_or_default()
    }
}

/// Validates whole payloads or single sections against the shared profile
/// schema, keeping the last error summary around for display.
#[derive(Debug, Default)]
pub struct Validator {
    validation_error: Option<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `payload` against the partial schema of `section`, or of the
    /// whole record when `section` is `None`.
    pub fn validate(&mut self, section: Option<&str>, payload: &Value) -> ValidationOutcome {
        self.validation_error = None;

        let result = match section {
            None => schema::check(profile_schema(), payload, Mode::Partial),
            Some(key) => profile_schema()
                .lookup_section(key)
                .and_then(|section| schema::check(section, payload, Mode::Partial)),
        };

        self.finish(result)
    }

    /// Validate that `payload` is a complete profile record.
    pub fn validate_complete(&mut self, payload: &Value) -> ValidationOutcome {
        self.validation_error = None;
        let result = schema::check(profile_schema(), payload, Mode::Complete);
        self.finish(result)
    }

    /// Validate each of `keys` that `payload` carries against that section's
    /// partial schema. Issue paths are prefixed with the section key and the
    /// error slot summarizes every failing section.
    pub fn validate_sections(&mut self, payload: &Value, keys: &[SectionKey]) -> ValidationOutcome {
        self.validation_error = None;

        let mut issues = Vec::new();
        for key in keys {
            let Some(section) = payload.get(key.as_str()) else {
                continue;
            };
            let result = profile_schema()
                .lookup_section(key.as_str())
                .and_then(|schema| schema::check(schema, section, Mode::Partial));
            if let Err(err) = result {
                issues.extend(err.issues().into_iter().map(|issue| {
                    let path = if issue.path.is_empty() {
                        key.to_string()
                    } else {
                        format!("{}.{}", key, issue.path)
                    };
                    FieldIssue::new(path, issue.message)
                }));
            }
        }

        if issues.is_empty() {
            return ValidationOutcome::ok();
        }
        let summary = summarize(&issues);
        tracing::debug!(error = %summary, "profile section validation failed");
        self.validation_error = Some(summary);
        ValidationOutcome::failed(issues)
    }

    /// Summary of the last failed validation
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn clear_errors(&mut self) {
        self.validation_error = None;
    }

    fn finish(&mut self, result: Result<(), SchemaError>) -> ValidationOutcome {
        match result {
            Ok(()) => ValidationOutcome::ok(),
            Err(err) => {
                let issues = err.issues();
                let summary = err.to_string();
                tracing::debug!(error = %summary, "profile validation failed");
                self.validation_error = Some(summary);
                ValidationOutcome::failed(issues)
            }
        }
    }
}
