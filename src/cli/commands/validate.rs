use crate::cli::utils::{output_issues, output_success, read_payload};
use crate::cli::OutputFormat;
use crate::form::FormState;
use crate::validation::Validator;

/// Validate a payload locally, without contacting a server.
pub fn handle(
    payload: Option<String>,
    section: Option<String>,
    complete: bool,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let payload = read_payload(payload)?;
    let mut validator = Validator::new();

    let outcome = if complete {
        validator.validate_complete(&payload)
    } else {
        validator.validate(section.as_deref(), &payload)
    };

    let target = match section.as_deref() {
        Some(key) => format!("Section '{}'", key),
        None if complete => "Complete profile".to_string(),
        None => "Profile".to_string(),
    };

    if outcome.success {
        return output_success(&output_format, &format!("{} is valid", target), None);
    }

    let message = validator
        .validation_error()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} is invalid", target));
    output_issues(&output_format, &message, outcome.issues())?;
    Err(anyhow::anyhow!("{} failed validation", target))
}

/// Print the record a form starts from when no remote profile exists.
pub fn defaults(output_format: OutputFormat) -> anyhow::Result<()> {
    let data = serde_json::to_value(FormState::initialize(None))?;
    output_success(&output_format, "Default profile", Some(data))
}
