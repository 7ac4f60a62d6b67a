use serde_json::{Map, Value};
use validator::ValidateEmail;

use super::error::{FieldIssue, SchemaError};
use super::{FieldRule, ObjectSchema, SchemaNode};

/// How strictly a payload is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Top-level keys optional. A nested section that is present must still
    /// carry all of its required fields.
    Partial,
    /// Required fields must be present.
    Complete,
}

/// Check `payload` against `schema`, collecting every violation.
///
/// Keys the schema does not know are ignored.
pub fn check(schema: &ObjectSchema, payload: &Value, mode: Mode) -> Result<(), SchemaError> {
    let mut issues = Vec::new();
    let mut path = Vec::new();
    check_object(schema, payload, mode, &mut path, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::Violations(issues))
    }
}

fn check_object(
    schema: &ObjectSchema,
    payload: &Value,
    mode: Mode,
    path: &mut Vec<&'static str>,
    issues: &mut Vec<FieldIssue>,
) {
    let Some(object) = payload.as_object() else {
        issues.push(FieldIssue::new(path.join("."), invalid_type("object", payload)));
        return;
    };

    for (name, node) in schema.iter() {
        path.push(name);
        check_node(node, object, name, mode, path, issues);
        path.pop();
    }
}

fn check_node(
    node: &SchemaNode,
    object: &Map<String, Value>,
    name: &str,
    mode: Mode,
    path: &mut Vec<&'static str>,
    issues: &mut Vec<FieldIssue>,
) {
    let value = object.get(name);
    match (node, value) {
        (SchemaNode::Section(section), Some(value)) => {
            check_object(section, value, Mode::Complete, path, issues)
        }
        (SchemaNode::Section(_), None) => {
            if mode == Mode::Complete {
                issues.push(FieldIssue::new(path.join("."), missing("object")));
            }
        }
        (SchemaNode::Field(rule), Some(value)) => {
            if let Some(message) = check_field(*rule, value) {
                issues.push(FieldIssue::new(path.join("."), message));
            }
        }
        (SchemaNode::Field(rule), None) => {
            if mode == Mode::Complete && rule.is_required() {
                issues.push(FieldIssue::new(path.join("."), missing(rule.expected())));
            }
        }
    }
}

fn check_field(rule: FieldRule, value: &Value) -> Option<String> {
    match (rule, value) {
        (FieldRule::OptionalText, Value::Null | Value::String(_)) => None,
        (FieldRule::Text, Value::String(text)) if text.is_empty() => {
            Some("Too small: expected string to have >=1 characters".to_string())
        }
        (FieldRule::Text, Value::String(_)) => None,
        (FieldRule::Email, Value::String(text)) if !text.validate_email() => {
            Some("Invalid email address".to_string())
        }
        (FieldRule::Email, Value::String(_)) => None,
        (FieldRule::Flag | FieldRule::FlagWithDefault, Value::Bool(_)) => None,
        (rule, value) => Some(invalid_type(rule.expected(), value)),
    }
}

fn invalid_type(expected: &str, value: &Value) -> String {
    format!("Invalid input: expected {}, received {}", expected, type_name(value))
}

fn missing(expected: &str) -> String {
    format!("Invalid input: expected {}, received undefined", expected)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
