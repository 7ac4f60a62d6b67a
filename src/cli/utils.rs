use anyhow::Context;
use serde_json::{json, Map, Value};
use std::io::Read;

use crate::cli::OutputFormat;
use crate::schema::FieldIssue;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
            if let Some(data_value) = data {
                print_fields(&data_value);
            }
        }
    }
    Ok(())
}

/// Output a failure with its field issues in the appropriate format
pub fn output_issues(
    output_format: &OutputFormat,
    message: &str,
    issues: &[FieldIssue],
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": message,
                "errors": issues,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("✖ {}", message);
            for issue in issues {
                eprintln!("  {}", issue);
            }
        }
    }
    Ok(())
}

/// Print a JSON object as `dotted.path: value` lines
pub fn print_fields(value: &Value) {
    let mut lines = Vec::new();
    flatten("", value, &mut lines);
    for (path, rendered) in lines {
        println!("{}: {}", path, rendered);
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, nested, out);
            }
        }
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

/// Parse a JSON payload from the argument, or from stdin when it is absent or `-`
pub fn read_payload(arg: Option<String>) -> anyhow::Result<Value> {
    let raw = match arg.as_deref() {
        None | Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read payload from stdin")?;
            buffer
        }
        Some(inline) => inline.to_string(),
    };

    serde_json::from_str(&raw).context("Payload is not valid JSON")
}

/// Parse a JSON payload that must be an object
pub fn read_object(arg: Option<String>) -> anyhow::Result<Map<String, Value>> {
    match read_payload(arg)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow::anyhow!(
            "Expected a JSON object, received {}",
            type_name(&other)
        )),
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_nested_paths() {
        let mut lines = Vec::new();
        flatten(
            "",
            &json!({ "firstName": "Jane", "department": null, "tax": { "noTaxId": false } }),
            &mut lines,
        );
        assert!(lines.contains(&("firstName".to_string(), "Jane".to_string())));
        assert!(lines.contains(&("department".to_string(), "null".to_string())));
        assert!(lines.contains(&("tax.noTaxId".to_string(), "false".to_string())));
    }

    #[test]
    fn test_read_inline_object() {
        let map = read_object(Some(r#"{"city":"Berlin"}"#.to_string())).unwrap();
        assert_eq!(map.get("city"), Some(&json!("Berlin")));
    }

    #[test]
    fn test_read_rejects_non_object() {
        let err = read_object(Some("[1,2]".to_string())).unwrap_err();
        assert_eq!(err.to_string(), "Expected a JSON object, received array");
        assert!(read_payload(Some("{oops".to_string())).is_err());
    }
}
