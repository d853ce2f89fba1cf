//! Path template handling for action descriptors.
//!
//! Action paths may contain named placeholders, e.g. `/calls/{callId}`.
//! Each placeholder is filled from the caller input key of the same name.
//!
//! # Example
//!
//! ```rust
//! use bandwidth_api::schema::{build_path, placeholders};
//! use serde_json::{json, Map, Value};
//!
//! assert_eq!(placeholders("/calls/{callId}/audio"), vec!["callId"]);
//!
//! let mut input = Map::new();
//! input.insert("callId".to_string(), json!("c-1 2"));
//! assert_eq!(build_path("/calls/{callId}", &mut input).unwrap(), "/calls/c-1%202");
//! assert!(input.is_empty());
//! ```

use serde_json::{Map, Value};

use crate::clients::{FieldViolation, InputPart, ValidationError, ViolationKind};

/// Returns the placeholder names in a path template, in order of appearance.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
        rest = &rest[start + len + 1..];
    }

    names
}

/// Interpolates a path template, consuming the input keys it uses.
///
/// Values are percent-encoded so they always stay within one path segment.
///
/// # Errors
///
/// Returns a [`ValidationError`] on [`InputPart::Path`] naming every
/// placeholder that has no (non-null) value in `input`.
pub fn build_path(
    template: &str,
    input: &mut Map<String, Value>,
) -> Result<String, ValidationError> {
    let names = placeholders(template);

    let missing: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| input.get(*name).map_or(true, Value::is_null))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError {
            part: InputPart::Path,
            violations: missing
                .into_iter()
                .map(|name| FieldViolation {
                    field: name.to_string(),
                    kind: ViolationKind::Missing,
                })
                .collect(),
        });
    }

    let mut result = template.to_string();
    for name in &names {
        if let Some(value) = input.get(*name) {
            let placeholder = format!("{{{name}}}");
            let encoded = urlencoding::encode(&param_value(value)).into_owned();
            result = result.replace(&placeholder, &encoded);
        }
    }

    // Remaining keys must keep their insertion order
    if !names.is_empty() {
        *input = std::mem::take(input)
            .into_iter()
            .filter(|(key, _)| !names.contains(&key.as_str()))
            .collect();
    }

    Ok(result)
}

/// Renders a JSON value as a URL parameter.
///
/// Strings are used verbatim; every other value uses its JSON text.
#[must_use]
pub fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
