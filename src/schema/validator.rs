//! Declarative validators for action input.
//!
//! A [`Schema`] is either open ([`Schema::Any`]) or an object schema listing
//! the fields it accepts. Object schemas reject undeclared fields unless
//! built with [`ObjectSchema::allow_unknown`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{FieldViolation, InputPart, ValidationError, ViolationKind};

/// The JSON type a field must have.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Any JSON value.
    #[default]
    Any,
    /// A JSON string.
    String,
    /// A JSON number without a fractional part.
    Integer,
    /// Any JSON number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl FieldType {
    /// Returns the lower-case name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Returns `true` if `value` has this type.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

/// The rule for one declared field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// The expected JSON type.
    #[serde(rename = "type", default)]
    pub kind: FieldType,
    /// Whether the field must be present.
    #[serde(default)]
    pub required: bool,
}

/// A validator for the query or body part of an action's input.
///
/// # Example
///
/// ```rust
/// use bandwidth_api::clients::InputPart;
/// use bandwidth_api::schema::{FieldType, Schema};
/// use serde_json::{json, Value};
///
/// let schema: Schema = Schema::object()
///     .required("to", FieldType::String)
///     .field("callbackUrl", FieldType::String)
///     .into();
///
/// let input = json!({"to": "+15551234567"});
/// let Value::Object(input) = input else { unreachable!() };
/// assert!(schema.validate(InputPart::Body, &input).is_ok());
/// assert!(!schema.accepts_field("text"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schema {
    /// Accepts any input, including none.
    #[default]
    Any,
    /// Accepts an object whose fields follow the declared rules.
    Object {
        /// Declared fields.
        #[serde(default)]
        fields: BTreeMap<String, FieldRule>,
        /// Whether undeclared fields are accepted.
        #[serde(default, rename = "allowUnknown")]
        allow_unknown: bool,
    },
}

impl Schema {
    /// Starts building a closed object schema.
    #[must_use]
    pub fn object() -> ObjectSchema {
        ObjectSchema::default()
    }

    /// Returns the declared field names (empty for [`Schema::Any`]).
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        let fields = match self {
            Self::Any => None,
            Self::Object { fields, .. } => Some(fields.keys().map(String::as_str)),
        };
        fields.into_iter().flatten()
    }

    /// Validates an object's fields against this schema.
    ///
    /// Every violation is collected, in declaration order for missing or
    /// mistyped fields followed by input order for unknown fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] tagged with `part` listing every violation.
    pub fn validate(
        &self,
        part: InputPart,
        input: &Map<String, Value>,
    ) -> Result<(), ValidationError> {
        let Self::Object {
            fields,
            allow_unknown,
        } = self
        else {
            return Ok(());
        };

        let mut violations = Vec::new();

        for (name, rule) in fields {
            match input.get(name) {
                None if rule.required => violations.push(FieldViolation {
                    field: name.clone(),
                    kind: ViolationKind::Missing,
                }),
                Some(value) if !rule.kind.matches(value) => violations.push(FieldViolation {
                    field: name.clone(),
                    kind: ViolationKind::WrongType {
                        expected: rule.kind.as_str(),
                    },
                }),
                _ => {}
            }
        }

        if !allow_unknown {
            violations.extend(
                input
                    .keys()
                    .filter(|key| !fields.contains_key(*key))
                    .map(|key| FieldViolation {
                        field: key.clone(),
                        kind: ViolationKind::Unknown,
                    }),
            );
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { part, violations })
        }
    }

    /// Returns `true` if an input field named `name` would not be rejected
    /// as unknown.
    #[must_use]
    pub fn accepts_field(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Object {
                fields,
                allow_unknown,
            } => *allow_unknown || fields.contains_key(name),
        }
    }
}

/// Builder for [`Schema::Object`].
#[derive(Clone, Debug, Default)]
pub struct ObjectSchema {
    fields: BTreeMap<String, FieldRule>,
    allow_unknown: bool,
}

impl ObjectSchema {
    /// Declares an optional field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: FieldType) -> Self {
        self.fields.insert(
            name.into(),
            FieldRule {
                kind,
                required: false,
            },
        );
        self
    }

    /// Declares a required field.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>, kind: FieldType) -> Self {
        self.fields.insert(
            name.into(),
            FieldRule {
                kind,
                required: true,
            },
        );
        self
    }

    /// Accepts fields that were not declared.
    #[must_use]
    pub const fn allow_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }

    /// Finishes the schema.
    #[must_use]
    pub fn build(self) -> Schema {
        Schema::Object {
            fields: self.fields,
            allow_unknown: self.allow_unknown,
        }
    }
}

impl From<ObjectSchema> for Schema {
    fn from(builder: ObjectSchema) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_any_accepts_everything() {
        let schema = Schema::Any;
        assert!(schema
            .validate(InputPart::Query, &as_map(json!({"a": 1, "b": [1, 2]})))
            .is_ok());
        assert!(schema.validate(InputPart::Query, &Map::new()).is_ok());
    }

    #[test]
    fn test_object_accepts_declared_fields() {
        let schema = Schema::object().field("test", FieldType::String).build();
        assert!(schema
            .validate(InputPart::Body, &as_map(json!({"test": "test"})))
            .is_ok());
        assert!(schema.validate(InputPart::Body, &Map::new()).is_ok());
    }

    #[test]
    fn test_object_reports_missing_required_field() {
        let schema = Schema::object().required("to", FieldType::String).build();
        let error = schema.validate(InputPart::Body, &Map::new()).unwrap_err();

        assert_eq!(error.part, InputPart::Body);
        assert_eq!(error.fields(), vec!["to"]);
        assert_eq!(error.violations[0].kind, ViolationKind::Missing);
    }

    #[test]
    fn test_object_reports_wrong_type() {
        let schema = Schema::object().field("size", FieldType::Integer).build();
        let error = schema
            .validate(InputPart::Query, &as_map(json!({"size": 2.5})))
            .unwrap_err();

        assert_eq!(
            error.violations[0].kind,
            ViolationKind::WrongType {
                expected: "integer"
            }
        );
    }

    #[test]
    fn test_closed_object_rejects_unknown_fields() {
        let schema = Schema::object().field("test", FieldType::String).build();
        let error = schema
            .validate(InputPart::Body, &as_map(json!({"test": "ok", "extra": true})))
            .unwrap_err();

        assert_eq!(error.fields(), vec!["extra"]);
        assert_eq!(error.violations[0].kind, ViolationKind::Unknown);
    }

    #[test]
    fn test_open_object_accepts_unknown_fields() {
        let schema = Schema::object()
            .field("test", FieldType::String)
            .allow_unknown()
            .build();
        assert!(schema
            .validate(InputPart::Body, &as_map(json!({"test": "ok", "extra": true})))
            .is_ok());
    }

    #[test]
    fn test_violations_are_collected() {
        let schema = Schema::object()
            .required("a", FieldType::String)
            .field("b", FieldType::Boolean)
            .build();
        let error = schema
            .validate(InputPart::Body, &as_map(json!({"b": "no", "c": 1})))
            .unwrap_err();

        assert_eq!(error.fields(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_accepts_field() {
        let closed = Schema::object().field("a", FieldType::String).build();
        assert!(closed.accepts_field("a"));
        assert!(!closed.accepts_field("b"));

        let open = Schema::object().allow_unknown().build();
        assert!(open.accepts_field("b"));
        assert!(Schema::Any.accepts_field("b"));
    }

    #[test]
    fn test_field_type_matches() {
        assert!(FieldType::Integer.matches(&json!(100)));
        assert!(!FieldType::Integer.matches(&json!("100")));
        assert!(FieldType::Number.matches(&json!(1.5)));
        assert!(FieldType::Array.matches(&json!([])));
        assert!(FieldType::Object.matches(&json!({})));
        assert!(FieldType::Any.matches(&Value::Null));
    }

    #[test]
    fn test_schema_deserializes_from_json() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "fields": {
                "to": {"type": "string", "required": true},
                "tag": {"type": "string"}
            }
        }))
        .unwrap();

        assert_eq!(
            schema,
            Schema::object()
                .required("to", FieldType::String)
                .field("tag", FieldType::String)
                .build()
        );

        let schema: Schema = serde_json::from_value(json!({"type": "any"})).unwrap();
        assert_eq!(schema, Schema::Any);
    }

    #[test]
    fn test_field_names() {
        let schema = Schema::object()
            .field("b", FieldType::Any)
            .field("a", FieldType::Any)
            .build();
        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(Schema::Any.field_names().count(), 0);
    }
}
