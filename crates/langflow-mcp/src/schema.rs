// crates/langflow-mcp/src/schema.rs
// ============================================================================
// Module: Tool Input Schemas
// Description: Declarative argument validators with JSON Schema rendering.
// Purpose: Validate untrusted tool arguments before any remote call.
// Dependencies: serde, serde_json, thiserror, uuid
// ============================================================================

//! ## Overview
//! Each tool declares an [`ObjectSchema`]: a list of fields with a presence
//! mode and a [`Rule`], plus optional cross-field constraints. The same
//! declaration drives two things:
//! - [`ObjectSchema::validate`] turns raw JSON into [`ValidatedArguments`]
//!   (defaults applied) or a [`ValidationFailure`] listing every issue.
//! - [`ObjectSchema::json_schema`] renders the `inputSchema` advertised in
//!   the tool catalog.
//!
//! ## Invariants
//! - Top-level tool schemas are strict: unknown keys are reported.
//! - Validation never stops at the first issue; all issues are collected.
//! - Cross-field rules run even when individual fields already failed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::file_guard::estimated_decoded_len;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Longest accepted name or file name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Message for update schemas with nothing to change.
pub const EMPTY_UPDATE_MESSAGE: &str = "At least one field must be provided for update";

/// Message for unsafe file names.
pub const INVALID_FILE_NAME_MESSAGE: &str = "Invalid filename. Contains forbidden characters, \
                                             reserved names, or path traversal sequences.";

/// Windows device names rejected as file stems.
const RESERVED_FILE_STEMS: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

// ============================================================================
// SECTION: Validation Results
// ============================================================================

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted field path; empty for object-level issues.
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

/// Every violated constraint for one argument set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation error")]
pub struct ValidationFailure {
    /// Collected issues, in field declaration order.
    issues: Vec<ValidationIssue>,
}

impl ValidationFailure {
    /// Wraps a list of issues.
    #[must_use]
    pub const fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Returns the collected issues.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Returns true when any issue carries `message`.
    #[must_use]
    pub fn has_message(&self, message: &str) -> bool {
        self.issues.iter().any(|issue| issue.message == message)
    }
}

/// Accessor failure on already validated arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid parameters: {0}")]
pub struct ArgumentError(String);

/// Arguments that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatedArguments(Map<String, Value>);

impl ValidatedArguments {
    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a required string field.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the field is absent or not a string.
    pub fn text(&self, key: &str) -> Result<String, ArgumentError> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ArgumentError(format!("missing string field {key}")))
    }

    /// Returns a string-array field.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the field is absent or malformed.
    pub fn text_list(&self, key: &str) -> Result<Vec<String>, ArgumentError> {
        let items = self
            .0
            .get(key)
            .and_then(Value::as_array)
            .ok_or_else(|| ArgumentError(format!("missing array field {key}")))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ArgumentError(format!("non-string element in {key}")))
            })
            .collect()
    }

    /// Deserializes the whole argument map into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the shape does not fit `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ArgumentError> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|err| ArgumentError(err.to_string()))
    }

    /// Deserializes one field into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when the field is absent or does not fit `T`.
    pub fn decode_field<T: DeserializeOwned>(&self, key: &str) -> Result<T, ArgumentError> {
        let value =
            self.0.get(key).cloned().ok_or_else(|| ArgumentError(format!("missing {key}")))?;
        serde_json::from_value(value).map_err(|err| ArgumentError(format!("{key}: {err}")))
    }

    /// Returns the arguments as a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Length or count bound with its failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    /// Limit value.
    pub limit: usize,
    /// Message reported when the bound is violated.
    pub message: &'static str,
}

/// Integer bound with its failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntBound {
    /// Limit value.
    pub limit: i64,
    /// Message reported when the bound is violated.
    pub message: &'static str,
}

/// Constraint applied to one field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// String with optional character-count bounds.
    Text {
        /// Minimum length.
        min: Option<Bound>,
        /// Maximum length.
        max: Option<Bound>,
    },
    /// Hyphenated UUID string.
    Uuid {
        /// Message for malformed identifiers.
        message: &'static str,
    },
    /// Whole number with optional bounds; fractional values are rejected.
    Integer {
        /// Inclusive lower bound.
        min: Option<IntBound>,
        /// Inclusive upper bound.
        max: Option<IntBound>,
    },
    /// Boolean.
    Boolean,
    /// Free-form JSON object.
    Record,
    /// One of a closed set of strings.
    Choice {
        /// Accepted values.
        options: &'static [&'static str],
    },
    /// Array whose elements all satisfy `item`.
    List {
        /// Element rule.
        item: Box<Self>,
        /// Minimum element count.
        min_items: Option<Bound>,
    },
    /// Nested object.
    Object(Box<ObjectSchema>),
    /// File name safe to embed in a remote path.
    FileName,
    /// File content checked against a size ceiling before decoding.
    Payload {
        /// Message for empty content.
        required: &'static str,
        /// Decoded-size ceiling in bytes.
        max_bytes: usize,
        /// How the string maps to file bytes.
        encoding: PayloadEncoding,
    },
}

/// Representation of file content inside a string argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// Base64 text; size is estimated from the encoded length.
    Base64,
    /// Literal text uploaded as its UTF-8 bytes.
    Raw,
}

impl PayloadEncoding {
    /// Returns the file size represented by `text`.
    fn file_len(self, text: &str) -> usize {
        match self {
            Self::Base64 => estimated_decoded_len(text.len()),
            Self::Raw => text.len(),
        }
    }
}

impl Rule {
    /// Unbounded string.
    #[must_use]
    pub const fn text() -> Self {
        Self::Text { min: None, max: None }
    }

    /// Non-empty string.
    #[must_use]
    pub const fn required_text(message: &'static str) -> Self {
        Self::min_text(1, message)
    }

    /// String of at least `limit` characters.
    #[must_use]
    pub const fn min_text(limit: usize, message: &'static str) -> Self {
        Self::Text { min: Some(Bound { limit, message }), max: None }
    }

    /// Non-empty name of at most [`MAX_NAME_LENGTH`] characters.
    #[must_use]
    pub const fn name(required: &'static str, too_long: &'static str) -> Self {
        Self::Text {
            min: Some(Bound { limit: 1, message: required }),
            max: Some(Bound { limit: MAX_NAME_LENGTH, message: too_long }),
        }
    }

    /// UUID string.
    #[must_use]
    pub const fn uuid(message: &'static str) -> Self {
        Self::Uuid { message }
    }

    /// Positive page number.
    #[must_use]
    pub const fn page() -> Self {
        Self::Integer {
            min: Some(IntBound { limit: 1, message: "Number must be greater than 0" }),
            max: None,
        }
    }

    /// Positive page size capped at [`MAX_PAGE_SIZE`].
    #[must_use]
    pub const fn page_size(too_large: &'static str) -> Self {
        Self::Integer {
            min: Some(IntBound { limit: 1, message: "Number must be greater than 0" }),
            max: Some(IntBound { limit: MAX_PAGE_SIZE, message: too_large }),
        }
    }

    /// Whole number greater than or equal to zero.
    #[must_use]
    pub const fn non_negative() -> Self {
        Self::Integer {
            min: Some(IntBound {
                limit: 0,
                message: "Number must be greater than or equal to 0",
            }),
            max: None,
        }
    }

    /// Boolean.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::Boolean
    }

    /// Free-form object.
    #[must_use]
    pub const fn record() -> Self {
        Self::Record
    }

    /// Closed string set.
    #[must_use]
    pub const fn choice(options: &'static [&'static str]) -> Self {
        Self::Choice { options }
    }

    /// Array without a length requirement.
    #[must_use]
    pub fn list(item: Self) -> Self {
        Self::List { item: Box::new(item), min_items: None }
    }

    /// Array with at least one element.
    #[must_use]
    pub fn non_empty_list(item: Self, message: &'static str) -> Self {
        Self::List { item: Box::new(item), min_items: Some(Bound { limit: 1, message }) }
    }

    /// Nested object.
    #[must_use]
    pub fn object(schema: ObjectSchema) -> Self {
        Self::Object(Box::new(schema))
    }

    /// Safe file name.
    #[must_use]
    pub const fn file_name() -> Self {
        Self::FileName
    }

    /// Non-empty base64 content under `max_bytes` once decoded.
    #[must_use]
    pub const fn payload(required: &'static str, max_bytes: usize) -> Self {
        Self::Payload { required, max_bytes, encoding: PayloadEncoding::Base64 }
    }

    /// Non-empty literal content of at most `max_bytes` UTF-8 bytes.
    #[must_use]
    pub const fn raw_payload(required: &'static str, max_bytes: usize) -> Self {
        Self::Payload { required, max_bytes, encoding: PayloadEncoding::Raw }
    }

    /// Checks `value`, recording issues under `path`.
    ///
    /// Returns the normalised value when the check passes.
    fn check(&self, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) -> Option<Value> {
        match self {
            Self::Text { min, max } => {
                let text = expect_str(value, path, issues)?;
                let length = text.chars().count();
                if let Some(bound) = min
                    && length < bound.limit
                {
                    push(issues, path, bound.message);
                    return None;
                }
                if let Some(bound) = max
                    && length > bound.limit
                {
                    push(issues, path, bound.message);
                    return None;
                }
                Some(value.clone())
            }
            Self::Uuid { message } => {
                let text = expect_str(value, path, issues)?;
                if is_hyphenated_uuid(text) {
                    Some(value.clone())
                } else {
                    push(issues, path, message);
                    None
                }
            }
            Self::Integer { min, max } => check_integer(value, *min, *max, path, issues),
            Self::Boolean => {
                if value.is_boolean() {
                    Some(value.clone())
                } else {
                    push_type(issues, path, "boolean", value);
                    None
                }
            }
            Self::Record => {
                if value.is_object() {
                    Some(value.clone())
                } else {
                    push_type(issues, path, "object", value);
                    None
                }
            }
            Self::Choice { options } => {
                let text = expect_str(value, path, issues)?;
                if options.contains(&text) {
                    Some(value.clone())
                } else {
                    let expected =
                        options.iter().map(|option| format!("'{option}'")).collect::<Vec<_>>();
                    push(
                        issues,
                        path,
                        &format!(
                            "Invalid enum value. Expected {}, received '{text}'",
                            expected.join(" | ")
                        ),
                    );
                    None
                }
            }
            Self::List { item, min_items } => {
                let Some(items) = value.as_array() else {
                    push_type(issues, path, "array", value);
                    return None;
                };
                let before = issues.len();
                if let Some(bound) = min_items
                    && items.len() < bound.limit
                {
                    push(issues, path, bound.message);
                }
                let checked: Vec<Value> = items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, element)| {
                        item.check(element, &join_path(path, &index.to_string()), issues)
                    })
                    .collect();
                (issues.len() == before).then_some(Value::Array(checked))
            }
            Self::Object(schema) => {
                let before = issues.len();
                let map = schema.check_object(value, path, issues);
                (issues.len() == before).then_some(Value::Object(map))
            }
            Self::FileName => {
                let text = expect_str(value, path, issues)?;
                let length = text.chars().count();
                if length == 0 {
                    push(issues, path, "Filename is required");
                    None
                } else if length > MAX_NAME_LENGTH {
                    push(issues, path, "Filename too long");
                    None
                } else if is_safe_file_name(text) {
                    Some(value.clone())
                } else {
                    push(issues, path, INVALID_FILE_NAME_MESSAGE);
                    None
                }
            }
            Self::Payload { required, max_bytes, encoding } => {
                let text = expect_str(value, path, issues)?;
                if text.is_empty() {
                    push(issues, path, required);
                    None
                } else if encoding.file_len(text) > *max_bytes {
                    push(issues, path, &format!("File size exceeds limit of {max_bytes} bytes"));
                    None
                } else {
                    Some(value.clone())
                }
            }
        }
    }

    /// Renders the JSON Schema fragment for this rule.
    fn json_schema(&self) -> Value {
        match self {
            Self::Text { min, max } => {
                let mut schema = json!({ "type": "string" });
                if let Some(bound) = min {
                    schema["minLength"] = json!(bound.limit);
                }
                if let Some(bound) = max {
                    schema["maxLength"] = json!(bound.limit);
                }
                schema
            }
            Self::Uuid { .. } => json!({ "type": "string", "format": "uuid" }),
            Self::Integer { min, max } => {
                let mut schema = json!({ "type": "integer" });
                if let Some(bound) = min {
                    schema["minimum"] = json!(bound.limit);
                }
                if let Some(bound) = max {
                    schema["maximum"] = json!(bound.limit);
                }
                schema
            }
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Record => json!({ "type": "object" }),
            Self::Choice { options } => json!({ "type": "string", "enum": options }),
            Self::List { item, min_items } => {
                let mut schema = json!({ "type": "array", "items": item.json_schema() });
                if let Some(bound) = min_items {
                    schema["minItems"] = json!(bound.limit);
                }
                schema
            }
            Self::Object(schema) => schema.json_schema(),
            Self::FileName => json!({ "type": "string", "minLength": 1, "maxLength": MAX_NAME_LENGTH }),
            Self::Payload { .. } => json!({ "type": "string", "minLength": 1 }),
        }
    }
}

// ============================================================================
// SECTION: Object Schemas
// ============================================================================

/// How a field may be absent.
#[derive(Debug, Clone, PartialEq)]
enum Presence {
    /// Absence is an issue.
    Required,
    /// Absence is allowed and leaves the field unset.
    Optional,
    /// Absence is replaced by the value.
    Default(Value),
}

/// One declared field.
#[derive(Debug, Clone, PartialEq)]
struct Field {
    /// Key name.
    name: &'static str,
    /// Catalog description.
    description: &'static str,
    /// Presence mode.
    presence: Presence,
    /// Value rule.
    rule: Rule,
}

/// Cross-field requirement that at least one of several keys is present.
#[derive(Debug, Clone, PartialEq)]
struct AtLeastOne {
    /// Keys of which one must be present.
    fields: &'static [&'static str],
    /// Message reported at the object path.
    message: &'static str,
}

/// Declarative object validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    /// Declared fields, in catalog order.
    fields: Vec<Field>,
    /// Unknown keys are reported when set; otherwise they are dropped.
    strict: bool,
    /// Optional cross-field requirement.
    at_least_one: Option<AtLeastOne>,
}

impl ObjectSchema {
    /// Empty schema that rejects unknown keys.
    #[must_use]
    pub const fn strict() -> Self {
        Self { fields: Vec::new(), strict: true, at_least_one: None }
    }

    /// Empty schema that drops unknown keys.
    #[must_use]
    pub const fn open() -> Self {
        Self { fields: Vec::new(), strict: false, at_least_one: None }
    }

    /// Adds a required field.
    #[must_use]
    pub fn required(self, name: &'static str, rule: Rule, description: &'static str) -> Self {
        self.field(name, rule, Presence::Required, description)
    }

    /// Adds an optional field.
    #[must_use]
    pub fn optional(self, name: &'static str, rule: Rule, description: &'static str) -> Self {
        self.field(name, rule, Presence::Optional, description)
    }

    /// Adds a field that defaults to `default` when absent.
    #[must_use]
    pub fn defaulted(
        self,
        name: &'static str,
        rule: Rule,
        default: Value,
        description: &'static str,
    ) -> Self {
        self.field(name, rule, Presence::Default(default), description)
    }

    /// Requires at least one of `fields` to be present.
    #[must_use]
    pub fn at_least_one_of(
        mut self,
        fields: &'static [&'static str],
        message: &'static str,
    ) -> Self {
        self.at_least_one = Some(AtLeastOne { fields, message });
        self
    }

    /// Appends a field declaration.
    fn field(
        mut self,
        name: &'static str,
        rule: Rule,
        presence: Presence,
        description: &'static str,
    ) -> Self {
        self.fields.push(Field { name, description, presence, rule });
        self
    }

    /// Returns the declared field names.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    /// Validates `input` as a top-level argument object.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] listing every violated constraint.
    pub fn validate(&self, input: &Value) -> Result<ValidatedArguments, ValidationFailure> {
        let mut issues = Vec::new();
        let map = self.check_object(input, "", &mut issues);
        if issues.is_empty() {
            Ok(ValidatedArguments(map))
        } else {
            Err(ValidationFailure { issues })
        }
    }

    /// Checks an object value, returning the accepted fields.
    fn check_object(
        &self,
        input: &Value,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Map<String, Value> {
        let mut accepted = Map::new();
        let Some(object) = input.as_object() else {
            push_type(issues, path, "object", input);
            return accepted;
        };
        for field in &self.fields {
            let field_path = join_path(path, field.name);
            match (object.get(field.name), &field.presence) {
                (None, Presence::Required) => push(issues, &field_path, "Required"),
                (None, Presence::Optional) => {}
                (None, Presence::Default(default)) => {
                    accepted.insert(field.name.to_string(), default.clone());
                }
                (Some(value), _) => {
                    if let Some(checked) = field.rule.check(value, &field_path, issues) {
                        accepted.insert(field.name.to_string(), checked);
                    }
                }
            }
        }
        if self.strict {
            for key in object.keys() {
                if !self.fields.iter().any(|field| field.name == key) {
                    push(issues, path, &format!("Unrecognized key: \"{key}\""));
                }
            }
        }
        if let Some(rule) = &self.at_least_one
            && !rule.fields.iter().any(|name| object.contains_key(*name))
        {
            push(issues, path, rule.message);
        }
        accepted
    }

    /// Renders the JSON Schema for this object.
    #[must_use]
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in &self.fields {
            let mut schema = field.rule.json_schema();
            if !field.description.is_empty() {
                schema["description"] = json!(field.description);
            }
            match &field.presence {
                Presence::Required => required.push(json!(field.name)),
                Presence::Default(default) => schema["default"] = default.clone(),
                Presence::Optional => {}
            }
            properties.insert(field.name.to_string(), schema);
        }
        let mut schema = json!({ "type": "object", "properties": properties });
        if !required.is_empty() {
            schema["required"] = Value::Array(required);
        }
        if self.strict {
            schema["additionalProperties"] = json!(false);
        }
        if let Some(rule) = &self.at_least_one {
            schema["anyOf"] = Value::Array(
                rule.fields.iter().map(|name| json!({ "required": [name] })).collect(),
            );
        }
        schema
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Records an issue.
fn push(issues: &mut Vec<ValidationIssue>, path: &str, message: &str) {
    issues.push(ValidationIssue { path: path.to_string(), message: message.to_string() });
}

/// Records a type mismatch.
fn push_type(issues: &mut Vec<ValidationIssue>, path: &str, expected: &str, value: &Value) {
    push(issues, path, &format!("Expected {expected}, received {}", type_name(value)));
}

/// Returns the string content or records a type mismatch.
fn expect_str<'a>(
    value: &'a Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a str> {
    let text = value.as_str();
    if text.is_none() {
        push_type(issues, path, "string", value);
    }
    text
}

/// Checks an integer with inclusive bounds.
fn check_integer(
    value: &Value,
    min: Option<IntBound>,
    max: Option<IntBound>,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let Value::Number(number) = value else {
        push_type(issues, path, "number", value);
        return None;
    };
    let Some(integer) = integral(number) else {
        push(issues, path, "Expected integer, received float");
        return None;
    };
    if let Some(bound) = min
        && integer < bound.limit
    {
        push(issues, path, bound.message);
        return None;
    }
    if let Some(bound) = max
        && integer > bound.limit
    {
        push(issues, path, bound.message);
        return None;
    }
    Some(Value::from(integer))
}

/// Returns the number as `i64` when it has no fractional part.
///
/// Unsigned values beyond `i64::MAX` saturate.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp,
    reason = "The float is range-checked and integral before conversion."
)]
fn integral(number: &Number) -> Option<i64> {
    if let Some(integer) = number.as_i64() {
        return Some(integer);
    }
    if number.is_u64() {
        return Some(i64::MAX);
    }
    let float = number.as_f64()?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.fract() == 0.0 && in_range).then(|| float as i64)
}

/// Names the JSON type of `value`.
const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Joins a parent path and a child segment.
fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() { child.to_string() } else { format!("{parent}.{child}") }
}

/// Accepts only the 8-4-4-4-12 hyphenated form.
fn is_hyphenated_uuid(text: &str) -> bool {
    text.len() == 36 && Uuid::try_parse(text).is_ok()
}

/// Rejects separators, traversal, control and reserved characters, and
/// Windows device names.
fn is_safe_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) || name.contains("..") {
        return false;
    }
    let forbidden =
        |ch: char| ch.is_ascii_control() || matches!(ch, '<' | '>' | ':' | '"' | '|' | '?' | '*');
    if name.chars().any(forbidden) {
        return false;
    }
    let stem = name.split('.').next().unwrap_or_default().to_ascii_uppercase();
    !RESERVED_FILE_STEMS.contains(&stem.as_str())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
