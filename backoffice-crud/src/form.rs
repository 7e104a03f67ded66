//! Form engine: editable values, per-field errors, submit-time validation.
//!
//! The form never calls back into its owner. `submit` either yields the
//! validated value mapping or keeps the errors for display.

use backoffice_model::{is_empty_value, value_text, FieldKind, FieldSchema, Record, Validation};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Message recorded for an email field with a malformed value.
pub const INVALID_EMAIL: &str = "Please enter a valid email address";

/// Whether `value` has the `local@domain.tld` shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

/// Field key → error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn insert(&mut self, key: &str, message: String) {
        self.0.insert(key.to_string(), message);
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{key}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// One input as drawn by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub key: String,
    pub label: String,
    /// Widget tag: `text`, `email`, `select`, ...
    pub kind: &'static str,
    pub required: bool,
    pub placeholder: String,
    pub value: String,
    pub options: Vec<(String, String)>,
    pub rows: Option<u8>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub submit_text: String,
}

/// Runs validation rules over `values`.
pub fn validate(fields: &[FieldSchema], values: &Map<String, Value>) -> FormErrors {
    let mut errors = FormErrors::default();
    for field in fields {
        let value = values.get(&field.key);
        if field.required && is_empty_value(value) {
            errors.insert(&field.key, format!("{} is required", field.label));
        }
        if field.effective_validation() == Validation::Email && !is_empty_value(value) {
            let text = value.and_then(value_text).unwrap_or_default();
            if !is_valid_email(&text) {
                errors.insert(&field.key, INVALID_EMAIL.to_string());
            }
        }
    }
    errors
}

/// An editable record described by a list of [`FieldSchema`]s.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FieldSchema>,
    values: Map<String, Value>,
    errors: FormErrors,
    submit_text: String,
}

impl Form {
    pub fn new(fields: Vec<FieldSchema>, submit_text: impl Into<String>) -> Self {
        Self {
            fields,
            values: Map::new(),
            errors: FormErrors::default(),
            submit_text: submit_text.into(),
        }
    }

    /// Starts over from `initial` (edit target) or from nothing (add).
    /// Unsaved edits and errors are dropped.
    pub fn reset(&mut self, initial: Option<&Record>) {
        self.values = initial.map(|r| r.fields.clone()).unwrap_or_default();
        self.errors = FormErrors::default();
    }

    /// Swaps the field set, e.g. between the add and edit layouts.
    pub fn set_fields(&mut self, fields: Vec<FieldSchema>, submit_text: impl Into<String>) {
        self.fields = fields;
        self.submit_text = submit_text.into();
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key)
    }

    /// Updates a value and clears that field's error right away. The field
    /// is not re-validated until the next submit.
    pub fn set_value(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
        self.errors.remove(key);
    }

    /// Validates. On success returns the full current value mapping; on
    /// failure keeps the errors for display and returns them.
    pub fn submit(&mut self) -> Result<Map<String, Value>, FormErrors> {
        self.errors = validate(&self.fields, &self.values);
        if self.errors.is_empty() {
            Ok(self.values.clone())
        } else {
            Err(self.errors.clone())
        }
    }

    /// Builds the field list. `loading` swaps the submit text for a busy label.
    pub fn view(&self, loading: bool) -> FormView {
        let fields = self
            .fields
            .iter()
            .map(|field| FieldView {
                key: field.key.clone(),
                label: field.label.clone(),
                kind: field.kind.tag(),
                required: field.required,
                placeholder: field.placeholder_text(),
                value: self
                    .values
                    .get(&field.key)
                    .and_then(value_text)
                    .unwrap_or_default(),
                options: field
                    .options()
                    .iter()
                    .map(|o| (o.value.clone(), o.label.clone()))
                    .collect(),
                rows: match field.kind {
                    FieldKind::Textarea { rows } => Some(rows.unwrap_or(3)),
                    _ => None,
                },
                error: self.errors.get(&field.key).map(str::to_string),
            })
            .collect();
        FormView {
            fields,
            submit_text: if loading {
                "Saving...".to_string()
            } else {
                self.submit_text.clone()
            },
        }
    }
}
