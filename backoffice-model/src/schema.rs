use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{value_text, Record};

/// One choice of a select input (also used for badge labels).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The input kind of a field. Serialized under the `type` key to match the
/// page-config JSON format: `{"key": "bio", "type": "textarea", "rows": 3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Tel,
    Textarea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<u8>,
    },
    Select {
        #[serde(default)]
        options: Vec<SelectOption>,
    },
    #[serde(alias = "image")]
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accept: Option<String>,
    },
}

impl FieldKind {
    /// The lowercase tag used in configs and by front ends to pick a widget.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Tel => "tel",
            Self::Textarea { .. } => "textarea",
            Self::Select { .. } => "select",
            Self::File { .. } => "file",
        }
    }
}

/// Extra checks run on non-empty values at submit time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    #[default]
    None,
    Email,
}

/// Declarative description of one form or filter input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub validation: Validation,
}

impl FieldSchema {
    fn simple(key: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            placeholder: None,
            validation: Validation::None,
        }
    }

    /// Single-line text input.
    pub fn text(key: &str, label: &str) -> Self {
        Self::simple(key, label, FieldKind::Text)
    }

    /// Email input; always validated for email shape.
    pub fn email(key: &str, label: &str) -> Self {
        let mut field = Self::simple(key, label, FieldKind::Email);
        field.validation = Validation::Email;
        field
    }

    pub fn password(key: &str, label: &str) -> Self {
        Self::simple(key, label, FieldKind::Password)
    }

    pub fn tel(key: &str, label: &str) -> Self {
        Self::simple(key, label, FieldKind::Tel)
    }

    pub fn textarea(key: &str, label: &str, rows: u8) -> Self {
        Self::simple(key, label, FieldKind::Textarea { rows: Some(rows) })
    }

    pub fn select(key: &str, label: &str, options: Vec<SelectOption>) -> Self {
        Self::simple(key, label, FieldKind::Select { options })
    }

    /// File or image upload. The value is a file reference.
    pub fn file(key: &str, label: &str, accept: Option<&str>) -> Self {
        Self::simple(
            key,
            label,
            FieldKind::File {
                accept: accept.map(str::to_string),
            },
        )
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Validation actually applied: email inputs always get email checks.
    #[must_use]
    pub fn effective_validation(&self) -> Validation {
        match self.kind {
            FieldKind::Email => Validation::Email,
            _ => self.validation,
        }
    }

    /// Placeholder shown when the config gives none.
    pub fn placeholder_text(&self) -> String {
        match (&self.placeholder, &self.kind) {
            (Some(p), _) => p.clone(),
            (None, FieldKind::Select { .. }) => format!("Select {}", self.label),
            (None, _) => format!("Enter {}", self.label),
        }
    }

    /// Options of a select field, empty for every other kind.
    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::Select { options } => options,
            _ => &[],
        }
    }
}

/// How a column turns a record value into cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellRender {
    /// The value's own text.
    #[default]
    Raw,
    /// Maps known values to labels (status pills, role names).
    Badge { labels: Vec<SelectOption> },
    /// Truthy values show `yes`, everything else `no`.
    Boolean { yes: String, no: String },
    /// Date part of an ISO-8601 timestamp.
    Date,
    /// Placeholder text such as `"{first_name} {last_name}"`, resolved against the record.
    Template { template: String },
    /// Hides the value.
    Masked,
}

impl CellRender {
    pub fn render(&self, value: Option<&Value>, record: &Record) -> String {
        let raw = || value.and_then(value_text).unwrap_or_default();
        match self {
            Self::Raw => raw(),
            Self::Badge { labels } => {
                let text = raw();
                labels
                    .iter()
                    .find(|o| o.value == text)
                    .map_or(text, |o| o.label.clone())
            }
            Self::Boolean { yes, no } => {
                let truthy = match value {
                    Some(Value::Bool(b)) => *b,
                    Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
                    Some(Value::String(s)) => !s.is_empty() && s != "false",
                    _ => false,
                };
                if truthy { yes.clone() } else { no.clone() }
            }
            Self::Date => raw().chars().take(10).collect(),
            Self::Template { template } => fill_template(template, record),
            Self::Masked => {
                if raw().is_empty() {
                    String::new()
                } else {
                    "••••••".to_string()
                }
            }
        }
    }
}

fn fill_template(template: &str, record: &Record) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                out.push_str(&record.text(key).unwrap_or_default());
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Declarative description of one table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub render: CellRender,
}

impl ColumnSchema {
    pub fn new(key: &str, title: &str) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            render: CellRender::Raw,
        }
    }

    #[must_use]
    pub fn with_render(mut self, render: CellRender) -> Self {
        self.render = render;
        self
    }

    /// Cell text of this column for `record`.
    pub fn cell(&self, record: &Record) -> String {
        let value = record.value(&self.key);
        self.render.render(value.as_deref(), record)
    }
}

/// Which orchestrator handler a row action fires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    Edit,
    View,
    Delete,
    Custom(String),
}

impl From<String> for ActionKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "edit" => Self::Edit,
            "view" => Self::View,
            "delete" => Self::Delete,
            _ => Self::Custom(tag),
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Edit => "edit".into(),
            ActionKind::View => "view".into(),
            ActionKind::Delete => "delete".into(),
            ActionKind::Custom(tag) => tag,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionVariant {
    #[default]
    Default,
    Danger,
}

/// One entry of the per-row action menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub variant: ActionVariant,
}

impl ActionDescriptor {
    pub fn new(title: &str, kind: ActionKind) -> Self {
        Self {
            title: title.into(),
            kind,
            icon: None,
            variant: ActionVariant::Default,
        }
    }

    pub fn edit(title: &str) -> Self {
        Self::new(title, ActionKind::Edit).with_icon("pencil")
    }

    pub fn view(title: &str) -> Self {
        Self::new(title, ActionKind::View).with_icon("eye")
    }

    pub fn delete(title: &str) -> Self {
        let mut action = Self::new(title, ActionKind::Delete).with_icon("trash");
        action.variant = ActionVariant::Danger;
        action
    }

    #[must_use]
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.into());
        self
    }
}
