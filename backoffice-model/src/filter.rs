use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single structured filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    /// Free text and select choices alike: string fields match when they
    /// contain it (case-insensitive), other fields when their text equals it.
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FilterValue {
    /// Empty text values mean "no filter" for that key.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// Whether a record value satisfies this filter. Missing and null values
    /// never match.
    pub fn matches(&self, value: Option<&Value>) -> bool {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return false;
        };
        match (self, value) {
            (Self::Text(needle), Value::String(hay)) => {
                hay.to_lowercase().contains(&needle.trim().to_lowercase())
            }
            (Self::Text(needle), other) => {
                crate::value_text(other)
                    .is_some_and(|text| text.eq_ignore_ascii_case(needle.trim()))
            }
            (Self::Number(n), Value::Number(m)) => m.as_f64() == Some(*n),
            (Self::Bool(b), Value::Bool(c)) => b == c,
            _ => false,
        }
    }
}

/// Field key → filter value. An empty state filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    values: BTreeMap<String, FilterValue>,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or replaces a value. Empty values remove the key.
    pub fn set(&mut self, key: impl Into<String>, value: FilterValue) {
        let key = key.into();
        if value.is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: FilterValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.values.remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True when no key carries a non-empty value.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Non-empty entries only.
    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.active().count()
    }
}
