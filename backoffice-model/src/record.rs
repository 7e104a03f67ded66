use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

use crate::{ModelError, ModelResult};

/// Identifier of a record inside its collection.
///
/// Mock data uses sequential numbers; a real backend may hand out strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl RecordId {
    /// Returns the id as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }

    /// Reads an id from a JSON value (non-negative integer or string).
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(Self::Number),
            Value::String(s) if !s.is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Parses user input: digits become a numeric id, anything else a text id.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        s.trim()
            .parse::<u64>()
            .map_or_else(|_| Self::Text(s.trim().to_string()), Self::Number)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One entity instance: an id plus an open mapping of field values.
///
/// Serializes as a flat JSON object whose `id` key carries the [`RecordId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Record {
    pub id: RecordId,
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, fields: Map<String, Value>) -> Self {
        let mut fields = fields;
        fields.remove("id");
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Builds a record from a JSON object that contains an `id` key.
    pub fn from_value(value: Value) -> ModelResult<Self> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(ModelError::InvalidRecord(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Looks up a value by key. `id` resolves to the record id.
    pub fn value(&self, key: &str) -> Option<Cow<'_, Value>> {
        if key == "id" {
            return Some(Cow::Owned(self.id.to_value()));
        }
        self.fields.get(key).map(Cow::Borrowed)
    }

    /// Returns a string field, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Returns the display text of a field, `None` for missing or null values.
    pub fn text(&self, key: &str) -> Option<String> {
        self.value(key).and_then(|v| value_text(&v))
    }

    /// Shallow-merges `fields` into this record. The id is never overwritten.
    pub fn merge(&mut self, fields: &Map<String, Value>) {
        for (key, value) in fields {
            if key != "id" {
                self.fields.insert(key.clone(), value.clone());
            }
        }
    }

    /// Human label used in confirmations: `name`, then `email`, then the id.
    pub fn label(&self) -> String {
        self.get_str("name")
            .filter(|s| !s.is_empty())
            .or_else(|| self.get_str("email").filter(|s| !s.is_empty()))
            .map_or_else(|| self.id.to_string(), str::to_string)
    }
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = ModelError;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = map
            .remove("id")
            .as_ref()
            .and_then(RecordId::from_value)
            .ok_or_else(|| ModelError::InvalidRecord("missing or invalid `id`".into()))?;
        Ok(Self { id, fields: map })
    }
}

impl From<Record> for Map<String, Value> {
    fn from(record: Record) -> Self {
        let mut map = Self::with_capacity(record.fields.len() + 1);
        map.insert("id".into(), record.id.to_value());
        map.extend(record.fields);
        map
    }
}

/// Display text of a JSON value as a table cell or search haystack.
///
/// Null has no text. File references (`{"name": ..}`) show their name.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(value_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(map) => match map.get("name").and_then(Value::as_str) {
            Some(name) => Some(name.to_string()),
            None => Some(value.to_string()),
        },
    }
}

/// True for values a required field rejects: missing, null or empty string.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Ordered records of one entity type. Newest records sit at the front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection, keeping the first occurrence of any duplicate id.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut collection = Self::new();
        for record in records {
            if collection.get(&record.id).is_none() {
                collection.records.push(record);
            }
        }
        collection
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Next sequential id: highest numeric id plus one, 1 for an empty collection.
    pub fn next_id(&self) -> RecordId {
        let max = self
            .records
            .iter()
            .filter_map(|r| match r.id {
                RecordId::Number(n) => Some(n),
                RecordId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        RecordId::Number(max + 1)
    }

    /// Inserts at the front. Returns `false` (and leaves the collection alone)
    /// if the id is already taken.
    pub fn prepend(&mut self, record: Record) -> bool {
        if self.get(&record.id).is_some() {
            return false;
        }
        self.records.insert(0, record);
        true
    }

    /// Merges `fields` into the record with `id`, returning the updated record.
    pub fn replace(&mut self, id: &RecordId, fields: &Map<String, Value>) -> Option<&Record> {
        let record = self.records.iter_mut().find(|r| &r.id == id)?;
        record.merge(fields);
        Some(record)
    }

    /// Swaps in a whole record with the same id.
    pub fn put(&mut self, record: Record) -> bool {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Removes the record with `id`, returning it.
    pub fn remove(&mut self, id: &RecordId) -> Option<Record> {
        let index = self.records.iter().position(|r| &r.id == id)?;
        Some(self.records.remove(index))
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for Collection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}
