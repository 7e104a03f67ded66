use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ActionDescriptor, ColumnSchema, FieldSchema, ModelResult, Record};

/// Where search terms are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Synchronous substring filtering of the loaded collection.
    #[default]
    Local,
    /// Debounced hand-off to an external search callback.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub enabled: bool,
    pub placeholder: String,
    /// Keys searched locally. `None` means every column key.
    pub searchable_columns: Option<Vec<String>>,
    pub mode: SearchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            placeholder: "Search...".into(),
            searchable_columns: None,
            mode: SearchMode::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub enabled: bool,
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            page_size: 10,
        }
    }
}

/// Declarative description of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub columns: Vec<ColumnSchema>,
    pub actions: Vec<ActionDescriptor>,
    pub search: SearchConfig,
    pub pagination: PaginationConfig,
    pub empty_message: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            actions: Vec::new(),
            search: SearchConfig::default(),
            pagination: PaginationConfig::default(),
            empty_message: "No data available".into(),
        }
    }
}

impl TableConfig {
    /// Keys searched by the local search engine.
    pub fn search_keys(&self) -> Vec<String> {
        match &self.search.searchable_columns {
            Some(keys) => keys.clone(),
            None => self.columns.iter().map(|c| c.key.clone()).collect(),
        }
    }
}

/// Field sets for the add and edit dialogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub add: Vec<FieldSchema>,
    pub edit: Vec<FieldSchema>,
    pub add_submit_text: String,
    pub edit_submit_text: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            add: Vec::new(),
            edit: Vec::new(),
            add_submit_text: "Submit".into(),
            edit_submit_text: "Update".into(),
        }
    }
}

/// Read-only detail dialog opened by the `view` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailConfig {
    #[serde(default)]
    pub title: Option<String>,
    pub fields: Vec<ColumnSchema>,
}

/// Everything needed to drive one CRUD page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub form: FormConfig,
    /// Filter drawer inputs. Empty hides the drawer.
    #[serde(default)]
    pub filters: Vec<FieldSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailConfig>,
    /// Values stamped onto new records unless the form provides them.
    #[serde(default)]
    pub new_record_defaults: Map<String, Value>,
    #[serde(default)]
    pub mock_data: Vec<Record>,
}

impl PageConfig {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            table: TableConfig::default(),
            form: FormConfig::default(),
            filters: Vec::new(),
            detail: None,
            new_record_defaults: Map::new(),
            mock_data: Vec::new(),
        }
    }

    /// Parses a page config from its JSON form.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Entity name used in dialog titles: "Admin Management" → "Admin".
    pub fn entity_name(&self) -> &str {
        self.title
            .strip_suffix(" Management")
            .unwrap_or(&self.title)
    }
}
