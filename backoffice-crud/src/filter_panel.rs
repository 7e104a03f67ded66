//! Filter drawer content: a draft of filter values applied on demand.

use backoffice_model::{FieldKind, FieldSchema, FilterState, FilterValue};

/// Label of the "no filter" choice of select inputs.
pub const ALL_OPTION: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFieldView {
    pub key: String,
    pub label: String,
    pub kind: &'static str,
    pub placeholder: Option<String>,
    pub value: String,
    /// Select choices, led by the `All` entry (empty value).
    pub options: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanelView {
    pub fields: Vec<FilterFieldView>,
    pub active: usize,
}

/// Draft filter values edited in the drawer.
#[derive(Debug, Clone)]
pub struct FilterPanel {
    fields: Vec<FieldSchema>,
    draft: FilterState,
}

impl FilterPanel {
    /// Opens with the currently applied values as the starting draft.
    pub fn new(fields: Vec<FieldSchema>, current: &FilterState) -> Self {
        Self {
            fields,
            draft: current.clone(),
        }
    }

    pub fn draft(&self) -> &FilterState {
        &self.draft
    }

    /// Sets a draft value from raw input. An empty input (the `All` choice
    /// of a select) clears the key.
    pub fn set(&mut self, key: &str, input: &str) {
        self.draft.set(key, FilterValue::Text(input.to_string()));
    }

    /// The draft to commit.
    pub fn apply(&self) -> FilterState {
        self.draft.clone()
    }

    pub fn reset(&mut self) {
        self.draft.clear();
    }

    pub fn view(&self) -> FilterPanelView {
        let fields = self
            .fields
            .iter()
            .map(|field| {
                let value = match self.draft.get(&field.key) {
                    Some(FilterValue::Text(s)) => s.clone(),
                    Some(FilterValue::Number(n)) => n.to_string(),
                    Some(FilterValue::Bool(b)) => b.to_string(),
                    None => String::new(),
                };
                let options = match &field.kind {
                    FieldKind::Select { options } => std::iter::once((
                        String::new(),
                        ALL_OPTION.to_string(),
                    ))
                    .chain(options.iter().map(|o| (o.value.clone(), o.label.clone())))
                    .collect(),
                    _ => Vec::new(),
                };
                FilterFieldView {
                    key: field.key.clone(),
                    label: field.label.clone(),
                    kind: field.kind.tag(),
                    placeholder: field.placeholder.clone(),
                    value,
                    options,
                }
            })
            .collect();
        FilterPanelView {
            fields,
            active: self.draft.len(),
        }
    }
}
