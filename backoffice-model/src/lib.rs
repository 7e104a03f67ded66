//! Core data model for the backoffice CRUD engine.
//!
//! Defines the declarative types every other crate in the workspace consumes:
//! - [`Record`] / [`Collection`]: one entity instance and the ordered list it lives in
//! - [`FieldSchema`]: one form or filter input (key, label, kind, validation)
//! - [`ColumnSchema`]: one table column and how its cells are rendered
//! - [`ActionDescriptor`]: one entry of the per-row action menu
//! - [`FilterState`]: structured filter values produced by the filter drawer
//! - [`PageConfig`]: the whole declarative description of a CRUD page
//!
//! Everything here is plain data. Configurations carry tagged variants
//! (e.g. [`CellRender`]) instead of callbacks so they can be loaded from JSON.

mod error;
mod filter;
mod page;
mod record;
mod schema;

pub use error::{ModelError, ModelResult};
pub use filter::{FilterState, FilterValue};
pub use page::{
    DetailConfig, FormConfig, PageConfig, PaginationConfig, SearchConfig, SearchMode,
    TableConfig,
};
pub use record::{is_empty_value, value_text, Collection, Record, RecordId};
pub use schema::{
    ActionDescriptor, ActionKind, ActionVariant, CellRender, ColumnSchema, FieldKind,
    FieldSchema, SelectOption, Validation,
};
