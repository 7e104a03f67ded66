//! Config-driven CRUD engine.
//!
//! Turns a [`PageConfig`](backoffice_model::PageConfig) into a working
//! listing page: local search and structured filters, pagination, a row
//! action menu, add/edit forms with validation, a delete confirmation, and
//! the [`Orchestrator`] state machine that ties them to a [`DataSource`].
//!
//! Nothing here draws anything. Every component produces a plain view-model
//! (`*View` structs) for a front end to render.

pub mod config;
pub mod debounce;
pub mod error;
pub mod filter_panel;
pub mod form;
pub mod menu;
pub mod modal;
pub mod notify;
pub mod orchestrator;
pub mod paginate;
pub mod search;
pub mod source;
pub mod table;

pub use config::{CrudConfig, Latency, MenuGeometry, SEARCH_DEBOUNCE_MS};
pub use debounce::Debouncer;
pub use error::{CrudError, CrudResult};
pub use filter_panel::{FilterFieldView, FilterPanel, FilterPanelView, ALL_OPTION};
pub use form::{is_valid_email, validate, FieldView, Form, FormErrors, FormView, INVALID_EMAIL};
pub use menu::{menu_size, place_menu, ActionMenu, MenuPlacement, MenuState, Rect, Size};
pub use modal::{
    Button, ButtonRole, Footer, FooterConfig, Modal, ModalInput, ModalSignal, ModalSize,
    ModalView, Placement,
};
pub use notify::{MemoryNotifier, Notifier, Severity, TracingNotifier};
pub use orchestrator::{
    Applied, Effect, ModalBody, ModalState, Operation, Orchestrator, Outcome, PageView, Request,
};
pub use paginate::{clamp_page, paginate, total_pages, Page};
pub use search::{filter, search};
pub use source::{today, DataSource, ExternalSearch, MemorySource, CREATED_AT};
pub use table::{
    MenuItemView, MenuView, PaginationView, RowView, SearchBoxView, Table, TableBody, TableView,
};
