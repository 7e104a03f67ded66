//! The CRUD orchestrator: one page's collection, table, form and dialogs.
//!
//! Which dialog is open is a single [`ModalState`]; two dialogs can never be
//! open together, and the filter drawer only opens while no dialog is.
//!
//! Data source calls are split in three steps so a caller never holds the
//! orchestrator across an await: `begin_*` validates and returns a
//! [`Request`], [`Request::execute`] talks to the source, and
//! [`Orchestrator::settle`] applies the [`Outcome`]. Every request carries the
//! generation it was issued under. Closing or re-targeting the dialog bumps
//! the generation, so a result arriving late is dropped instead of being
//! applied to a selection that no longer exists. The source has still
//! changed in that case, so the page is flagged as
//! [`needing a reload`](Orchestrator::needs_reload).

use backoffice_model::{
    ActionKind, Collection, FilterState, PageConfig, Record, RecordId,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::CrudConfig;
use crate::error::CrudResult;
use crate::filter_panel::{FilterPanel, FilterPanelView};
use crate::form::{Form, FormView};
use crate::menu::{Rect, Size};
use crate::modal::{
    Button, ButtonRole, Footer, FooterConfig, Modal, ModalInput, ModalSignal, ModalSize,
    ModalView,
};
use crate::notify::{Notifier, Severity};
use crate::search::filter;
use crate::source::{DataSource, ExternalSearch};
use crate::table::{Table, TableView};

pub const ADDED: &str = "Item added successfully";
pub const UPDATED: &str = "Item updated successfully";
pub const DELETED: &str = "Item deleted successfully";
pub const OPERATION_FAILED: &str = "Operation failed";
pub const DELETE_FAILED: &str = "Delete failed";
pub const FETCH_FAILED: &str = "Failed to fetch data";

/// Which dialog is open, and on which record.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState {
    #[default]
    Closed,
    Adding,
    Editing(Record),
    Deleting(Record),
    Viewing(Record),
}

impl ModalState {
    /// Record under edit, delete or view.
    pub fn selected(&self) -> Option<&Record> {
        match self {
            Self::Editing(r) | Self::Deleting(r) | Self::Viewing(r) => Some(r),
            Self::Closed | Self::Adding => None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Row actions the orchestrator does not handle itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `view` without a configured detail dialog.
    View(Record),
    Custom { action: String, record: Record },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Create(Map<String, Value>),
    Update(RecordId, Map<String, Value>),
    Delete(RecordId),
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Update(..) => "update",
            Self::Delete(_) => "delete",
        }
    }
}

/// A data source call issued by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    ticket: u64,
    op: Operation,
}

#[derive(Debug)]
pub enum Applied {
    Created(Record),
    Updated(Record),
    Deleted(RecordId),
}

/// Result of an executed [`Request`], still to be settled.
#[derive(Debug)]
pub struct Outcome {
    ticket: u64,
    op: &'static str,
    result: CrudResult<Applied>,
}

impl Outcome {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl Request {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn operation(&self) -> &Operation {
        &self.op
    }

    pub async fn execute<S: DataSource + ?Sized>(self, source: &S) -> Outcome {
        let op = self.op.name();
        let result = match self.op {
            Operation::Create(fields) => source.create(fields).await.map(Applied::Created),
            Operation::Update(id, fields) => {
                source.update(&id, fields).await.map(Applied::Updated)
            }
            Operation::Delete(id) => source.delete(&id).await.map(|()| Applied::Deleted(id)),
        };
        Outcome {
            ticket: self.ticket,
            op,
            result,
        }
    }
}

/// Body of the open dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalBody {
    Form(FormView),
    ConfirmDelete {
        question: String,
        warning: String,
    },
    /// `(label, value)` pairs of the detail dialog.
    Detail(Vec<(String, String)>),
    Filters(FilterPanelView),
}

/// Everything a front end needs to draw the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub title: String,
    pub description: String,
    pub table: TableView,
    /// The open dialog or drawer, if any.
    pub modal: Option<ModalView<ModalBody>>,
    /// Number of filters currently applied.
    pub active_filters: usize,
    pub can_filter: bool,
}

pub struct Orchestrator {
    config: PageConfig,
    collection: Collection,
    table: Table,
    form: Form,
    modal: ModalState,
    form_loading: bool,
    generation: u64,
    stale: bool,
    filters: FilterState,
    filter_panel: Option<FilterPanel>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("title", &self.config.title)
            .field("records", &self.collection.len())
            .field("modal", &self.modal)
            .field("form_loading", &self.form_loading)
            .field("generation", &self.generation)
            .field("stale", &self.stale)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Builds a page seeded with the config's mock records.
    pub fn new(config: PageConfig, crud: &CrudConfig, notifier: Arc<dyn Notifier>) -> Self {
        let collection = Collection::from_records(config.mock_data.clone());
        let table = Table::new(config.table.clone(), crud);
        let form = Form::new(config.form.add.clone(), config.form.add_submit_text.clone());
        Self {
            config,
            collection,
            table,
            form,
            modal: ModalState::Closed,
            form_loading: false,
            generation: 0,
            stale: false,
            filters: FilterState::new(),
            filter_panel: None,
            notifier,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn selected(&self) -> Option<&Record> {
        self.modal.selected()
    }

    pub fn form_loading(&self) -> bool {
        self.form_loading
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_open(&self) -> bool {
        self.filter_panel.is_some()
    }

    /// Whether a discarded result changed the source after the collection
    /// was read. Cleared by the next successful [`load`](Self::load).
    pub fn needs_reload(&self) -> bool {
        self.stale
    }

    /// Current generation; bumped whenever the dialog target changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }

    /// Records passing the applied filters.
    pub fn filtered(&self) -> Vec<&Record> {
        filter(&self.collection, &self.filters)
    }

    /// Records passing the filters and the search term, across all pages.
    pub fn visible(&self) -> Vec<&Record> {
        self.table.matching(self.filtered())
    }

    fn clamp_page(&mut self) {
        let total = self.visible().len();
        self.table.clamp_page(total);
    }

    fn retarget(&mut self, modal: ModalState) {
        self.generation += 1;
        self.form_loading = false;
        self.modal = modal;
    }

    // ── Dialog transitions ───────────────────────────────────────

    /// `Add New`. Ignored while another dialog or the drawer is open.
    pub fn open_add(&mut self) -> bool {
        if self.modal.is_open() || self.filters_open() {
            return false;
        }
        self.form.set_fields(
            self.config.form.add.clone(),
            self.config.form.add_submit_text.clone(),
        );
        self.form.reset(None);
        self.retarget(ModalState::Adding);
        info!(page = %self.config.title, "adding");
        true
    }

    /// Dispatches a row action on the record with `id`. Returns an effect for
    /// actions the page has to handle itself.
    pub fn handle_action(&mut self, kind: &ActionKind, id: &RecordId) -> Option<Effect> {
        if self.modal.is_open() || self.filters_open() {
            return None;
        }
        let Some(record) = self.collection.get(id).cloned() else {
            warn!(%id, "action on unknown record");
            return None;
        };
        match kind {
            ActionKind::Edit => {
                let fields = if self.config.form.edit.is_empty() {
                    self.config.form.add.clone()
                } else {
                    self.config.form.edit.clone()
                };
                self.form
                    .set_fields(fields, self.config.form.edit_submit_text.clone());
                self.form.reset(Some(&record));
                info!(%id, "editing");
                self.retarget(ModalState::Editing(record));
                None
            }
            ActionKind::Delete => {
                info!(%id, "confirming delete");
                self.retarget(ModalState::Deleting(record));
                None
            }
            ActionKind::View if self.config.detail.is_some() => {
                self.retarget(ModalState::Viewing(record));
                None
            }
            ActionKind::View => Some(Effect::View(record)),
            ActionKind::Custom(action) => Some(Effect::Custom {
                action: action.clone(),
                record,
            }),
        }
    }

    /// Any cancel or close. Drops an in-flight result, if there is one.
    pub fn close(&mut self) {
        if self.modal.is_open() {
            debug!("dialog closed");
        }
        self.retarget(ModalState::Closed);
        self.form.reset(None);
    }

    /// Form input. Ignored while no form is open or a save is in flight.
    pub fn set_field(&mut self, key: &str, value: impl Into<Value>) {
        if matches!(self.modal, ModalState::Adding | ModalState::Editing(_)) && !self.form_loading
        {
            self.form.set_value(key, value);
        }
    }

    /// Validates the open form and issues its save. `None` when there is no
    /// form, a save is already in flight, or validation failed.
    pub fn begin_submit(&mut self) -> Option<Request> {
        if self.form_loading {
            return None;
        }
        let op = match &self.modal {
            ModalState::Adding => Operation::Create(self.form.submit().ok()?),
            ModalState::Editing(record) => {
                let id = record.id.clone();
                Operation::Update(id, self.form.submit().ok()?)
            }
            _ => return None,
        };
        self.form_loading = true;
        Some(Request {
            ticket: self.generation,
            op,
        })
    }

    /// Issues the delete of the record under confirmation.
    pub fn begin_delete(&mut self) -> Option<Request> {
        if self.form_loading {
            return None;
        }
        let ModalState::Deleting(record) = &self.modal else {
            return None;
        };
        let op = Operation::Delete(record.id.clone());
        self.form_loading = true;
        Some(Request {
            ticket: self.generation,
            op,
        })
    }

    /// Applies a finished request. Returns whether it was applied; stale
    /// results and failures are not. A stale result that succeeded leaves
    /// the collection behind the source and sets [`needs_reload`](Self::needs_reload).
    pub fn settle(&mut self, outcome: Outcome) -> bool {
        if outcome.ticket != self.generation || !self.form_loading {
            debug!(
                ticket = outcome.ticket,
                generation = self.generation,
                "discarding stale result"
            );
            if outcome.is_ok() {
                self.stale = true;
            }
            return false;
        }
        self.form_loading = false;

        let applied = match outcome.result {
            Ok(applied) => applied,
            Err(err) => {
                warn!(op = outcome.op, error = %err, "operation failed");
                let message = if outcome.op == "delete" {
                    DELETE_FAILED
                } else {
                    OPERATION_FAILED
                };
                self.notify(message, Severity::Error);
                return false;
            }
        };

        let message = match applied {
            Applied::Created(record) => {
                let id = record.id.clone();
                if !self.collection.prepend(record.clone()) {
                    warn!(%id, "created id already present, replacing");
                    self.collection.put(record);
                }
                info!(%id, "record added");
                ADDED
            }
            Applied::Updated(record) => {
                if self.collection.replace(&record.id, &record.fields).is_none() {
                    warn!(id = %record.id, "updated record no longer listed");
                }
                info!(id = %record.id, "record updated");
                UPDATED
            }
            Applied::Deleted(id) => {
                self.collection.remove(&id);
                info!(%id, "record deleted");
                DELETED
            }
        };
        self.close();
        self.clamp_page();
        self.notify(message, Severity::Success);
        true
    }

    pub async fn submit<S: DataSource + ?Sized>(&mut self, source: &S) -> bool {
        match self.begin_submit() {
            Some(request) => {
                let outcome = request.execute(source).await;
                self.settle(outcome)
            }
            None => false,
        }
    }

    pub async fn confirm_delete<S: DataSource + ?Sized>(&mut self, source: &S) -> bool {
        match self.begin_delete() {
            Some(request) => {
                let outcome = request.execute(source).await;
                self.settle(outcome)
            }
            None => false,
        }
    }

    /// Routes a click on the open dialog or drawer chrome.
    pub async fn modal_input<S: DataSource + ?Sized>(
        &mut self,
        input: ModalInput,
        source: &S,
    ) -> bool {
        let Some(shell) = self.shell() else {
            return false;
        };
        match shell.handle(input) {
            Some(ModalSignal::Cancel) if self.filters_open() => {
                self.close_filters();
                true
            }
            Some(ModalSignal::Cancel) => {
                self.close();
                true
            }
            Some(ModalSignal::Submit) if self.filters_open() => {
                self.apply_filters();
                true
            }
            Some(ModalSignal::Reset) if self.filters_open() => {
                self.reset_filters();
                true
            }
            Some(ModalSignal::Reset) => false,
            Some(ModalSignal::Submit) => match self.modal {
                ModalState::Deleting(_) => self.confirm_delete(source).await,
                _ => self.submit(source).await,
            },
            None => false,
        }
    }

    // ── Loading and search ───────────────────────────────────────

    /// Replaces the collection with the source's records.
    pub async fn load<S: DataSource + ?Sized>(&mut self, source: &S) -> bool {
        self.table.set_loading(true);
        let result = source.list().await;
        self.table.set_loading(false);
        match result {
            Ok(records) => {
                info!(page = %self.config.title, count = records.len(), "records loaded");
                self.collection = Collection::from_records(records);
                self.stale = false;
                self.clamp_page();
                true
            }
            Err(err) => {
                warn!(error = %err, "load failed");
                self.notify(FETCH_FAILED, Severity::Error);
                false
            }
        }
    }

    /// Search box input.
    pub fn set_search(&mut self, term: &str, now: Instant) {
        self.table.set_search(term, now);
    }

    /// Waits out the search debounce and runs the pending remote search,
    /// replacing the collection with its results.
    pub async fn run_search<S: ExternalSearch + ?Sized>(&mut self, source: &S) -> bool {
        let Some(term) = self.table.next_search().await else {
            return false;
        };
        let result = source.search(&term).await;
        self.table.finish_search();
        match result {
            Ok(records) => {
                debug!(term = %term, count = records.len(), "remote search finished");
                self.collection = Collection::from_records(records);
                self.clamp_page();
                true
            }
            Err(err) => {
                warn!(error = %err, "remote search failed");
                self.notify(FETCH_FAILED, Severity::Error);
                false
            }
        }
    }

    // ── Table passthrough ────────────────────────────────────────

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.visible().len();
        self.table.go_to_page(page, total);
    }

    pub fn next_page(&mut self) {
        let total = self.visible().len();
        self.table.next_page(total);
    }

    pub fn previous_page(&mut self) {
        let total = self.visible().len();
        self.table.previous_page(total);
    }

    pub fn toggle_menu(&mut self, row: RecordId, anchor: Rect, viewport: Size) {
        self.table.toggle_menu(row, anchor, viewport);
    }

    pub fn outside_click(&mut self) {
        self.table.outside_click();
    }

    pub fn reposition_menu(&mut self, anchor: Option<Rect>, viewport: Size) {
        self.table.reposition_menu(anchor, viewport);
    }

    /// Picks entry `index` of the open row menu. The menu is closed before
    /// the action runs.
    pub fn select_action(&mut self, index: usize) -> Option<Effect> {
        let (kind, id) = self.table.select_action(index)?;
        self.handle_action(&kind, &id)
    }

    // ── Filters ──────────────────────────────────────────────────

    /// Opens the filter drawer. Only possible with no dialog open and at
    /// least one filter field configured.
    pub fn open_filters(&mut self) -> bool {
        if self.modal.is_open() || self.config.filters.is_empty() {
            return false;
        }
        self.filter_panel = Some(FilterPanel::new(self.config.filters.clone(), &self.filters));
        true
    }

    /// Drawer input. Nothing is filtered until [`Self::apply_filters`].
    pub fn set_filter(&mut self, key: &str, input: &str) {
        if let Some(panel) = self.filter_panel.as_mut() {
            panel.set(key, input);
        }
    }

    pub fn apply_filters(&mut self) {
        if let Some(panel) = self.filter_panel.take() {
            self.set_filters(panel.apply());
        }
    }

    /// Clears every filter and closes the drawer.
    pub fn reset_filters(&mut self) {
        self.filter_panel = None;
        self.set_filters(FilterState::new());
    }

    pub fn close_filters(&mut self) {
        self.filter_panel = None;
    }

    /// Replaces the applied filters and goes back to page 1.
    pub fn set_filters(&mut self, filters: FilterState) {
        debug!(active = filters.len(), "filters applied");
        self.filters = filters;
        self.table.reset_page();
    }

    // ── Rendering ────────────────────────────────────────────────

    fn shell(&self) -> Option<Modal<ModalBody>> {
        if let Some(panel) = &self.filter_panel {
            let footer = Footer::Actions(vec![
                Button::new("Reset", ButtonRole::Secondary, ModalSignal::Reset),
                Button::new("Apply Filters", ButtonRole::Primary, ModalSignal::Submit),
            ]);
            return Some(
                Modal::new("Filters", ModalBody::Filters(panel.view()))
                    .drawer()
                    .footer(footer),
            );
        }

        let entity = self.config.entity_name();
        let loading = self.form_loading;
        let shell = match &self.modal {
            ModalState::Closed => return None,
            ModalState::Adding | ModalState::Editing(_) => {
                let title = if matches!(self.modal, ModalState::Adding) {
                    format!("Add New {entity}")
                } else {
                    format!("Edit {entity}")
                };
                let view = self.form.view(loading);
                let footer = Footer::Config(FooterConfig {
                    submit_text: view.submit_text.clone(),
                    loading,
                    ..FooterConfig::default()
                });
                Modal::new(title, ModalBody::Form(view))
                    .size(ModalSize::Lg)
                    .footer(footer)
            }
            ModalState::Deleting(record) => {
                let body = ModalBody::ConfirmDelete {
                    question: "Are you sure you want to delete this item?".into(),
                    warning: format!(
                        "This action cannot be undone. The item \"{}\" will be permanently removed.",
                        record.label()
                    ),
                };
                let delete_label = if loading { "Deleting..." } else { "Delete" };
                let footer = Footer::Actions(vec![
                    Button::new("Cancel", ButtonRole::Secondary, ModalSignal::Cancel)
                        .disabled(loading),
                    Button::new(delete_label, ButtonRole::Danger, ModalSignal::Submit)
                        .disabled(loading)
                        .busy(loading),
                ]);
                Modal::new("Confirm Delete", body)
                    .size(ModalSize::Sm)
                    .footer(footer)
            }
            ModalState::Viewing(record) => {
                let detail = self.config.detail.as_ref();
                let title = detail
                    .and_then(|d| d.title.clone())
                    .unwrap_or_else(|| format!("{entity} Details"));
                let rows = detail
                    .map(|d| {
                        d.fields
                            .iter()
                            .map(|c| (c.title.clone(), c.cell(record)))
                            .collect()
                    })
                    .unwrap_or_default();
                let footer = Footer::Actions(vec![Button::new(
                    "Close",
                    ButtonRole::Secondary,
                    ModalSignal::Cancel,
                )]);
                Modal::new(title, ModalBody::Detail(rows))
                    .size(ModalSize::Lg)
                    .footer(footer)
            }
        };
        Some(shell)
    }

    pub fn view(&self) -> PageView {
        PageView {
            title: self.config.title.clone(),
            description: self.config.description.clone(),
            table: self.table.view(self.filtered()),
            modal: self.shell().map(Modal::into_view),
            active_filters: self.filters.len(),
            can_filter: !self.config.filters.is_empty(),
        }
    }
}
