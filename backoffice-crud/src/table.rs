//! Table renderer: columns, local search, pagination and the row action menu.
//!
//! The table owns its search and pagination sub-state. Structured filtering
//! happens upstream in the orchestrator; the table receives the filtered
//! records and applies the search term on top.

use backoffice_model::{
    ActionKind, ActionVariant, Record, RecordId, SearchMode, TableConfig,
};
use tokio::time::Instant;
use tracing::debug;

use crate::config::CrudConfig;
use crate::debounce::Debouncer;
use crate::menu::{ActionMenu, MenuState, Rect, Size};
use crate::paginate::{clamp_page, paginate, total_pages};
use crate::search::search;

/// Search box as shown above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBoxView {
    pub placeholder: String,
    pub term: String,
    pub is_searching: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RecordId,
    pub cells: Vec<String>,
    pub has_actions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Loading,
    /// No rows to show; carries the configured empty message.
    Empty(String),
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub page: usize,
    pub total_pages: usize,
    pub first_item: usize,
    pub last_item: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationView {
    /// "Showing 1 to 10 of 25 results"
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.first_item, self.last_item, self.total_items
        )
    }

    /// "Page 1 of 3"
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemView {
    pub title: String,
    pub icon: Option<String>,
    pub danger: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub row: RecordId,
    pub left: f64,
    pub top: f64,
    pub items: Vec<MenuItemView>,
}

/// Everything a front end needs to draw the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub search: Option<SearchBoxView>,
    pub headers: Vec<String>,
    pub body: TableBody,
    /// Hidden when there is nothing to page through.
    pub pagination: Option<PaginationView>,
    pub menu: Option<MenuView>,
}

/// Table state driven by a [`TableConfig`].
#[derive(Debug, Clone)]
pub struct Table {
    config: TableConfig,
    search_keys: Vec<String>,
    term: String,
    page: usize,
    menu: ActionMenu,
    debouncer: Debouncer,
    is_searching: bool,
    loading: bool,
}

impl Table {
    pub fn new(config: TableConfig, crud: &CrudConfig) -> Self {
        let search_keys = config.search_keys();
        let menu = ActionMenu::new(crud.menu, config.actions.len());
        Self {
            config,
            search_keys,
            term: String::new(),
            page: 1,
            menu,
            debouncer: Debouncer::new(crud.search_debounce),
            is_searching: false,
            loading: false,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn search_term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn menu(&self) -> &ActionMenu {
        &self.menu
    }

    fn page_size(&self) -> usize {
        self.config.pagination.page_size.max(1)
    }

    fn searches_locally(&self) -> bool {
        self.config.search.enabled && self.config.search.mode == SearchMode::Local
    }

    // ── Search ───────────────────────────────────────────────────

    /// Applies the local search term. Remote mode leaves records untouched;
    /// the external search is responsible for narrowing them.
    pub fn matching<'a>(&self, records: Vec<&'a Record>) -> Vec<&'a Record> {
        if self.searches_locally() {
            search(records, &self.term, &self.search_keys)
        } else {
            records
        }
    }

    /// Search box input. Always jumps back to page 1; in remote mode the
    /// term is also queued for the debounced external search.
    pub fn set_search(&mut self, term: &str, now: Instant) {
        self.term = term.to_string();
        self.page = 1;
        if self.config.search.enabled && self.config.search.mode == SearchMode::Remote {
            self.debouncer.push(term, now);
        }
    }

    /// Releases a debounced remote search term once it is due and marks the
    /// table as searching.
    pub fn poll_search(&mut self, now: Instant) -> Option<String> {
        let term = self.debouncer.poll(now)?;
        debug!(term = %term, "remote search due");
        self.is_searching = true;
        Some(term)
    }

    /// Waits for the pending remote search term, if any.
    pub async fn next_search(&mut self) -> Option<String> {
        let term = self.debouncer.settle().await?;
        self.is_searching = true;
        Some(term)
    }

    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn finish_search(&mut self) {
        self.is_searching = false;
    }

    // ── Pagination ───────────────────────────────────────────────

    pub fn go_to_page(&mut self, page: usize, total_items: usize) {
        self.page = clamp_page(page, total_pages(total_items, self.page_size()));
    }

    pub fn next_page(&mut self, total_items: usize) {
        self.go_to_page(self.page + 1, total_items);
    }

    pub fn previous_page(&mut self, total_items: usize) {
        self.go_to_page(self.page.saturating_sub(1), total_items);
    }

    /// Keeps the current page valid after the row count changed.
    pub fn clamp_page(&mut self, total_items: usize) {
        self.go_to_page(self.page, total_items);
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    // ── Action menu ──────────────────────────────────────────────

    pub fn toggle_menu(&mut self, row: RecordId, anchor: Rect, viewport: Size) {
        if self.config.actions.is_empty() {
            return;
        }
        self.menu.toggle(row, anchor, viewport);
    }

    pub fn outside_click(&mut self) {
        self.menu.close();
    }

    /// Scroll/resize: follow the trigger if its box is known, else close.
    pub fn reposition_menu(&mut self, anchor: Option<Rect>, viewport: Size) {
        self.menu.reposition(anchor, viewport);
    }

    /// Picks entry `index` of the open menu. The menu is closed before the
    /// selection is handed back, whether or not the index was valid.
    pub fn select_action(&mut self, index: usize) -> Option<(ActionKind, RecordId)> {
        let row = self.menu.take()?;
        let action = self.config.actions.get(index)?;
        Some((action.kind.clone(), row))
    }

    // ── Rendering ────────────────────────────────────────────────

    /// Builds the view for `filtered` records (structured filters already applied).
    pub fn view(&self, filtered: Vec<&Record>) -> TableView {
        let search = self.config.search.enabled.then(|| SearchBoxView {
            placeholder: self.config.search.placeholder.clone(),
            term: self.term.clone(),
            is_searching: self.is_searching,
        });

        let mut headers: Vec<String> =
            self.config.columns.iter().map(|c| c.title.clone()).collect();
        let has_actions = !self.config.actions.is_empty();
        if has_actions {
            headers.push("Actions".into());
        }

        if self.loading {
            return TableView {
                search,
                headers,
                body: TableBody::Loading,
                pagination: None,
                menu: None,
            };
        }

        let matching = self.matching(filtered);
        let (items, pagination): (&[&Record], _) = if self.config.pagination.enabled {
            let page = paginate(&matching, self.page, self.page_size());
            let view = (page.total_items > 0).then(|| PaginationView {
                page: page.page,
                total_pages: page.total_pages,
                first_item: page.first_item(),
                last_item: page.last_item(),
                total_items: page.total_items,
                has_previous: page.has_previous(),
                has_next: page.has_next(),
            });
            (page.items, view)
        } else {
            (matching.as_slice(), None)
        };

        let rows: Vec<RowView> = items
            .iter()
            .map(|record| RowView {
                id: record.id.clone(),
                cells: self.config.columns.iter().map(|c| c.cell(record)).collect(),
                has_actions,
            })
            .collect();

        let menu = match self.menu.state() {
            MenuState::Open { row, placement, .. } if rows.iter().any(|r| &r.id == row) => {
                Some(MenuView {
                    row: row.clone(),
                    left: placement.left,
                    top: placement.top,
                    items: self
                        .config
                        .actions
                        .iter()
                        .map(|a| MenuItemView {
                            title: a.title.clone(),
                            icon: a.icon.clone(),
                            danger: a.variant == ActionVariant::Danger,
                        })
                        .collect(),
                })
            }
            _ => None,
        };

        let body = if rows.is_empty() {
            TableBody::Empty(self.config.empty_message.clone())
        } else {
            TableBody::Rows(rows)
        };

        TableView {
            search,
            headers,
            body,
            pagination,
            menu,
        }
    }
}
