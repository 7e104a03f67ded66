//! Console application state: the session, one orchestrator per page and
//! the screen being shown.

use anyhow::{bail, Context, Result};
use backoffice_crud::{
    CrudConfig, Effect, MemoryNotifier, MemorySource, ModalInput, ModalState, Notifier,
    Orchestrator, Rect, Severity, Size,
};
use backoffice_model::{value_text, ActionKind, Record, RecordId};
use backoffice_session::{KeyValueStore, Session, SessionConfig, SessionError};
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::command::{Command, FilterCommand, HELP};
use crate::dashboard::{tiles, Metrics};
use crate::pages::PageEntry;
use crate::render;

/// Terminal width and height the row menu is placed against.
const VIEWPORT: Size = Size::new(1280.0, 800.0);
const ROW_HEIGHT: f64 = 40.0;
const TABLE_TOP: f64 = 160.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Page(String),
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

struct PageSlot {
    label: String,
    orchestrator: Orchestrator,
    source: Arc<MemorySource>,
    loaded: bool,
}

pub struct App {
    session: Session,
    pages: Vec<(String, PageSlot)>,
    screen: Screen,
    metrics: Metrics,
    notes: MemoryNotifier,
    output: Vec<String>,
}

impl App {
    pub fn new(
        entries: Vec<PageEntry>,
        crud: &CrudConfig,
        session: SessionConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        let notes = MemoryNotifier::new();
        let notifier: Arc<dyn Notifier> = Arc::new(notes.clone());
        let session = Session::restore(session, store, notifier.clone())
            .context("failed to restore session")?;

        let pages = entries
            .into_iter()
            .map(|entry| {
                let source = MemorySource::new(entry.config.mock_data.clone(), crud.latency)
                    .with_defaults(entry.config.new_record_defaults.clone());
                let slot = PageSlot {
                    label: entry.label,
                    orchestrator: Orchestrator::new(entry.config, crud, notifier.clone()),
                    source: Arc::new(source),
                    loaded: false,
                };
                (entry.key, slot)
            })
            .collect();

        Ok(Self {
            session,
            pages,
            screen: Screen::Dashboard,
            metrics: Metrics::default(),
            notes,
            output: Vec::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The orchestrator behind page `key`.
    pub fn page(&self, key: &str) -> Option<&Orchestrator> {
        self.slot(key).map(|slot| &slot.orchestrator)
    }

    /// Current contents of the data source behind page `key`.
    pub async fn stored(&self, key: &str) -> Option<Vec<Record>> {
        let slot = self.slot(key)?;
        Some(slot.source.snapshot().await.iter().cloned().collect())
    }

    fn slot(&self, key: &str) -> Option<&PageSlot> {
        self.pages.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut PageSlot> {
        self.pages.iter_mut().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    fn current(&mut self) -> Result<&mut PageSlot> {
        let Screen::Page(key) = &self.screen else {
            bail!("open a page first");
        };
        let key = key.clone();
        self.slot_mut(&key)
            .with_context(|| format!("unknown page `{key}`"))
    }

    fn say(&mut self, text: impl Into<String>) {
        self.output.push(text.into());
    }

    /// Everything printed since the last call, notifications last.
    pub fn take_output(&mut self) -> Vec<String> {
        let mut out = std::mem::take(&mut self.output);
        out.extend(
            self.notes
                .drain()
                .into_iter()
                .map(|(message, severity)| render::toast(&message, severity)),
        );
        out
    }

    /// Sidebar entries: the dashboard, each page and the profile screen.
    pub fn nav(&self) -> Vec<(String, String)> {
        let mut items = vec![("dashboard".to_string(), "Dashboard".to_string())];
        items.extend(self.pages.iter().map(|(k, s)| (k.clone(), s.label.clone())));
        items.push(("profile".to_string(), "Profile Settings".to_string()));
        items
    }

    /// Draws the current screen.
    pub fn render(&self) -> String {
        let Some(user) = self.session.current_user() else {
            return "Signed out. login <email> <password>\n".to_string();
        };
        let current = match &self.screen {
            Screen::Dashboard => "dashboard",
            Screen::Page(key) => key.as_str(),
            Screen::Profile => "profile",
        };
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}    ({})\n",
            render::nav(&self.nav(), current),
            user.full_name()
        );
        match &self.screen {
            Screen::Dashboard => out.push_str(&render::dashboard(&tiles(&self.metrics))),
            Screen::Profile => out.push_str(&render::profile(user)),
            Screen::Page(key) => {
                if let Some(slot) = self.slot(key) {
                    out.push_str(&render::page(&slot.orchestrator.view()));
                }
            }
        }
        out
    }

    /// Runs one command. Errors are usage mistakes to show the user; the
    /// app state stays consistent.
    pub async fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => self.say(HELP),
            Command::Login { email, password } => self.login(&email, &password).await?,
            _ if !self.session.is_authenticated() => {
                bail!("sign in first: login <email> <password>")
            }
            Command::Logout => {
                self.session.logout()?;
                self.screen = Screen::Dashboard;
            }
            Command::WhoAmI => {
                let line = self
                    .session
                    .current_user()
                    .map(|u| format!("{} <{}> ({})", u.full_name(), u.email, u.role))
                    .unwrap_or_default();
                self.say(line);
            }
            Command::Profile {
                first_name,
                last_name,
                email,
            } => match self.session.update_profile(&first_name, &last_name, &email) {
                Ok(_) => self.screen = Screen::Profile,
                Err(SessionError::InvalidProfile(reason)) => {
                    self.notes.notify(&reason, Severity::Error);
                }
                Err(err) => return Err(err.into()),
            },
            Command::Open(route) => self.open(&route).await?,
            Command::Tile(index) => {
                let all = tiles(&self.metrics);
                let tile = all
                    .get(index)
                    .with_context(|| format!("no tile {index}"))?;
                let Some(link) = tile.link else {
                    bail!("`{}` does not open a page", tile.title);
                };
                self.open(link).await?;
            }
            Command::List => {}
            other => self.page_command(other).await?,
        }
        Ok(Flow::Continue)
    }

    async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        match self.session.login(email, password).await {
            Ok(_) => {
                self.screen = Screen::Dashboard;
                Ok(())
            }
            // Already reported through the notifier.
            Err(SessionError::InvalidCredentials) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn open(&mut self, route: &str) -> Result<()> {
        match route {
            "dashboard" | "home" => self.screen = Screen::Dashboard,
            "profile" | "settings" => self.screen = Screen::Profile,
            key => {
                let slot = self
                    .slot_mut(key)
                    .with_context(|| format!("unknown page `{key}`"))?;
                if !slot.loaded || slot.orchestrator.needs_reload() {
                    let source = slot.source.clone();
                    slot.loaded = slot.orchestrator.load(source.as_ref()).await;
                }
                info!(page = key, "page opened");
                self.screen = Screen::Page(key.to_string());
            }
        }
        Ok(())
    }

    async fn page_command(&mut self, command: Command) -> Result<()> {
        let slot = self.current()?;
        let source = slot.source.clone();
        let page = &mut slot.orchestrator;

        let effect = match command {
            Command::Search(term) => {
                page.set_search(&term, Instant::now());
                if page.table().search_pending() {
                    page.run_search(source.as_ref()).await;
                }
                None
            }
            Command::Page(n) => {
                page.go_to_page(n);
                None
            }
            Command::Next => {
                page.next_page();
                None
            }
            Command::Previous => {
                page.previous_page();
                None
            }
            Command::Add => {
                if !page.open_add() {
                    bail!("close the open dialog first");
                }
                None
            }
            Command::Edit(id) => Self::row_action(page, &ActionKind::Edit, &id)?,
            Command::Delete(id) => Self::row_action(page, &ActionKind::Delete, &id)?,
            Command::View(id) => Self::row_action(page, &ActionKind::View, &id)?,
            Command::Action { row, index } => {
                let position = page
                    .visible()
                    .iter()
                    .position(|r| r.id == row)
                    .with_context(|| format!("no row [{row}] on this page"))?;
                let anchor = Rect::new(
                    VIEWPORT.width - 48.0,
                    TABLE_TOP + position as f64 * ROW_HEIGHT,
                    32.0,
                    32.0,
                );
                page.toggle_menu(row, anchor, VIEWPORT);
                page.select_action(index)
            }
            Command::Set { key, value } => {
                if !matches!(page.modal(), ModalState::Adding | ModalState::Editing(_)) {
                    bail!("no form is open");
                }
                if !page.form().fields().iter().any(|f| f.key == key) {
                    bail!("the form has no `{key}` field");
                }
                page.set_field(&key, value);
                None
            }
            Command::Submit | Command::Confirm => {
                if page.filters_open() {
                    page.apply_filters();
                } else if matches!(page.modal(), ModalState::Deleting(_)) {
                    page.confirm_delete(source.as_ref()).await;
                } else if matches!(page.modal(), ModalState::Adding | ModalState::Editing(_)) {
                    page.submit(source.as_ref()).await;
                } else {
                    bail!("nothing to submit");
                }
                None
            }
            Command::Cancel => {
                page.outside_click();
                page.modal_input(ModalInput::CloseControl, source.as_ref())
                    .await;
                None
            }
            Command::Filter(sub) => {
                match sub {
                    FilterCommand::Open => {
                        if !page.open_filters() {
                            bail!("this page has no filters, or a dialog is open");
                        }
                    }
                    FilterCommand::Set { key, value } => {
                        if !page.filters_open() {
                            bail!("open the filters first");
                        }
                        page.set_filter(&key, &value);
                    }
                    FilterCommand::Apply => page.apply_filters(),
                    FilterCommand::Reset => page.reset_filters(),
                    FilterCommand::Close => page.close_filters(),
                }
                None
            }
            other => {
                debug!(?other, "not a page command");
                None
            }
        };

        if let Some(effect) = effect {
            self.effect(effect);
        }
        Ok(())
    }

    /// Runs a row action, provided the page's table offers it.
    fn row_action(
        page: &mut Orchestrator,
        kind: &ActionKind,
        id: &RecordId,
    ) -> Result<Option<Effect>> {
        if !page.config().table.actions.iter().any(|a| &a.kind == kind) {
            bail!("this page has no `{}` action", String::from(kind.clone()));
        }
        if page.collection().get(id).is_none() {
            bail!("no record [{id}]");
        }
        if page.modal().is_open() || page.filters_open() {
            bail!("close the open dialog first");
        }
        Ok(page.handle_action(kind, id))
    }

    fn effect(&mut self, effect: Effect) {
        match effect {
            Effect::View(record) => {
                let mut text = format!("[{}] {}\n", record.id, record.label());
                for (key, value) in &record.fields {
                    let _ = writeln!(text, "  {key}: {}", value_text(value).unwrap_or_default());
                }
                self.say(text);
            }
            Effect::Custom { action, record } => {
                info!(action = %action, id = %record.id, "custom action");
                self.notes.notify(
                    &format!("{action}: {}", record.label()),
                    Severity::Info,
                );
            }
        }
    }
}
