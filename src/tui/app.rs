use crate::config::Config;
use crate::data::aggregate::AssigneeFilter;
use crate::data::report::{FetchTicket, ReportViewModel};
use crate::data::table::{assignee_table, status_table, TableModel};
use crate::data::{Project, Snapshot};
use crate::error::{FetchError, ReportError};
use crate::export;
use crate::integrations::tracker;
use crate::tui::ui::report::TableFocus;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Braille spinner frames for loading animation
pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Result from a background fetch task
#[derive(Debug)]
pub enum FetchResult {
    Projects(Result<Vec<Project>, FetchError>),
    Work {
        ticket: FetchTicket,
        result: Result<Snapshot, ReportError>,
    },
}

/// Active modal state - only one modal can be active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    None,
    Help,
    ProjectPicker { selected: usize },
    /// Entry 0 is "All", then one entry per assignee
    AssigneeMenu { selected: usize },
}

impl ModalState {
    pub fn is_none(&self) -> bool {
        matches!(self, ModalState::None)
    }
}

pub struct App {
    pub config: Arc<Config>,
    pub report: ReportViewModel,
    pub assignee_table: TableModel,
    pub status_table: TableModel,
    pub focus: TableFocus,
    pub modal: ModalState,

    // UI state
    /// Outcome of the last export, shown in the status bar
    pub notice: Option<String>,
    pub spinner_frame: usize,
    pub loading_projects: bool,

    fetch_tx: mpsc::Sender<FetchResult>,
    fetch_rx: mpsc::Receiver<FetchResult>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::channel(32);
        let empty_message = config.report.empty_message.clone();
        Self {
            config: Arc::new(config),
            report: ReportViewModel::new(),
            assignee_table: assignee_table(&empty_message),
            status_table: status_table(&empty_message),
            focus: TableFocus::default(),
            modal: ModalState::None,
            notice: None,
            spinner_frame: 0,
            loading_projects: false,
            fetch_tx,
            fetch_rx,
        }
    }

    pub fn show_help(&self) -> bool {
        matches!(self.modal, ModalState::Help)
    }

    pub fn show_project_picker(&self) -> bool {
        matches!(self.modal, ModalState::ProjectPicker { .. })
    }

    pub fn show_assignee_menu(&self) -> bool {
        matches!(self.modal, ModalState::AssigneeMenu { .. })
    }

    pub fn is_loading(&self) -> bool {
        self.loading_projects || self.report.is_loading()
    }

    /// Process a message and update app state (Elm Architecture update function).
    ///
    /// Returns `Ok(true)` if the app should quit, `Ok(false)` to continue.
    pub fn update(&mut self, msg: super::Message) -> Result<bool> {
        use super::Message;
        match msg {
            Message::Quit => return Ok(true),
            Message::Retry => {
                if let Some(ticket) = self.report.retry() {
                    self.spawn_work_fetch(ticket);
                }
            }
            Message::ReloadProjects => self.start_project_fetch(),

            Message::SelectProject(project_id) => self.select_project(&project_id),
            Message::SetAssigneeFilter(filter) => self.report.set_assignee_filter(filter),

            Message::FocusNextTable => self.focus = self.focus.toggled(),
            Message::NextColumn => self.focused_table_mut().next_column(),
            Message::PrevColumn => self.focused_table_mut().prev_column(),
            Message::SortByCursor => {
                self.focused_table_mut().sort_by_cursor();
            }
            Message::SortColumn(idx) => {
                self.focused_table_mut().toggle_sort_at(idx);
            }

            Message::OpenProjectPicker => self.open_project_picker(),
            Message::OpenAssigneeMenu => self.open_assignee_menu(),
            Message::ToggleHelp => {
                self.modal = if self.show_help() {
                    ModalState::None
                } else {
                    ModalState::Help
                };
            }
            Message::MenuUp => self.move_menu_selection(-1),
            Message::MenuDown => self.move_menu_selection(1),
            Message::MenuConfirm => self.confirm_menu(),
            Message::CloseModal => self.modal = ModalState::None,

            Message::Export => self.export(),

            Message::None => {}
        }
        Ok(false)
    }

    /// Advance spinner frame (call on tick while loading)
    pub fn tick_spinner(&mut self) {
        if self.is_loading() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Get current spinner character
    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame]
    }

    pub fn focused_table(&self) -> &TableModel {
        match self.focus {
            TableFocus::Assignees => &self.assignee_table,
            TableFocus::Statuses => &self.status_table,
        }
    }

    fn focused_table_mut(&mut self) -> &mut TableModel {
        match self.focus {
            TableFocus::Assignees => &mut self.assignee_table,
            TableFocus::Statuses => &mut self.status_table,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Background fetches
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the project list in the background (non-blocking)
    pub fn start_project_fetch(&mut self) {
        self.loading_projects = true;
        let tx = self.fetch_tx.clone();
        let config = Arc::clone(&self.config);

        tokio::spawn(async move {
            let result = tracker::fetch_projects(&config.api).await;
            if let Err(e) = tx.send(FetchResult::Projects(result)).await {
                tracing::debug!("Dropping project list, app closed: {}", e);
            }
        });
    }

    /// Select a project: the view model enters Loading immediately, the fetch runs in the background
    pub fn select_project(&mut self, project_id: &str) {
        self.notice = None;
        let ticket = self.report.select_project(project_id);
        self.spawn_work_fetch(ticket);
    }

    fn spawn_work_fetch(&self, ticket: FetchTicket) {
        let tx = self.fetch_tx.clone();
        let config = Arc::clone(&self.config);

        tokio::spawn(async move {
            let result = tracker::fetch_current_work(&config.api, &ticket.project_id).await;
            if let Err(e) = tx.send(FetchResult::Work { ticket, result }).await {
                tracing::debug!("Dropping work fetch result, app closed: {}", e);
            }
        });
    }

    /// Apply a finished fetch. Stale work results are dropped by the view model.
    pub fn apply_fetch_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::Projects(projects) => {
                self.loading_projects = false;
                self.report.set_projects(projects);
            }
            FetchResult::Work { ticket, result } => {
                self.report.apply_fetch(&ticket, result);
                self.clamp_assignee_filter();
            }
        }
    }

    /// Poll for fetch results (non-blocking, call from event loop tick)
    pub fn poll_fetches(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(result) = self.fetch_rx.try_recv() {
            self.apply_fetch_result(result);
            applied += 1;
        }
        applied
    }

    /// A named filter for someone absent from the new snapshot would hide every row
    fn clamp_assignee_filter(&mut self) {
        let absent = match self.report.assignee_filter() {
            AssigneeFilter::Named(name) => {
                self.report.ready().is_some()
                    && !self.report.assignee_names().contains(&name.as_str())
            }
            AssigneeFilter::All => false,
        };
        if absent {
            let notice = format!(
                "{} is not in this sprint, showing all assignees",
                self.report.assignee_filter().label()
            );
            tracing::debug!("{}", notice);
            self.report.set_assignee_filter(AssigneeFilter::All);
            self.notice = Some(notice);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Menus
    // ─────────────────────────────────────────────────────────────────────────

    pub fn open_project_picker(&mut self) {
        let selected = self
            .report
            .selected_project()
            .and_then(|id| self.report.projects().iter().position(|p| p.id == id))
            .unwrap_or(0);
        self.modal = ModalState::ProjectPicker { selected };
    }

    pub fn open_assignee_menu(&mut self) {
        let selected = match self.report.assignee_filter() {
            AssigneeFilter::All => 0,
            AssigneeFilter::Named(name) => self
                .report
                .assignee_names()
                .iter()
                .position(|n| n == name)
                .map(|idx| idx + 1)
                .unwrap_or(0),
        };
        self.modal = ModalState::AssigneeMenu { selected };
    }

    /// Entries shown in the assignee menu, "All" first
    pub fn assignee_menu_entries(&self) -> Vec<&str> {
        let mut entries = vec!["All"];
        entries.extend(self.report.assignee_names());
        entries
    }

    fn move_menu_selection(&mut self, delta: i32) {
        let len = match self.modal {
            ModalState::ProjectPicker { .. } => self.report.projects().len(),
            ModalState::AssigneeMenu { .. } => self.assignee_menu_entries().len(),
            _ => return,
        };
        if len == 0 {
            return;
        }
        let step = |selected: usize| -> usize {
            if delta < 0 {
                selected.saturating_sub(delta.unsigned_abs() as usize)
            } else {
                (selected + delta as usize).min(len - 1)
            }
        };
        match &mut self.modal {
            ModalState::ProjectPicker { selected } | ModalState::AssigneeMenu { selected } => {
                *selected = step(*selected);
            }
            _ => {}
        }
    }

    fn confirm_menu(&mut self) {
        match self.modal {
            ModalState::ProjectPicker { selected } => {
                self.modal = ModalState::None;
                if let Some(project) = self.report.projects().get(selected) {
                    let id = project.id.clone();
                    self.select_project(&id);
                }
            }
            ModalState::AssigneeMenu { selected } => {
                self.modal = ModalState::None;
                let filter = if selected == 0 {
                    AssigneeFilter::All
                } else {
                    self.report
                        .assignee_names()
                        .get(selected - 1)
                        .map(|name| AssigneeFilter::Named(name.to_string()))
                        .unwrap_or(AssigneeFilter::All)
                };
                self.report.set_assignee_filter(filter);
            }
            _ => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    pub fn export(&mut self) {
        let path = self.config.export.path.clone();
        self.notice = Some(
            match export::export_report(&self.report, &self.assignee_table, &self.status_table, &path) {
                Ok(written) => format!("Report exported to {}", written.display()),
                Err(e) => {
                    tracing::warn!("Export failed: {:#}", e);
                    format!("Export failed: {}", e)
                }
            },
        );
    }
}
