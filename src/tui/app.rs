use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::{Idea, IdeaUpdate, ResearchLog, ResearchProject};
use crate::session::{DietChannel, PracticeCounter, SessionState};
use crate::store::Store;
use crate::summary::{self, TodaySnapshot, WindowReport};
use crate::tracker;
use crate::tui::error::TuiError;
use crate::{Config, utils};

/// How long a status message stays visible
const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Daily,
    Projects,
    Ideas,
    Summary,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Daily, Tab::Projects, Tab::Ideas, Tab::Summary];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Daily => "Daily",
            Tab::Projects => "Projects",
            Tab::Ideas => "Ideas",
            Tab::Summary => "Summary",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn left(&self) -> Tab {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn right(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    View,
    Input,
    ConfirmDelete,
    History,
    Help,
}

/// The interactive rows on the Daily tab, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyRow {
    Channel(DietChannel),
    Counter(PracticeCounter),
    CodingNote,
}

impl DailyRow {
    pub const ALL: [DailyRow; 10] = [
        DailyRow::Channel(DietChannel::Newsletter),
        DailyRow::Channel(DietChannel::Video),
        DailyRow::Channel(DietChannel::Wechat),
        DailyRow::Counter(PracticeCounter::Vocabulary),
        DailyRow::Counter(PracticeCounter::VerbalSets),
        DailyRow::Counter(PracticeCounter::ReadingPassages),
        DailyRow::Counter(PracticeCounter::CodingEasy),
        DailyRow::Counter(PracticeCounter::CodingMedium),
        DailyRow::Counter(PracticeCounter::CodingHard),
        DailyRow::CodingNote,
    ];
}

/// What an open input prompt will do on submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPurpose {
    NewProject,
    NewIdea,
    ProjectLog { project_id: String, title: String },
    IdeaNote { idea_id: String, title: String },
    ChannelNote(DietChannel),
    CodingNote,
}

impl InputPurpose {
    pub fn prompt_title(&self) -> String {
        match self {
            InputPurpose::NewProject => "New Project".to_string(),
            InputPurpose::NewIdea => "New Idea".to_string(),
            InputPurpose::ProjectLog { title, .. } => format!("Progress on {}", title),
            InputPurpose::IdeaNote { title, .. } => format!("New thought on {}", title),
            InputPurpose::ChannelNote(channel) => format!("{} note", channel.label()),
            InputPurpose::CodingNote => "LeetCode notes".to_string(),
        }
    }
}

/// Single-line input prompt state. Cursor is a character offset.
#[derive(Debug, Clone)]
pub struct InputState {
    pub purpose: InputPurpose,
    pub buffer: String,
    pub cursor: usize,
}

impl InputState {
    pub fn new(purpose: InputPurpose, initial: String) -> Self {
        let cursor = initial.chars().count();
        Self {
            purpose,
            buffer: initial,
            cursor,
        }
    }

    fn byte_offset(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    pub fn insert(&mut self, c: char) {
        let offset = self.byte_offset();
        self.buffer.insert(offset, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let offset = self.byte_offset();
        self.buffer.remove(offset);
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }
}

#[derive(Debug, Clone)]
pub enum PendingDelete {
    Project(ResearchProject),
    Idea(Idea),
}

impl PendingDelete {
    pub fn kind(&self) -> &'static str {
        match self {
            PendingDelete::Project(_) => "project",
            PendingDelete::Idea(_) => "idea",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            PendingDelete::Project(p) => &p.title,
            PendingDelete::Idea(i) => &i.title,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModalState {
    pub pending_delete: Option<PendingDelete>,
    pub selection: usize, // 0 = Delete, 1 = Cancel
}

/// Full note history for a project or idea, shown as an overlay
#[derive(Debug, Clone)]
pub struct HistoryState {
    pub title: String,
    pub entries: Vec<(String, String)>, // (date, content)
    pub scroll: u16,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub current_tab: Tab,
    pub mode: Mode,
    pub daily_index: usize,
    pub project_index: usize,
    pub idea_index: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_tab: Tab::Daily,
            mode: Mode::View,
            daily_index: 0,
            project_index: 0,
            idea_index: 0,
        }
    }
}

pub struct App {
    // Core infrastructure
    pub config: Config,
    pub store: Store,
    pub session: SessionState,

    // Data collections, re-fetched from the store after every mutation
    pub projects: Vec<ResearchProject>,
    pub project_previews: HashMap<String, ResearchLog>,
    pub ideas: Vec<Idea>,
    pub idea_previews: HashMap<String, IdeaUpdate>,
    pub snapshot: Option<TodaySnapshot>,
    pub window: Option<WindowReport>,

    // Grouped state
    pub ui: UiState,
    pub status: StatusState,
    pub input: Option<InputState>,
    pub modal: ModalState,
    pub history: Option<HistoryState>,
}

impl App {
    pub fn new(config: Config, store: Store) -> Result<Self, TuiError> {
        let session = SessionState::init(&store)?;

        let mut app = Self {
            config,
            store,
            session,
            projects: Vec::new(),
            project_previews: HashMap::new(),
            ideas: Vec::new(),
            idea_previews: HashMap::new(),
            snapshot: None,
            window: None,
            ui: UiState::default(),
            status: StatusState::default(),
            input: None,
            modal: ModalState::default(),
            history: None,
        };

        app.load_projects()?;
        app.load_ideas()?;
        Ok(app)
    }

    /// Re-fetch projects (active first, then archived) and the latest-log
    /// preview for each
    pub fn load_projects(&mut self) -> Result<(), TuiError> {
        let mut projects = self.store.active_projects()?;
        projects.extend(self.store.archived_projects()?);

        let mut previews = HashMap::new();
        for project in &projects {
            if let Some(id) = project.id.as_deref() {
                if let Some(latest) = self.store.latest_research_log(id)? {
                    previews.insert(id.to_string(), latest);
                }
            }
        }

        self.projects = projects;
        self.project_previews = previews;
        self.clamp_selection();
        Ok(())
    }

    /// Re-fetch ideas (active first, then done) and the latest-update
    /// preview for each
    pub fn load_ideas(&mut self) -> Result<(), TuiError> {
        let mut ideas = self.store.active_ideas()?;
        ideas.extend(self.store.done_ideas()?);

        let mut previews = HashMap::new();
        for idea in &ideas {
            if let Some(id) = idea.id.as_deref() {
                if let Some(latest) = self.store.latest_idea_update(id)? {
                    previews.insert(id.to_string(), latest);
                }
            }
        }

        self.ideas = ideas;
        self.idea_previews = previews;
        self.clamp_selection();
        Ok(())
    }

    /// Recompute the summary aggregates
    pub fn load_summary(&mut self) -> Result<(), TuiError> {
        self.snapshot = Some(summary::today_snapshot(&self.store)?);
        self.window = Some(summary::window_report(&self.store)?);
        Ok(())
    }

    fn clamp_selection(&mut self) {
        if !self.projects.is_empty() {
            self.ui.project_index = self.ui.project_index.min(self.projects.len() - 1);
        } else {
            self.ui.project_index = 0;
        }
        if !self.ideas.is_empty() {
            self.ui.idea_index = self.ui.idea_index.min(self.ideas.len() - 1);
        } else {
            self.ui.idea_index = 0;
        }
    }

    pub fn selected_project(&self) -> Option<&ResearchProject> {
        self.projects.get(self.ui.project_index)
    }

    pub fn selected_idea(&self) -> Option<&Idea> {
        self.ideas.get(self.ui.idea_index)
    }

    pub fn selected_daily_row(&self) -> DailyRow {
        DailyRow::ALL[self.ui.daily_index.min(DailyRow::ALL.len() - 1)]
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status.message = Some(message.into());
        self.status.message_time = Some(Instant::now());
    }

    /// Clear the status message once it has been shown long enough
    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed() >= STATUS_MESSAGE_TIMEOUT {
                self.status.message = None;
                self.status.message_time = None;
            }
        }
    }

    /// Surface a failed action in the status bar and carry on; the rest of
    /// the session stays usable
    fn report<T, E: std::fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.set_status_message(format!("Error: {}", err));
                None
            }
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.ui.current_tab = tab;
        if tab == Tab::Summary {
            let result = self.load_summary();
            self.report(result);
        }
    }

    pub fn refresh_current_tab(&mut self) {
        let result = match self.ui.current_tab {
            Tab::Daily => Ok(()),
            Tab::Projects => self.load_projects(),
            Tab::Ideas => self.load_ideas(),
            Tab::Summary => self.load_summary(),
        };
        if self.report(result).is_some() {
            self.set_status_message("Refreshed");
        }
    }

    pub fn move_selection(&mut self, down: bool) {
        match self.ui.current_tab {
            Tab::Daily => {
                let max = DailyRow::ALL.len() - 1;
                self.ui.daily_index = step_index(self.ui.daily_index, max, down);
            }
            Tab::Projects => {
                if !self.projects.is_empty() {
                    let max = self.projects.len() - 1;
                    self.ui.project_index = step_index(self.ui.project_index, max, down);
                }
            }
            Tab::Ideas => {
                if !self.ideas.is_empty() {
                    let max = self.ideas.len() - 1;
                    self.ui.idea_index = step_index(self.ui.idea_index, max, down);
                }
            }
            Tab::Summary => {}
        }
    }

    // --- Daily tab actions ---

    pub fn toggle_current_done(&mut self) {
        if self.ui.current_tab != Tab::Daily {
            return;
        }
        if let DailyRow::Channel(channel) = self.selected_daily_row() {
            let done = !self.session.done(channel);
            let result = self.session.set_done(&self.store, channel, done);
            if self.report(result).is_some() {
                self.set_status_message("Saved");
            }
        }
    }

    pub fn adjust_current(&mut self, sign: i32) {
        if self.ui.current_tab != Tab::Daily {
            return;
        }
        let result = match self.selected_daily_row() {
            DailyRow::Channel(channel) => self.session.adjust_minutes(
                &self.store,
                channel,
                sign * DietChannel::STEP_MINUTES as i32,
            ),
            DailyRow::Counter(counter) => {
                self.session
                    .adjust_count(&self.store, counter, sign * counter.step() as i32)
            }
            DailyRow::CodingNote => return,
        };
        if self.report(result).is_some() {
            self.set_status_message("Saved");
        }
    }

    pub fn edit_current_note(&mut self) {
        if self.ui.current_tab != Tab::Daily {
            return;
        }
        match self.selected_daily_row() {
            DailyRow::Channel(channel) => {
                let note = self.session.note(channel).to_string();
                self.open_input(InputPurpose::ChannelNote(channel), note);
            }
            DailyRow::CodingNote => {
                let note = self.session.log().lc_notes.clone();
                self.open_input(InputPurpose::CodingNote, note);
            }
            DailyRow::Counter(_) => {}
        }
    }

    // --- Input prompt ---

    pub fn open_input(&mut self, purpose: InputPurpose, initial: String) {
        self.input = Some(InputState::new(purpose, initial));
        self.ui.mode = Mode::Input;
    }

    pub fn cancel_input(&mut self) {
        self.input = None;
        self.ui.mode = Mode::View;
    }

    pub fn open_create_input(&mut self) {
        match self.ui.current_tab {
            Tab::Projects => self.open_input(InputPurpose::NewProject, String::new()),
            Tab::Ideas => self.open_input(InputPurpose::NewIdea, String::new()),
            _ => {}
        }
    }

    pub fn open_entry_input(&mut self) {
        match self.ui.current_tab {
            Tab::Projects => {
                if let Some(project) = self.selected_project() {
                    if let Some(id) = project.id.clone() {
                        let title = project.title.clone();
                        self.open_input(
                            InputPurpose::ProjectLog {
                                project_id: id,
                                title,
                            },
                            String::new(),
                        );
                    }
                }
            }
            Tab::Ideas => {
                if let Some(idea) = self.selected_idea() {
                    if let Some(id) = idea.id.clone() {
                        let title = idea.title.clone();
                        self.open_input(
                            InputPurpose::IdeaNote { idea_id: id, title },
                            String::new(),
                        );
                    }
                }
            }
            _ => {}
        }
    }

    /// Apply the open input prompt. Validation failures keep the prompt
    /// open with a message; successful writes close it and reload.
    pub fn submit_input(&mut self) {
        let Some(input) = self.input.clone() else {
            return;
        };

        match input.purpose {
            InputPurpose::NewProject => {
                let result = tracker::create_project(&self.store, &input.buffer);
                if let Some(project) = self.report(result) {
                    self.cancel_input();
                    let reload = self.load_projects();
                    self.report(reload);
                    self.set_status_message(format!("Created: {}", project.title));
                }
            }
            InputPurpose::NewIdea => {
                let result = tracker::create_idea(&self.store, &input.buffer);
                if let Some(idea) = self.report(result) {
                    self.cancel_input();
                    let reload = self.load_ideas();
                    self.report(reload);
                    self.set_status_message(format!("Created: {}", idea.title));
                }
            }
            InputPurpose::ProjectLog { project_id, .. } => {
                let result = tracker::add_research_log(&self.store, &project_id, &input.buffer);
                if self.report(result).is_some() {
                    self.cancel_input();
                    let reload = self.load_projects();
                    self.report(reload);
                    self.set_status_message("Saved");
                }
            }
            InputPurpose::IdeaNote { idea_id, .. } => {
                let result = tracker::add_idea_update(&self.store, &idea_id, &input.buffer);
                if self.report(result).is_some() {
                    self.cancel_input();
                    let reload = self.load_ideas();
                    self.report(reload);
                    self.set_status_message("Saved");
                }
            }
            InputPurpose::ChannelNote(channel) => {
                let result = self
                    .session
                    .set_note(&self.store, channel, input.buffer.clone());
                if self.report(result).is_some() {
                    self.cancel_input();
                    self.set_status_message("Saved");
                }
            }
            InputPurpose::CodingNote => {
                let result = self.session.set_coding_note(&self.store, input.buffer.clone());
                if self.report(result).is_some() {
                    self.cancel_input();
                    self.set_status_message("Saved");
                }
            }
        }
    }

    // --- Project/idea actions ---

    pub fn archive_selected(&mut self) {
        if self.ui.current_tab != Tab::Projects {
            return;
        }
        let Some(project) = self.selected_project() else {
            return;
        };
        let Some(id) = project.id.clone() else {
            return;
        };
        let result = tracker::archive_project(&self.store, &id);
        if self.report(result).is_some() {
            let reload = self.load_projects();
            self.report(reload);
            self.set_status_message("Archived");
        }
    }

    pub fn cycle_selected_status(&mut self) {
        if self.ui.current_tab != Tab::Ideas {
            return;
        }
        let Some(idea) = self.selected_idea() else {
            return;
        };
        let Some(id) = idea.id.clone() else {
            return;
        };
        let next = idea.status.next();
        let result = tracker::set_idea_status(&self.store, &id, next);
        if self.report(result).is_some() {
            let reload = self.load_ideas();
            self.report(reload);
            self.set_status_message(format!("Status: {}", next.as_str()));
        }
    }

    pub fn request_delete_selected(&mut self) {
        let pending = match self.ui.current_tab {
            Tab::Projects => self.selected_project().cloned().map(PendingDelete::Project),
            Tab::Ideas => self.selected_idea().cloned().map(PendingDelete::Idea),
            _ => None,
        };
        if let Some(pending) = pending {
            self.modal.pending_delete = Some(pending);
            self.modal.selection = 1; // default to Cancel
            self.ui.mode = Mode::ConfirmDelete;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.modal.pending_delete = None;
        self.ui.mode = Mode::View;
    }

    pub fn confirm_delete_choice(&mut self) {
        let Some(pending) = self.modal.pending_delete.take() else {
            self.ui.mode = Mode::View;
            return;
        };
        self.ui.mode = Mode::View;
        if self.modal.selection != 0 {
            return;
        }
        match pending {
            PendingDelete::Project(project) => {
                if let Some(id) = project.id.as_deref() {
                    let result = tracker::delete_project(&self.store, id);
                    if self.report(result).is_some() {
                        let reload = self.load_projects();
                        self.report(reload);
                        self.set_status_message("Deleted");
                    }
                }
            }
            PendingDelete::Idea(idea) => {
                if let Some(id) = idea.id.as_deref() {
                    let result = tracker::delete_idea(&self.store, id);
                    if self.report(result).is_some() {
                        let reload = self.load_ideas();
                        self.report(reload);
                        self.set_status_message("Deleted");
                    }
                }
            }
        }
    }

    // --- History overlay ---

    pub fn open_history(&mut self) {
        let state = match self.ui.current_tab {
            Tab::Projects => {
                let Some(project) = self.selected_project() else {
                    return;
                };
                let Some(id) = project.id.as_deref() else {
                    return;
                };
                let title = project.title.clone();
                let logs = self.store.project_logs(id);
                match logs {
                    Ok(logs) => Some(HistoryState {
                        title,
                        entries: logs
                            .into_iter()
                            .map(|log| (log.date.clone(), log.content))
                            .collect(),
                        scroll: 0,
                    }),
                    Err(err) => {
                        self.set_status_message(format!("Error: {}", err));
                        None
                    }
                }
            }
            Tab::Ideas => {
                let Some(idea) = self.selected_idea() else {
                    return;
                };
                let Some(id) = idea.id.as_deref() else {
                    return;
                };
                let title = idea.title.clone();
                let updates = self.store.idea_updates(id);
                match updates {
                    Ok(updates) => Some(HistoryState {
                        title,
                        entries: updates
                            .into_iter()
                            .map(|u| (u.created_date().to_string(), u.content))
                            .collect(),
                        scroll: 0,
                    }),
                    Err(err) => {
                        self.set_status_message(format!("Error: {}", err));
                        None
                    }
                }
            }
            _ => None,
        };
        if let Some(state) = state {
            self.history = Some(state);
            self.ui.mode = Mode::History;
        }
    }

    pub fn close_history(&mut self) {
        self.history = None;
        self.ui.mode = Mode::View;
    }

    /// Today's date line shown on the Daily tab
    pub fn today_heading(&self) -> String {
        format!("Daily Log {}", utils::today_string())
    }
}

fn step_index(current: usize, max: usize, down: bool) -> usize {
    if down {
        (current + 1).min(max)
    } else {
        current.saturating_sub(1)
    }
}
