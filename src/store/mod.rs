pub mod backend;
pub mod http;
pub mod memory;

pub use backend::{Comparison, Direction, Filter, Query, RecordBackend, StoreError};
pub use http::HttpBackend;
pub use memory::MemoryBackend;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{
    DailyLog, Idea, IdeaStatus, IdeaUpdate, IdeaUpdateWithIdea, ResearchLog,
    ResearchLogWithProject, ResearchProject,
};

const DAILY_LOGS: &str = "daily_logs";
const RESEARCH_PROJECTS: &str = "research_projects";
const RESEARCH_LOGS: &str = "research_logs";
const IDEAS: &str = "ideas";
const IDEA_UPDATES: &str = "idea_updates";

/// Typed record store client: one method per query the application issues,
/// over an interchangeable backend. Holds no row state of its own; every
/// read goes back to the store.
pub struct Store {
    backend: Box<dyn RecordBackend>,
}

impl Store {
    pub fn new(backend: Box<dyn RecordBackend>) -> Self {
        Self { backend }
    }

    /// Connect to the remote store with the configured endpoint and key
    pub fn connect(url: &str, key: &str) -> Result<Self, StoreError> {
        Ok(Self::new(Box::new(HttpBackend::new(url, key)?)))
    }

    fn rows<T: DeserializeOwned>(&self, table: &str, query: &Query) -> Result<Vec<T>, StoreError> {
        self.backend
            .select(table, query)?
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }

    fn first<T: DeserializeOwned>(
        &self,
        table: &str,
        query: Query,
    ) -> Result<Option<T>, StoreError> {
        Ok(self.rows(table, &query.limit(1))?.into_iter().next())
    }

    fn insert_row<T: Serialize + DeserializeOwned>(
        &self,
        table: &str,
        record: &T,
    ) -> Result<T, StoreError> {
        let stored = self.backend.insert(table, &serde_json::to_value(record)?)?;
        Ok(serde_json::from_value(stored)?)
    }

    // --- Daily logs ---

    pub fn daily_log(&self, date: &str) -> Result<Option<DailyLog>, StoreError> {
        self.first(
            DAILY_LOGS,
            Query::new().filter("date", Comparison::Eq, date),
        )
    }

    /// All daily logs with date >= start_date, newest first
    pub fn logs_since(&self, start_date: &str) -> Result<Vec<DailyLog>, StoreError> {
        self.rows(
            DAILY_LOGS,
            &Query::new()
                .filter("date", Comparison::Gte, start_date)
                .order_by("date", Direction::Desc),
        )
    }

    /// Full-record insert-or-overwrite keyed on the date column
    pub fn upsert_daily_log(&self, log: &DailyLog) -> Result<(), StoreError> {
        self.backend
            .upsert(DAILY_LOGS, "date", &serde_json::to_value(log)?)
    }

    // --- Research projects ---

    pub fn active_projects(&self) -> Result<Vec<ResearchProject>, StoreError> {
        self.rows(
            RESEARCH_PROJECTS,
            &Query::new()
                .filter("is_active", Comparison::Eq, "true")
                .order_by("created_at", Direction::Desc),
        )
    }

    pub fn archived_projects(&self) -> Result<Vec<ResearchProject>, StoreError> {
        self.rows(
            RESEARCH_PROJECTS,
            &Query::new()
                .filter("is_active", Comparison::Eq, "false")
                .order_by("created_at", Direction::Desc),
        )
    }

    pub fn all_projects(&self) -> Result<Vec<ResearchProject>, StoreError> {
        self.rows(
            RESEARCH_PROJECTS,
            &Query::new().order_by("created_at", Direction::Desc),
        )
    }

    pub fn insert_project(&self, project: &ResearchProject) -> Result<ResearchProject, StoreError> {
        self.insert_row(RESEARCH_PROJECTS, project)
    }

    pub fn set_project_active(&self, id: &str, active: bool) -> Result<(), StoreError> {
        self.backend.update(
            RESEARCH_PROJECTS,
            id,
            &serde_json::json!({ "is_active": active }),
        )
    }

    /// Hard delete; the storage schema cascades to the project's logs
    pub fn delete_project(&self, id: &str) -> Result<(), StoreError> {
        self.backend.delete(RESEARCH_PROJECTS, id)
    }

    // --- Research logs ---

    pub fn insert_research_log(&self, log: &ResearchLog) -> Result<ResearchLog, StoreError> {
        self.insert_row(RESEARCH_LOGS, log)
    }

    /// Most recent log for a project, by creation time
    pub fn latest_research_log(&self, project_id: &str) -> Result<Option<ResearchLog>, StoreError> {
        self.first(
            RESEARCH_LOGS,
            Query::new()
                .filter("project_id", Comparison::Eq, project_id)
                .order_by("created_at", Direction::Desc),
        )
    }

    pub fn project_logs(&self, project_id: &str) -> Result<Vec<ResearchLog>, StoreError> {
        self.rows(
            RESEARCH_LOGS,
            &Query::new()
                .filter("project_id", Comparison::Eq, project_id)
                .order_by("created_at", Direction::Desc),
        )
    }

    /// Research logs with date >= start_date, with project titles embedded
    pub fn research_logs_since(
        &self,
        start_date: &str,
    ) -> Result<Vec<ResearchLogWithProject>, StoreError> {
        self.rows(
            RESEARCH_LOGS,
            &Query::new()
                .filter("date", Comparison::Gte, start_date)
                .order_by("date", Direction::Desc)
                .embed_parent(RESEARCH_PROJECTS),
        )
    }

    pub fn research_logs_on(&self, date: &str) -> Result<Vec<ResearchLogWithProject>, StoreError> {
        self.rows(
            RESEARCH_LOGS,
            &Query::new()
                .filter("date", Comparison::Eq, date)
                .embed_parent(RESEARCH_PROJECTS),
        )
    }

    // --- Ideas ---

    pub fn all_ideas(&self) -> Result<Vec<Idea>, StoreError> {
        self.rows(IDEAS, &Query::new().order_by("created_at", Direction::Desc))
    }

    /// Ideas still in play (status != Done), newest first
    pub fn active_ideas(&self) -> Result<Vec<Idea>, StoreError> {
        self.rows(
            IDEAS,
            &Query::new()
                .filter("status", Comparison::Neq, IdeaStatus::Done.as_str())
                .order_by("created_at", Direction::Desc),
        )
    }

    pub fn done_ideas(&self) -> Result<Vec<Idea>, StoreError> {
        self.rows(
            IDEAS,
            &Query::new()
                .filter("status", Comparison::Eq, IdeaStatus::Done.as_str())
                .order_by("updated_at", Direction::Desc),
        )
    }

    pub fn insert_idea(&self, idea: &Idea) -> Result<Idea, StoreError> {
        self.insert_row(IDEAS, idea)
    }

    pub fn set_idea_status(
        &self,
        id: &str,
        status: IdeaStatus,
        updated_at: &str,
    ) -> Result<(), StoreError> {
        self.backend.update(
            IDEAS,
            id,
            &serde_json::json!({ "status": status.as_str(), "updated_at": updated_at }),
        )
    }

    /// Hard delete; the storage schema cascades to the idea's updates
    pub fn delete_idea(&self, id: &str) -> Result<(), StoreError> {
        self.backend.delete(IDEAS, id)
    }

    // --- Idea updates ---

    pub fn insert_idea_update(&self, update: &IdeaUpdate) -> Result<IdeaUpdate, StoreError> {
        self.insert_row(IDEA_UPDATES, update)
    }

    pub fn latest_idea_update(&self, idea_id: &str) -> Result<Option<IdeaUpdate>, StoreError> {
        self.first(
            IDEA_UPDATES,
            Query::new()
                .filter("idea_id", Comparison::Eq, idea_id)
                .order_by("created_at", Direction::Desc),
        )
    }

    pub fn idea_updates(&self, idea_id: &str) -> Result<Vec<IdeaUpdate>, StoreError> {
        self.rows(
            IDEA_UPDATES,
            &Query::new()
                .filter("idea_id", Comparison::Eq, idea_id)
                .order_by("created_at", Direction::Desc),
        )
    }

    /// Updates created on or after the given date (timestamps compare
    /// against the bare date as text), with idea titles embedded
    pub fn idea_updates_since(
        &self,
        start_date: &str,
    ) -> Result<Vec<IdeaUpdateWithIdea>, StoreError> {
        self.rows(
            IDEA_UPDATES,
            &Query::new()
                .filter("created_at", Comparison::Gte, start_date)
                .embed_parent(IDEAS),
        )
    }
}
