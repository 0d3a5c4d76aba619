use thiserror::Error;

use crate::models::{Idea, IdeaStatus, IdeaUpdate, ResearchLog, ResearchProject};
use crate::store::{Store, StoreError};
use crate::utils;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("content must not be empty")]
    EmptyContent,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create a research project in the default active state. The title is
/// trimmed and must be non-empty; nothing is written otherwise.
pub fn create_project(store: &Store, title: &str) -> Result<ResearchProject, TrackerError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TrackerError::EmptyTitle);
    }
    Ok(store.insert_project(&ResearchProject::new(title.to_string()))?)
}

/// Flip a project inactive. Archiving an archived project is a no-op.
pub fn archive_project(store: &Store, id: &str) -> Result<(), TrackerError> {
    Ok(store.set_project_active(id, false)?)
}

pub fn delete_project(store: &Store, id: &str) -> Result<(), TrackerError> {
    Ok(store.delete_project(id)?)
}

/// Append a dated note to a project's log. Content is trimmed and must be
/// non-empty; the entry is stamped with today's date.
pub fn add_research_log(
    store: &Store,
    project_id: &str,
    content: &str,
) -> Result<ResearchLog, TrackerError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(TrackerError::EmptyContent);
    }
    let log = ResearchLog::new(
        project_id.to_string(),
        utils::today_string(),
        content.to_string(),
    );
    Ok(store.insert_research_log(&log)?)
}

/// Create an idea in the Seed status
pub fn create_idea(store: &Store, title: &str) -> Result<Idea, TrackerError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TrackerError::EmptyTitle);
    }
    Ok(store.insert_idea(&Idea::new(title.to_string()))?)
}

/// Set an idea's status and refresh its modified timestamp. Every canonical
/// status is reachable from every other; there is no transition graph.
pub fn set_idea_status(store: &Store, id: &str, status: IdeaStatus) -> Result<(), TrackerError> {
    Ok(store.set_idea_status(id, status, &utils::utc_timestamp())?)
}

pub fn delete_idea(store: &Store, id: &str) -> Result<(), TrackerError> {
    Ok(store.delete_idea(id)?)
}

/// Append a progress note to an idea. Content is trimmed and must be
/// non-empty.
pub fn add_idea_update(
    store: &Store,
    idea_id: &str,
    content: &str,
) -> Result<IdeaUpdate, TrackerError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(TrackerError::EmptyContent);
    }
    Ok(store.insert_idea_update(&IdeaUpdate::new(idea_id.to_string(), content.to_string()))?)
}
