use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::store::{Store, StoreError};
use crate::summary;
use crate::tracker::{self, TrackerError};

#[derive(Parser)]
#[command(name = "lifeos")]
#[command(about = "Daily habits, study practice, and project tracking in the terminal")]
#[command(version)]
pub struct Cli {
    /// Use development mode (uses separate dev config)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Print today's snapshot
    Snapshot,
    /// Create a research project
    AddProject {
        /// Project title
        title: String,
    },
    /// Create an idea in the Seed status
    AddIdea {
        /// Idea title
        title: String,
    },
    /// Append a progress note to a project, looked up by title
    AddLog {
        /// Project title
        project: String,
        /// Note content
        content: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("{0}")]
    TrackerError(#[from] TrackerError),
    #[error("No project titled '{0}'")]
    ProjectNotFound(String),
}

/// Handle the snapshot command
pub fn handle_snapshot(store: &Store) -> Result<(), CliError> {
    let snapshot = summary::today_snapshot(store)?;

    match &snapshot.log {
        Some(log) => {
            println!("Today ({})", log.date);
            println!("  Info diet:    {} min", log.info_minutes());
            println!("  GRE vocab:    {}", log.gre_vocab_count);
            println!(
                "  GRE practice: V:{} R:{}",
                log.gre_verbal_count, log.gre_reading_count
            );
            println!(
                "  LeetCode:     E:{} M:{} H:{}",
                log.lc_easy_count, log.lc_medium_count, log.lc_hard_count
            );
        }
        None => println!("No data logged today yet."),
    }

    if !snapshot.research.is_empty() {
        println!("Research today:");
        for line in &snapshot.research {
            println!("  {}: {}", line.title, line.preview);
        }
    }
    if !snapshot.ideas.is_empty() {
        println!("Ideas today:");
        for line in &snapshot.ideas {
            println!("  {}: {}", line.title, line.preview);
        }
    }

    Ok(())
}

/// Handle the add-project command
pub fn handle_add_project(title: String, store: &Store) -> Result<(), CliError> {
    let project = tracker::create_project(store, &title)?;
    println!(
        "Project created: {} (ID: {})",
        project.title,
        project.id.as_deref().unwrap_or("?")
    );
    Ok(())
}

/// Handle the add-idea command
pub fn handle_add_idea(title: String, store: &Store) -> Result<(), CliError> {
    let idea = tracker::create_idea(store, &title)?;
    println!(
        "Idea created: {} (ID: {})",
        idea.title,
        idea.id.as_deref().unwrap_or("?")
    );
    Ok(())
}

/// Handle the add-log command: resolve the project by exact title, then
/// append the note
pub fn handle_add_log(project: String, content: String, store: &Store) -> Result<(), CliError> {
    let wanted = project.trim();
    let target = store
        .all_projects()?
        .into_iter()
        .find(|p| p.title == wanted)
        .ok_or_else(|| CliError::ProjectNotFound(wanted.to_string()))?;
    let id = target
        .id
        .as_deref()
        .ok_or_else(|| CliError::ProjectNotFound(wanted.to_string()))?;
    let log = tracker::add_research_log(store, id, &content)?;
    println!("Logged to {} on {}", target.title, log.date);
    Ok(())
}
