#![forbid(unsafe_code)]

use lifeos::Store;
use lifeos::models::IdeaStatus;
use lifeos::store::MemoryBackend;
use lifeos::store::backend::RecordBackend;
use lifeos::tracker::{self, TrackerError};

fn memory_store() -> Store {
    Store::new(Box::new(MemoryBackend::new()))
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[test]
fn empty_titles_are_rejected_before_any_write() {
    let store = memory_store();

    for title in ["", "   ", "\t\n"] {
        match tracker::create_project(&store, title) {
            Err(TrackerError::EmptyTitle) => {}
            other => panic!("expected EmptyTitle, got {other:?}"),
        }
        match tracker::create_idea(&store, title) {
            Err(TrackerError::EmptyTitle) => {}
            other => panic!("expected EmptyTitle, got {other:?}"),
        }
    }

    assert!(store.all_projects().expect("projects").is_empty());
    assert!(store.all_ideas().expect("ideas").is_empty());
}

#[test]
fn empty_note_content_is_rejected_before_any_write() {
    let store = memory_store();
    let project = tracker::create_project(&store, "P").expect("create");
    let idea = tracker::create_idea(&store, "I").expect("create");
    let project_id = project.id.as_deref().expect("assigned id");
    let idea_id = idea.id.as_deref().expect("assigned id");

    match tracker::add_research_log(&store, project_id, "   ") {
        Err(TrackerError::EmptyContent) => {}
        other => panic!("expected EmptyContent, got {other:?}"),
    }
    match tracker::add_idea_update(&store, idea_id, "") {
        Err(TrackerError::EmptyContent) => {}
        other => panic!("expected EmptyContent, got {other:?}"),
    }

    assert!(store.project_logs(project_id).expect("logs").is_empty());
    assert!(store.idea_updates(idea_id).expect("updates").is_empty());
}

#[test]
fn titles_and_content_are_trimmed_on_write() {
    let store = memory_store();

    let project = tracker::create_project(&store, "  Robot Arm  ").expect("create");
    assert_eq!(project.title, "Robot Arm");

    let id = project.id.as_deref().expect("assigned id");
    let log = tracker::add_research_log(&store, id, "  calibrated servos  ").expect("log");
    assert_eq!(log.content, "calibrated servos");
}

#[test]
fn archiving_twice_stays_archived_without_error() {
    let store = memory_store();

    let project = tracker::create_project(&store, "P").expect("create");
    let id = project.id.as_deref().expect("assigned id");

    tracker::archive_project(&store, id).expect("first archive");
    tracker::archive_project(&store, id).expect("second archive");

    let archived = store.archived_projects().expect("archived");
    assert_eq!(archived.len(), 1);
    assert!(!archived[0].is_active);
    assert!(store.active_projects().expect("active").is_empty());
}

#[test]
fn every_status_is_reachable_from_every_other() {
    let store = memory_store();
    let idea = tracker::create_idea(&store, "I").expect("create");
    let id = idea.id.as_deref().expect("assigned id");

    // Walk an arbitrary path through all five statuses, including
    // "backwards" moves; none may error
    let path = [
        IdeaStatus::Done,
        IdeaStatus::Seed,
        IdeaStatus::Building,
        IdeaStatus::Planning,
        IdeaStatus::Shelved,
        IdeaStatus::Building,
    ];
    for status in path {
        tracker::set_idea_status(&store, id, status).expect("set status");
        let ideas = store.all_ideas().expect("ideas");
        assert_eq!(ideas[0].status, status);
    }
}

#[test]
fn status_change_refreshes_updated_at() {
    let store = memory_store();
    let idea = tracker::create_idea(&store, "I").expect("create");
    let id = idea.id.as_deref().expect("assigned id");

    tracker::set_idea_status(&store, id, IdeaStatus::Planning).expect("set status");
    let after = store.all_ideas().expect("ideas");
    assert!(after[0].updated_at.is_some());
}

#[test]
fn legacy_status_values_fold_at_read_time() {
    let backend = MemoryBackend::new();
    // Rows written by an earlier version of the tracker
    backend
        .insert(
            "ideas",
            &serde_json::json!({ "title": "old seed", "status": "Idea" }),
        )
        .expect("seed row");
    backend
        .insert(
            "ideas",
            &serde_json::json!({ "title": "old build", "status": "In Progress" }),
        )
        .expect("seed row");

    let store = Store::new(Box::new(backend));
    let mut ideas = store.all_ideas().expect("ideas");
    ideas.sort_by(|a, b| a.title.cmp(&b.title));

    assert_eq!(ideas[0].title, "old build");
    assert_eq!(ideas[0].status, IdeaStatus::Building);
    assert_eq!(ideas[1].title, "old seed");
    assert_eq!(ideas[1].status, IdeaStatus::Seed);
}

#[test]
fn deleting_an_idea_unreaches_its_updates() {
    let store = memory_store();
    let idea = tracker::create_idea(&store, "I").expect("create");
    let id = idea.id.clone().expect("assigned id");
    tracker::add_idea_update(&store, &id, "first thought").expect("update");

    tracker::delete_idea(&store, &id).expect("delete");

    assert!(store.all_ideas().expect("ideas").is_empty());
    assert!(store.idea_updates(&id).expect("updates").is_empty());
    assert!(store.latest_idea_update(&id).expect("latest").is_none());
}

#[test]
fn project_log_end_to_end() {
    let store = memory_store();

    let project = tracker::create_project(&store, "P").expect("create");
    let id = project.id.as_deref().expect("assigned id");
    tracker::add_research_log(&store, id, "hello").expect("log");

    let latest = store
        .latest_research_log(id)
        .expect("latest")
        .expect("must exist");
    assert_eq!(latest.content, "hello");
    assert_eq!(latest.date, today());
    assert_eq!(latest.duration_minutes, 0);
}
