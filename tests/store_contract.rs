#![forbid(unsafe_code)]

use lifeos::Store;
use lifeos::models::{DailyLog, IdeaStatus};
use lifeos::store::{MemoryBackend, StoreError};
use lifeos::tracker;

fn memory_store() -> Store {
    Store::new(Box::new(MemoryBackend::new()))
}

fn date_offset(days_back: i64) -> String {
    (chrono::Local::now().date_naive() - chrono::Duration::days(days_back))
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn upsert_is_idempotent_and_lossless_for_untouched_fields() {
    let store = memory_store();
    let today = date_offset(0);

    let mut log = DailyLog::new(today.clone());
    log.newsletter_done = true;
    log.newsletter_time = 25;
    log.newsletter_note = "attention paper".to_string();
    log.gre_vocab_count = 30;

    store.upsert_daily_log(&log).expect("first upsert");
    store.upsert_daily_log(&log).expect("second upsert");

    let stored = store
        .daily_log(&today)
        .expect("read")
        .expect("row must exist");
    assert_eq!(stored, log);

    // Mutate a single field and replace the whole record
    log.gre_vocab_count = 40;
    store.upsert_daily_log(&log).expect("third upsert");

    let stored = store
        .daily_log(&today)
        .expect("read")
        .expect("row must exist");
    assert_eq!(stored.gre_vocab_count, 40);
    // Every untouched field survives the full-record replace
    assert!(stored.newsletter_done);
    assert_eq!(stored.newsletter_time, 25);
    assert_eq!(stored.newsletter_note, "attention paper");
}

#[test]
fn at_most_one_row_per_date() {
    let store = memory_store();
    let today = date_offset(0);

    let mut log = DailyLog::new(today.clone());
    log.gre_vocab_count = 10;
    store.upsert_daily_log(&log).expect("upsert");
    log.gre_vocab_count = 20;
    store.upsert_daily_log(&log).expect("upsert");

    let rows = store.logs_since(&today).expect("select");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].gre_vocab_count, 20);
}

#[test]
fn window_query_includes_exactly_the_trailing_days() {
    let store = memory_store();

    for days_back in [0, 1, 4] {
        let log = DailyLog::new(date_offset(days_back));
        store.upsert_daily_log(&log).expect("upsert");
    }

    // A 3-day lookback keeps today and today-1, excludes today-4
    let window: Vec<String> = store
        .logs_since(&date_offset(3))
        .expect("select")
        .into_iter()
        .map(|log| log.date)
        .collect();
    assert_eq!(window, vec![date_offset(0), date_offset(1)]);
}

#[test]
fn deleting_a_project_cascades_to_its_logs() {
    let store = memory_store();

    let project = tracker::create_project(&store, "ML Paper").expect("create");
    let id = project.id.clone().expect("assigned id");
    tracker::add_research_log(&store, &id, "read related work").expect("log");

    assert_eq!(store.project_logs(&id).expect("logs").len(), 1);

    tracker::delete_project(&store, &id).expect("delete");

    assert!(store.all_projects().expect("projects").is_empty());
    // Owner-scoped lookups find nothing after the cascade
    assert!(store.project_logs(&id).expect("logs").is_empty());
    assert!(store.latest_research_log(&id).expect("latest").is_none());
}

#[test]
fn latest_log_is_most_recent_by_creation() {
    let store = memory_store();

    let project = tracker::create_project(&store, "P").expect("create");
    let id = project.id.clone().expect("assigned id");
    tracker::add_research_log(&store, &id, "first").expect("log");
    tracker::add_research_log(&store, &id, "second").expect("log");

    let latest = store
        .latest_research_log(&id)
        .expect("latest")
        .expect("must exist");
    assert_eq!(latest.content, "second");
    assert_eq!(store.project_logs(&id).expect("logs").len(), 2);
}

#[test]
fn active_ideas_exclude_done() {
    let store = memory_store();

    let keep = tracker::create_idea(&store, "keep").expect("create");
    let finish = tracker::create_idea(&store, "finish").expect("create");
    tracker::set_idea_status(
        &store,
        finish.id.as_deref().expect("assigned id"),
        IdeaStatus::Done,
    )
    .expect("set status");

    let active = store.active_ideas().expect("active");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].title, keep.title);

    let done = store.done_ideas().expect("done");
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].title, "finish");
}

#[test]
fn update_of_missing_id_is_rejected() {
    let store = memory_store();
    let err = store
        .set_project_active("rec-999", false)
        .expect_err("must fail");
    match err {
        StoreError::Rejected { status, .. } => assert_eq!(status, 404),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn embedded_parent_title_is_joined_by_the_backend() {
    let store = memory_store();

    let project = tracker::create_project(&store, "Study Planner").expect("create");
    let id = project.id.clone().expect("assigned id");
    tracker::add_research_log(&store, &id, "sketched schema").expect("log");

    let joined = store
        .research_logs_since(&date_offset(0))
        .expect("select with embed");
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].project_title(), "Study Planner");
}
