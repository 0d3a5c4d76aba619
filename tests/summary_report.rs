#![forbid(unsafe_code)]

use lifeos::Store;
use lifeos::models::DailyLog;
use lifeos::store::MemoryBackend;
use lifeos::summary;
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
fn snapshot_sums_info_minutes_and_passes_counters_through() {
    let store = memory_store();

    let mut log = DailyLog::new(date_offset(0));
    log.newsletter_time = 10;
    log.video_time = 15;
    log.wechat_time = 5;
    log.gre_vocab_count = 30;
    log.gre_verbal_count = 2;
    store.upsert_daily_log(&log).expect("upsert");

    let snapshot = summary::today_snapshot(&store).expect("snapshot");
    let today = snapshot.log.expect("row must exist");
    assert_eq!(today.info_minutes(), 30);
    assert_eq!(today.gre_vocab_count, 30);
    assert_eq!(today.gre_verbal_count, 2);
}

#[test]
fn snapshot_joins_todays_activity_with_parent_titles() {
    let store = memory_store();

    let project = tracker::create_project(&store, "Compiler").expect("create");
    let long_note = "x".repeat(120);
    tracker::add_research_log(
        &store,
        project.id.as_deref().expect("assigned id"),
        &long_note,
    )
    .expect("log");

    let idea = tracker::create_idea(&store, "Planner").expect("create");
    tracker::add_idea_update(
        &store,
        idea.id.as_deref().expect("assigned id"),
        "first sketch",
    )
    .expect("update");

    let snapshot = summary::today_snapshot(&store).expect("snapshot");

    assert_eq!(snapshot.research.len(), 1);
    assert_eq!(snapshot.research[0].title, "Compiler");
    // Long content is truncated to the preview length
    assert_eq!(
        snapshot.research[0].preview.chars().count(),
        summary::PREVIEW_LEN + 3
    );
    assert!(snapshot.research[0].preview.ends_with("..."));

    assert_eq!(snapshot.ideas.len(), 1);
    assert_eq!(snapshot.ideas[0].title, "Planner");
    assert_eq!(snapshot.ideas[0].preview, "first sketch");
}

#[test]
fn window_report_covers_the_trailing_days_oldest_first() {
    let store = memory_store();

    for (days_back, vocab) in [(0i64, 30u32), (1, 20), (4, 99)] {
        let mut log = DailyLog::new(date_offset(days_back));
        log.gre_vocab_count = vocab;
        log.newsletter_time = 5;
        store.upsert_daily_log(&log).expect("upsert");
    }

    let report = summary::window_report(&store).expect("report");
    assert!(report.has_log_data());

    let dates: Vec<&str> = report.time.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec![date_offset(1), date_offset(0)]);

    let words: Vec<u64> = report.vocab.iter().map(|p| p.words).collect();
    assert_eq!(words, vec![20, 30]);
}

#[test]
fn empty_window_has_no_log_data() {
    let store = memory_store();
    let report = summary::window_report(&store).expect("report");
    assert!(!report.has_log_data());
    assert!(report.research.is_empty());
}
