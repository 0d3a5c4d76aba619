use crate::models::DailyLog;
use crate::store::{Store, StoreError};
use crate::utils;

/// Preview length for today's activity lines
pub const PREVIEW_LEN: usize = 80;
/// Preview length for the research timeline
pub const TIMELINE_PREVIEW_LEN: usize = 150;
/// Trailing window, in days back from today inclusive
pub const WINDOW_DAYS: i64 = 3;

/// One line of today's research or idea activity, joined with the parent
/// title and truncated for display
#[derive(Debug, Clone)]
pub struct ActivityLine {
    pub title: String,
    pub preview: String,
}

/// Derived view of today's log plus today's project/idea activity.
/// Recomputed from the store on every request; nothing is cached.
#[derive(Debug, Clone)]
pub struct TodaySnapshot {
    pub log: Option<DailyLog>,
    pub research: Vec<ActivityLine>,
    pub ideas: Vec<ActivityLine>,
}

pub fn today_snapshot(store: &Store) -> Result<TodaySnapshot, StoreError> {
    let today = utils::today_string();
    let log = store.daily_log(&today)?;

    let research = store
        .research_logs_on(&today)?
        .iter()
        .map(|entry| ActivityLine {
            title: entry.project_title().to_string(),
            preview: truncate_preview(&entry.log.content, PREVIEW_LEN),
        })
        .collect();

    let ideas = store
        .idea_updates_since(&today)?
        .iter()
        .map(|entry| ActivityLine {
            title: entry.idea_title().to_string(),
            preview: truncate_preview(&entry.update.content, PREVIEW_LEN),
        })
        .collect();

    Ok(TodaySnapshot { log, research, ideas })
}

/// Per-date information-diet minutes
#[derive(Debug, Clone, PartialEq)]
pub struct TimePoint {
    pub date: String,
    pub newsletter: u64,
    pub video: u64,
    pub wechat: u64,
}

/// Per-date vocabulary count
#[derive(Debug, Clone, PartialEq)]
pub struct VocabPoint {
    pub date: String,
    pub words: u64,
}

#[derive(Debug, Clone)]
pub struct TimelineEntry {
    pub date: String,
    pub title: String,
    pub preview: String,
}

/// Rolling-window rollup for the summary charts, oldest date first
#[derive(Debug, Clone)]
pub struct WindowReport {
    pub time: Vec<TimePoint>,
    pub vocab: Vec<VocabPoint>,
    pub research: Vec<TimelineEntry>,
}

impl WindowReport {
    /// Whether any daily-log rows fell inside the window; when false the
    /// presentation reports "no data" instead of an empty chart
    pub fn has_log_data(&self) -> bool {
        !self.time.is_empty()
    }
}

pub fn window_report(store: &Store) -> Result<WindowReport, StoreError> {
    let start = (utils::today() - chrono::Duration::days(WINDOW_DAYS))
        .format("%Y-%m-%d")
        .to_string();

    let mut logs = store.logs_since(&start)?;
    logs.sort_by(|a, b| a.date.cmp(&b.date));

    let time = logs
        .iter()
        .map(|log| TimePoint {
            date: log.date.clone(),
            newsletter: log.newsletter_time as u64,
            video: log.video_time as u64,
            wechat: log.wechat_time as u64,
        })
        .collect();

    let vocab = logs
        .iter()
        .map(|log| VocabPoint {
            date: log.date.clone(),
            words: log.gre_vocab_count as u64,
        })
        .collect();

    let research = store
        .research_logs_since(&start)?
        .iter()
        .map(|entry| TimelineEntry {
            date: entry.log.date.clone(),
            title: entry.project_title().to_string(),
            preview: truncate_preview(&entry.log.content, TIMELINE_PREVIEW_LEN),
        })
        .collect();

    Ok(WindowReport { time, vocab, research })
}

/// Truncate to a character prefix, appending an ellipsis when content was
/// dropped. Counts chars, not bytes, so multibyte content stays intact.
pub fn truncate_preview(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let mut preview: String = content.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_preview("short", 10), "short");
        assert_eq!(truncate_preview("abcdef", 3), "abc...");
        // Multibyte content must not be split mid-character
        assert_eq!(truncate_preview("实现了注意力机制", 4), "实现了注...");
    }

    #[test]
    fn empty_window_reports_no_data() {
        let report = WindowReport {
            time: Vec::new(),
            vocab: Vec::new(),
            research: Vec::new(),
        };
        assert!(!report.has_log_data());
    }
}
