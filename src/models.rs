use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// The single per-calendar-date record aggregating all habit-tracking fields.
/// `date` is the natural key; the store holds at most one row per date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: String, // ISO 8601: YYYY-MM-DD
    #[serde(default, deserialize_with = "null_to_false")]
    pub newsletter_done: bool,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub newsletter_time: u32,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub newsletter_note: String,
    #[serde(default, deserialize_with = "null_to_false")]
    pub video_done: bool,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub video_time: u32,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub video_note: String,
    #[serde(default, deserialize_with = "null_to_false")]
    pub wechat_done: bool,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub wechat_time: u32,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub wechat_note: String,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub gre_vocab_count: u32,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub gre_verbal_count: u32,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub gre_reading_count: u32,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub lc_easy_count: u32,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub lc_medium_count: u32,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub lc_hard_count: u32,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub lc_notes: String,
}

impl DailyLog {
    pub fn new(date: String) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    /// Total information-diet minutes across the three channels
    pub fn info_minutes(&self) -> u32 {
        self.newsletter_time + self.video_time + self.wechat_time
    }

    /// Total coding problems across the three difficulties
    pub fn lc_total(&self) -> u32 {
        self.lc_easy_count + self.lc_medium_count + self.lc_hard_count
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ResearchProject {
    pub fn new(title: String) -> Self {
        Self {
            id: None,
            title,
            is_active: true,
            created_at: None,
        }
    }
}

/// Append-only note against a research project. Never edited or removed
/// individually; removed only by cascade when the owning project is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub project_id: String,
    pub date: String, // YYYY-MM-DD
    #[serde(default, deserialize_with = "null_to_zero")]
    pub duration_minutes: u32,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ResearchLog {
    pub fn new(project_id: String, date: String, content: String) -> Self {
        Self {
            id: None,
            project_id,
            date,
            // Column carried for schema compatibility, always written as zero
            duration_minutes: 0,
            content,
            created_at: None,
        }
    }
}

/// Idea lifecycle status. Any status may move to any other; there is no
/// transition graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdeaStatus {
    #[default]
    Seed,
    Planning,
    Building,
    Shelved,
    Done,
}

impl IdeaStatus {
    pub const ALL: [IdeaStatus; 5] = [
        IdeaStatus::Seed,
        IdeaStatus::Planning,
        IdeaStatus::Building,
        IdeaStatus::Shelved,
        IdeaStatus::Done,
    ];

    /// Fold a stored status value to its canonical form. Rows written by
    /// earlier versions of the tracker carry "Idea" and "In Progress";
    /// those map to Seed and Building. The stored value is never rewritten
    /// here, only the in-memory view.
    pub fn normalize(raw: &str) -> IdeaStatus {
        match raw {
            "Seed" | "Idea" => IdeaStatus::Seed,
            "Planning" => IdeaStatus::Planning,
            "Building" | "In Progress" => IdeaStatus::Building,
            "Shelved" => IdeaStatus::Shelved,
            "Done" => IdeaStatus::Done,
            _ => IdeaStatus::Seed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdeaStatus::Seed => "Seed",
            IdeaStatus::Planning => "Planning",
            IdeaStatus::Building => "Building",
            IdeaStatus::Shelved => "Shelved",
            IdeaStatus::Done => "Done",
        }
    }

    /// The next status in display order, wrapping around
    pub fn next(&self) -> IdeaStatus {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl Serialize for IdeaStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IdeaStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .map(|s| IdeaStatus::normalize(&s))
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Idea {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub status: IdeaStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Idea {
    pub fn new(title: String) -> Self {
        Self {
            id: None,
            title,
            status: IdeaStatus::Seed,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Append-only note against an idea, most-recent-first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub idea_id: String,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl IdeaUpdate {
    pub fn new(idea_id: String, content: String) -> Self {
        Self {
            id: None,
            idea_id,
            content,
            created_at: None,
        }
    }

    /// The date portion of the creation timestamp
    pub fn created_date(&self) -> &str {
        let ts = self.created_at.as_deref().unwrap_or("");
        if ts.len() >= 10 { &ts[..10] } else { ts }
    }
}

/// Embedded parent row carrying only the title, as returned by the store's
/// parent-title joins
#[derive(Debug, Clone, Deserialize)]
pub struct ParentRef {
    pub title: String,
}

/// Research log row with its owning project's title embedded
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchLogWithProject {
    #[serde(flatten)]
    pub log: ResearchLog,
    #[serde(default)]
    pub research_projects: Option<ParentRef>,
}

impl ResearchLogWithProject {
    pub fn project_title(&self) -> &str {
        self.research_projects
            .as_ref()
            .map(|p| p.title.as_str())
            .unwrap_or("Unknown")
    }
}

/// Idea update row with its owning idea's title embedded
#[derive(Debug, Clone, Deserialize)]
pub struct IdeaUpdateWithIdea {
    #[serde(flatten)]
    pub update: IdeaUpdate,
    #[serde(default)]
    pub ideas: Option<ParentRef>,
}

impl IdeaUpdateWithIdea {
    pub fn idea_title(&self) -> &str {
        self.ideas
            .as_ref()
            .map(|i| i.title.as_str())
            .unwrap_or("Unknown")
    }
}

fn default_true() -> bool {
    true
}

fn null_to_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_to_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_to_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_normalization_folds_legacy_values() {
        assert_eq!(IdeaStatus::normalize("Idea"), IdeaStatus::Seed);
        assert_eq!(IdeaStatus::normalize("In Progress"), IdeaStatus::Building);
        assert_eq!(IdeaStatus::normalize("Planning"), IdeaStatus::Planning);
        assert_eq!(IdeaStatus::normalize("Done"), IdeaStatus::Done);
        // Unrecognized values fall back to Seed rather than erroring
        assert_eq!(IdeaStatus::normalize("???"), IdeaStatus::Seed);
    }

    #[test]
    fn daily_log_tolerates_null_columns() {
        let row = serde_json::json!({
            "date": "2026-08-07",
            "newsletter_done": null,
            "newsletter_time": null,
            "newsletter_note": null,
            "gre_vocab_count": 40
        });
        let log: DailyLog = serde_json::from_value(row).expect("deserialize");
        assert!(!log.newsletter_done);
        assert_eq!(log.newsletter_time, 0);
        assert_eq!(log.newsletter_note, "");
        assert_eq!(log.gre_vocab_count, 40);
        assert_eq!(log.lc_total(), 0);
    }

    #[test]
    fn idea_status_round_trips_canonically() {
        let idea: Idea =
            serde_json::from_value(serde_json::json!({"title": "t", "status": "In Progress"}))
                .expect("deserialize");
        assert_eq!(idea.status, IdeaStatus::Building);
        let value = serde_json::to_value(&idea).expect("serialize");
        assert_eq!(value["status"], "Building");
    }
}
