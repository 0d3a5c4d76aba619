use crate::models::DailyLog;
use crate::store::{Store, StoreError};
use crate::utils;

/// The three information-diet channels tracked on the daily log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietChannel {
    Newsletter,
    Video,
    Wechat,
}

impl DietChannel {
    /// Minutes added or removed per adjustment
    pub const STEP_MINUTES: u32 = 5;

    pub fn label(&self) -> &'static str {
        match self {
            DietChannel::Newsletter => "Newsletter",
            DietChannel::Video => "Video / Podcast",
            DietChannel::Wechat => "WeChat / Other",
        }
    }
}

/// The six practice counters tracked on the daily log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeCounter {
    Vocabulary,
    VerbalSets,
    ReadingPassages,
    CodingEasy,
    CodingMedium,
    CodingHard,
}

impl PracticeCounter {
    pub fn step(&self) -> u32 {
        match self {
            PracticeCounter::Vocabulary => 10,
            _ => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PracticeCounter::Vocabulary => "Vocabulary",
            PracticeCounter::VerbalSets => "Verbal Sets",
            PracticeCounter::ReadingPassages => "Reading Passages",
            PracticeCounter::CodingEasy => "LeetCode Easy",
            PracticeCounter::CodingMedium => "LeetCode Medium",
            PracticeCounter::CodingHard => "LeetCode Hard",
        }
    }
}

/// Session-local mirror of today's daily log. Seeded once per session from
/// the persisted row (or defaults when none exists); every mutation writes
/// through by upserting the entire record, so the stored row never trails
/// the mirror by more than one write.
///
/// Constructed once and passed into handlers; never a process-wide global.
pub struct SessionState {
    log: DailyLog,
}

impl SessionState {
    /// Fetch today's row and populate every field from it, or start from
    /// zero/false/empty defaults when no row exists yet
    pub fn init(store: &Store) -> Result<Self, StoreError> {
        let today = utils::today_string();
        let log = match store.daily_log(&today)? {
            Some(mut existing) => {
                existing.date = today;
                existing
            }
            None => DailyLog::new(today),
        };
        Ok(Self { log })
    }

    pub fn log(&self) -> &DailyLog {
        &self.log
    }

    pub fn done(&self, channel: DietChannel) -> bool {
        match channel {
            DietChannel::Newsletter => self.log.newsletter_done,
            DietChannel::Video => self.log.video_done,
            DietChannel::Wechat => self.log.wechat_done,
        }
    }

    pub fn minutes(&self, channel: DietChannel) -> u32 {
        match channel {
            DietChannel::Newsletter => self.log.newsletter_time,
            DietChannel::Video => self.log.video_time,
            DietChannel::Wechat => self.log.wechat_time,
        }
    }

    pub fn note(&self, channel: DietChannel) -> &str {
        match channel {
            DietChannel::Newsletter => &self.log.newsletter_note,
            DietChannel::Video => &self.log.video_note,
            DietChannel::Wechat => &self.log.wechat_note,
        }
    }

    pub fn count(&self, counter: PracticeCounter) -> u32 {
        match counter {
            PracticeCounter::Vocabulary => self.log.gre_vocab_count,
            PracticeCounter::VerbalSets => self.log.gre_verbal_count,
            PracticeCounter::ReadingPassages => self.log.gre_reading_count,
            PracticeCounter::CodingEasy => self.log.lc_easy_count,
            PracticeCounter::CodingMedium => self.log.lc_medium_count,
            PracticeCounter::CodingHard => self.log.lc_hard_count,
        }
    }

    pub fn set_done(
        &mut self,
        store: &Store,
        channel: DietChannel,
        done: bool,
    ) -> Result<(), StoreError> {
        self.commit(store, |log| match channel {
            DietChannel::Newsletter => log.newsletter_done = done,
            DietChannel::Video => log.video_done = done,
            DietChannel::Wechat => log.wechat_done = done,
        })
    }

    /// Adjust channel minutes by a signed delta, clamped at zero
    pub fn adjust_minutes(
        &mut self,
        store: &Store,
        channel: DietChannel,
        delta: i32,
    ) -> Result<(), StoreError> {
        self.commit(store, |log| {
            let field = match channel {
                DietChannel::Newsletter => &mut log.newsletter_time,
                DietChannel::Video => &mut log.video_time,
                DietChannel::Wechat => &mut log.wechat_time,
            };
            *field = clamped(*field, delta);
        })
    }

    pub fn set_note(
        &mut self,
        store: &Store,
        channel: DietChannel,
        note: String,
    ) -> Result<(), StoreError> {
        self.commit(store, |log| match channel {
            DietChannel::Newsletter => log.newsletter_note = note,
            DietChannel::Video => log.video_note = note,
            DietChannel::Wechat => log.wechat_note = note,
        })
    }

    /// Adjust a practice counter by a signed delta, clamped at zero
    pub fn adjust_count(
        &mut self,
        store: &Store,
        counter: PracticeCounter,
        delta: i32,
    ) -> Result<(), StoreError> {
        self.commit(store, |log| {
            let field = match counter {
                PracticeCounter::Vocabulary => &mut log.gre_vocab_count,
                PracticeCounter::VerbalSets => &mut log.gre_verbal_count,
                PracticeCounter::ReadingPassages => &mut log.gre_reading_count,
                PracticeCounter::CodingEasy => &mut log.lc_easy_count,
                PracticeCounter::CodingMedium => &mut log.lc_medium_count,
                PracticeCounter::CodingHard => &mut log.lc_hard_count,
            };
            *field = clamped(*field, delta);
        })
    }

    /// Set the shared coding-practice note
    pub fn set_coding_note(&mut self, store: &Store, note: String) -> Result<(), StoreError> {
        self.commit(store, |log| log.lc_notes = note)
    }

    /// Apply a mutation, stamp today's date, and persist the entire record
    /// via upsert keyed on date. A full-record replace, not a partial
    /// update; concurrent sessions on the same date are last-writer-wins.
    /// On a store failure the mutation is rolled back so the mirror still
    /// matches the last persisted row.
    fn commit(
        &mut self,
        store: &Store,
        mutate: impl FnOnce(&mut DailyLog),
    ) -> Result<(), StoreError> {
        let previous = self.log.clone();
        mutate(&mut self.log);
        self.log.date = utils::today_string();
        if let Err(err) = store.upsert_daily_log(&self.log) {
            self.log = previous;
            return Err(err);
        }
        Ok(())
    }
}

fn clamped(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta as u32)
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::clamped;

    #[test]
    fn clamping_never_goes_negative() {
        assert_eq!(clamped(0, -5), 0);
        assert_eq!(clamped(3, -5), 0);
        assert_eq!(clamped(10, -5), 5);
        assert_eq!(clamped(0, 10), 10);
        assert_eq!(clamped(u32::MAX, 1), u32::MAX);
    }
}
