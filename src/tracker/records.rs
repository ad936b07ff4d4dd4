use std::{collections::BTreeSet, sync::Arc};

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::utils::time::{format_duration, format_time_of_day};

/// Amount of note characters shown in the records table before the text is cut.
pub const NOTES_PREVIEW_LEN: usize = 20;

/// One completed timed interval. Records are never edited after they are created, only deleted.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SessionRecord {
    pub project: Arc<str>,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub notes: String,
}

impl SessionRecord {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn row(&self) -> RecordRow<'_> {
        RecordRow {
            project: &self.project,
            start_time: format_time_of_day(self.start),
            end_time: format_time_of_day(self.end),
            duration: format_duration(self.duration()),
            notes: &self.notes,
        }
    }

    /// Notes squeezed into a single line and cut to [NOTES_PREVIEW_LEN] characters.
    pub fn notes_preview(&self) -> String {
        let flat = single_line(&self.notes);
        if flat.chars().count() >= NOTES_PREVIEW_LEN {
            let mut cut = flat.chars().take(NOTES_PREVIEW_LEN).collect::<String>();
            cut.push_str("...");
            cut
        } else {
            flat
        }
    }
}

/// Textual form of a record. Field order here is the column order used by exports and the
/// clipboard.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RecordRow<'a> {
    pub project: &'a str,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub notes: &'a str,
}

pub fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r', '\t'], " ")
}

/// In-memory list of completed sessions. Lost on exit unless exported.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<SessionRecord>,
}

impl RecordStore {
    pub fn push(&mut self, record: SessionRecord) -> &SessionRecord {
        let index = self.records.len();
        self.records.push(record);
        &self.records[index]
    }

    /// Removes records at the given positions. Unknown positions are ignored. Returns amount of
    /// removed records.
    pub fn delete(&mut self, indices: &BTreeSet<usize>) -> usize {
        let before = self.records.len();
        let mut position = 0;
        self.records.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
        before - self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SessionRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[SessionRecord] {
        &self.records
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeSet;

    use chrono::{Duration, Local, TimeZone};

    use super::{RecordStore, SessionRecord};

    pub(crate) fn record(project: &str, start_secs: i64, length_secs: i64, notes: &str) -> SessionRecord {
        let start = Local.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
            + Duration::seconds(start_secs);
        SessionRecord {
            project: project.into(),
            start,
            end: start + Duration::seconds(length_secs),
            notes: notes.into(),
        }
    }

    #[test]
    fn row_is_formatted() {
        let record = record("Project_1", 65, 3 * 3600 + 4, "wrote tests");
        let row = record.row();
        assert_eq!(row.project, "Project_1");
        assert_eq!(row.start_time, "09:01:05");
        assert_eq!(row.end_time, "12:01:09");
        assert_eq!(row.duration, "03:00:04");
        assert_eq!(row.notes, "wrote tests");
    }

    #[test]
    fn long_notes_are_shortened() {
        let short = record("a", 0, 1, "line one\nline two");
        assert_eq!(short.notes_preview(), "line one line two");

        let long = record("a", 0, 1, "exactly twenty chars");
        assert_eq!(long.notes_preview(), "exactly twenty chars...");

        let longer = record("a", 0, 1, "refactoring\nthe whole timer module");
        assert_eq!(longer.notes_preview(), "refactoring the whol...");
    }

    #[test]
    fn delete_removes_selected_positions() {
        let mut store = RecordStore::default();
        for i in 0..5 {
            store.push(record(&format!("p{i}"), i * 10, 5, ""));
        }

        let removed = store.delete(&BTreeSet::from([0, 2, 10]));

        assert_eq!(removed, 2);
        let left = store.iter().map(|v| v.project.to_string()).collect::<Vec<_>>();
        assert_eq!(left, vec!["p1", "p3", "p4"]);
    }
}
