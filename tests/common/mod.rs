//! Common test utilities for integration tests

use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use weeknote::{Note, relative_work_week_from};

/// Local wall-clock time on the given day
pub fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Note for the week of `now` (and its predecessor) under a fresh temp dir
pub fn note_at(now: NaiveDateTime) -> (Note, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let note = note_in(temp_dir.path(), now);
    (note, temp_dir)
}

pub fn note_in(dir: &Path, now: NaiveDateTime) -> Note {
    Note::new(
        dir,
        relative_work_week_from(now, 0).unwrap(),
        relative_work_week_from(now, -1).unwrap(),
    )
}

/// Write `content` to `path`, creating parent directories
pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Section of a note from the `TODO:` line to the end
pub fn todo_section(content: &str) -> &str {
    let start = content.rfind("\nTODO:\n").map(|i| i + 1).unwrap();
    &content[start..]
}
