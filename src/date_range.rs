//! Work-week date ranges
//!
//! A [`DateRange`] is the Monday to Friday span a weekly note covers, keyed by
//! the ISO 8601 year and week number of its Monday.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

use crate::error::{NoteError, Result};

/// Number of days in a work week
pub const WORK_DAYS: usize = 5;

/// Monday to Friday of one ISO week.
///
/// `start_year` and `start_week` are the ISO 8601 values of `days[0]`, which
/// can differ from the ISO week of `reference_date` near year boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start_year: i32,
    start_week: u32,
    reference_date: NaiveDateTime,
    days: [NaiveDate; WORK_DAYS],
}

impl DateRange {
    /// ISO year of the range's Monday
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// ISO week number of the range's Monday
    pub fn start_week(&self) -> u32 {
        self.start_week
    }

    /// The instant this range was computed from ("today" when viewing the current week)
    pub fn reference_date(&self) -> NaiveDateTime {
        self.reference_date
    }

    /// Monday through Friday, ascending
    pub fn days(&self) -> &[NaiveDate; WORK_DAYS] {
        &self.days
    }
}

/// Mon-Fri range for the week containing `reference_date`.
///
/// Saturday resolves to the days before it. Sunday resolves to the days
/// after it, so a note opened on Sunday is the one for the coming week.
pub fn work_week(reference_date: NaiveDateTime) -> DateRange {
    let date = reference_date.date();
    // Weekdays counted from Sunday = 0, so Monday - weekday is +1 on Sunday.
    let weekday = i64::from(date.weekday().num_days_from_sunday());
    let monday = date + Duration::days(1 - weekday);

    let mut days = [monday; WORK_DAYS];
    for (offset, day) in (0i64..).zip(days.iter_mut()) {
        *day = monday + Duration::days(offset);
    }

    let iso = days[0].iso_week();
    DateRange {
        start_year: iso.year(),
        start_week: iso.week(),
        reference_date,
        days,
    }
}

/// Mon-Fri range `week_offset` weeks away from now (local time).
/// The offset can be negative, zero, or positive.
pub fn relative_work_week(week_offset: i64) -> Result<DateRange> {
    relative_work_week_from(Local::now().naive_local(), week_offset)
}

/// Same as [`relative_work_week`] with an explicit "now".
///
/// Offsets that leave chrono's supported date range yield
/// [`NoteError::OffsetOutOfRange`].
pub fn relative_work_week_from(now: NaiveDateTime, week_offset: i64) -> Result<DateRange> {
    if week_offset == 0 {
        return Ok(work_week(now));
    }

    let shifted = Duration::try_weeks(week_offset)
        .and_then(|delta| now.checked_add_signed(delta))
        // work_week moves up to a week either way from the shifted date.
        .filter(|dt| {
            let week = Duration::days(7);
            dt.date().checked_add_signed(week).is_some()
                && dt.date().checked_sub_signed(week).is_some()
        })
        .ok_or(NoteError::OffsetOutOfRange(week_offset))?;
    Ok(work_week(shifted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn at_midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn formatted(range: &DateRange) -> Vec<String> {
        range
            .days()
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect()
    }

    // 木曜日: 同じ週の月曜〜金曜
    #[test]
    fn test_thursday_reference() {
        let range = work_week(at_midnight(2021, 4, 1));
        assert_eq!(
            formatted(&range),
            vec!["2021-03-29", "2021-03-30", "2021-03-31", "2021-04-01", "2021-04-02"]
        );
    }

    // 土曜日: 直前の月曜〜金曜
    #[test]
    fn test_saturday_reference_matches_thursday() {
        let saturday = work_week(at_midnight(2021, 4, 3));
        let thursday = work_week(at_midnight(2021, 4, 1));
        assert_eq!(saturday.days(), thursday.days());
        assert_eq!(saturday.start_week(), thursday.start_week());
    }

    // 日曜日: 翌週へ、月をまたぐ
    #[test]
    fn test_sunday_reference_rolls_into_next_month() {
        let range = work_week(at_midnight(2021, 2, 28));
        assert_eq!(
            formatted(&range),
            vec!["2021-03-01", "2021-03-02", "2021-03-03", "2021-03-04", "2021-03-05"]
        );
    }

    #[test]
    fn test_every_day_yields_consecutive_monday_to_friday() {
        let mut date = NaiveDate::from_ymd_opt(2019, 12, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 2, 1).unwrap();
        while date < end {
            let range = work_week(date.and_hms_opt(13, 45, 0).unwrap());
            let days = range.days();
            assert_eq!(days.len(), WORK_DAYS);
            assert_eq!(days[0].weekday(), Weekday::Mon, "reference {}", date);
            assert_eq!(days[4].weekday(), Weekday::Fri, "reference {}", date);
            for pair in days.windows(2) {
                assert_eq!(pair[0].succ_opt().unwrap(), pair[1]);
            }
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_week_spanning_year_boundary() {
        // Thursday 2020-12-31 belongs to ISO week 53 of 2020.
        let range = work_week(at_midnight(2020, 12, 31));
        assert_eq!(
            formatted(&range),
            vec!["2020-12-28", "2020-12-29", "2020-12-30", "2020-12-31", "2021-01-01"]
        );
        assert_eq!(range.start_year(), 2020);
        assert_eq!(range.start_week(), 53);
    }

    #[test]
    fn test_iso_week_comes_from_monday_not_reference() {
        // Sunday 2024-12-29 is in ISO 2024-W52, but its range starts on
        // Monday 2024-12-30, which is ISO 2025-W01.
        let reference = at_midnight(2024, 12, 29);
        assert_eq!(reference.date().iso_week().week(), 52);

        let range = work_week(reference);
        assert_eq!(range.days()[0], NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
        assert_eq!(range.start_year(), 2025);
        assert_eq!(range.start_week(), 1);
    }

    #[test]
    fn test_reference_date_is_kept() {
        let reference = NaiveDate::from_ymd_opt(2021, 4, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(work_week(reference).reference_date(), reference);
    }

    #[test]
    fn test_relative_offsets() {
        let now = at_midnight(2021, 4, 1);

        let current = relative_work_week_from(now, 0).unwrap();
        assert_eq!(current, work_week(now));

        let previous = relative_work_week_from(now, -1).unwrap();
        assert_eq!(previous.days()[0], NaiveDate::from_ymd_opt(2021, 3, 22).unwrap());
        assert_eq!(previous.start_week(), current.start_week() - 1);

        let next = relative_work_week_from(now, 2).unwrap();
        assert_eq!(next.days()[0], NaiveDate::from_ymd_opt(2021, 4, 12).unwrap());
        assert_eq!(next.start_week(), current.start_week() + 2);
    }

    #[test]
    fn test_relative_offset_across_year() {
        let now = at_midnight(2021, 1, 6);
        let previous = relative_work_week_from(now, -1).unwrap();
        assert_eq!(previous.start_year(), 2020);
        assert_eq!(previous.start_week(), 53);
    }

    #[test]
    fn test_huge_offsets_are_errors() {
        let now = at_midnight(2021, 4, 1);
        for offset in [999_999_999_999, -999_999_999_999, i64::MAX, i64::MIN] {
            let err = relative_work_week_from(now, offset).unwrap_err();
            assert!(
                matches!(err, NoteError::OffsetOutOfRange(o) if o == offset),
                "{err:?}"
            );
        }
    }

    #[test]
    fn test_offset_near_calendar_limit() {
        // The last representable week has no room for its Friday.
        let now = NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap() - Duration::weeks(1);
        assert!(relative_work_week_from(now, 1).is_err());
        assert!(relative_work_week_from(now, -1).is_ok());
    }
}
