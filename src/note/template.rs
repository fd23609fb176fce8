//! Note template rendering
//!
//! The template is a fixed Markdown layout: a week title, one `##` heading per
//! work day, and a trailing `TODO:` section that receives carried-over lines.

use chrono::NaiveDate;

use crate::date_range::DateRange;

/// Line that opens the TODO section
pub const TODO_MARKER: &str = "TODO:";

const SEPARATOR: &str = "---";

/// Day heading, e.g. `## Monday, 02-January-2006`
pub fn heading(date: NaiveDate) -> String {
    date.format("## %A, %d-%B-%Y").to_string()
}

/// Week title, e.g. `# Week 05, 2024`
pub fn title(range: &DateRange) -> String {
    format!("# Week {:02}, {}", range.start_week(), range.start_year())
}

/// Full template body for `range`, with `carry_over` appended after `TODO:`
pub fn render(range: &DateRange, carry_over: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&title(range));
    out.push_str("\n\n");
    out.push_str(SEPARATOR);
    out.push_str("\n\n");

    for day in range.days() {
        out.push_str(&heading(*day));
        out.push_str("\n\n");
    }

    out.push_str(SEPARATOR);
    out.push_str("\n\n");
    out.push_str(TODO_MARKER);
    out.push('\n');
    for line in carry_over {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::work_week;

    fn range() -> DateRange {
        work_week(
            NaiveDate::from_ymd_opt(2021, 4, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_heading_long_form() {
        let date = NaiveDate::from_ymd_opt(2006, 1, 2).unwrap();
        assert_eq!(heading(date), "## Monday, 02-January-2006");
    }

    #[test]
    fn test_title_pads_week() {
        let range = work_week(
            NaiveDate::from_ymd_opt(2024, 1, 3)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        );
        assert_eq!(title(&range), "# Week 01, 2024");
    }

    #[test]
    fn test_render_without_carry_over() {
        let expected = "\
# Week 13, 2021

---

## Monday, 29-March-2021

## Tuesday, 30-March-2021

## Wednesday, 31-March-2021

## Thursday, 01-April-2021

## Friday, 02-April-2021

---

TODO:
";
        assert_eq!(render(&range(), &[]), expected);
    }

    #[test]
    fn test_render_appends_carry_over_verbatim() {
        let carry = vec!["- buy milk".to_string(), String::new(), "- call Bob".to_string()];
        let body = render(&range(), &carry);
        assert!(body.ends_with("TODO:\n- buy milk\n\n- call Bob\n"));
    }
}
