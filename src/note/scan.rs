//! Line scanners over note contents
//!
//! Both scanners walk a note line by line in one of two phases: searching for
//! a marker line, then acting on the lines that follow it.

use std::io::{self, BufRead};

use super::template::TODO_MARKER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Searching,
    Capturing,
}

/// Lines following the first `TODO:` line, verbatim (blank lines included).
///
/// Returns an empty list when the marker never appears.
pub fn todo_carry_over<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut phase = Phase::Searching;
    let mut carried = Vec::new();

    for line in reader.lines() {
        let line = line?;
        match phase {
            Phase::Searching => {
                if line == TODO_MARKER {
                    phase = Phase::Capturing;
                }
            }
            Phase::Capturing => carried.push(line),
        }
    }

    Ok(carried)
}

/// 1-based line where the cursor should land for the section headed by `heading`.
///
/// Inside the section, the first blank line wins; a following heading puts
/// the cursor on the line before it. Otherwise the cursor lands on the last
/// line read, which is 0 for an empty input.
pub fn cursor_line<R: BufRead>(reader: R, heading: &str) -> io::Result<usize> {
    let mut phase = Phase::Searching;
    let mut line_no = 0;

    for line in reader.lines() {
        let line = line?;
        line_no += 1;
        match phase {
            Phase::Searching => {
                if line.starts_with(heading) {
                    phase = Phase::Capturing;
                }
            }
            Phase::Capturing => {
                if line.is_empty() {
                    return Ok(line_no);
                }
                if line.starts_with('#') {
                    return Ok(line_no - 1);
                }
            }
        }
    }

    Ok(line_no)
}
