//! Document header: title, subtitle, time and tags

use super::{speaker_note, LineCursor, ParseError};
use crate::document::Document;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const TAGS_PREFIX: &str = "Tags:";

/// `15:04 2 Jan 2006`
const DATE_TIME_FORMAT: &str = "%H:%M %d %b %Y";

/// `2 Jan 2006`
const DATE_FORMAT: &str = "%d %b %Y";

/// Hour assigned to date-only times; 11:00 UTC falls on the same calendar
/// date in every timezone
const DATE_ONLY_HOUR: u32 = 11;

/// Parse the header lines up to and including the terminating blank line
pub(super) fn parse_header(
    doc: &mut Document,
    lines: &mut LineCursor<'_>,
    name: &str,
) -> Result<(), ParseError> {
    let Some(title) = lines.next_non_empty() else {
        return Err(ParseError::MissingTitle {
            file: name.to_string(),
        });
    };
    doc.title = title.to_string();

    loop {
        let Some(text) = lines.next_line() else {
            return Err(ParseError::UnexpectedEof {
                file: name.to_string(),
                line: lines.line_number(),
                context: "header",
            });
        };
        if text.is_empty() {
            break;
        }
        if let Some(note) = speaker_note(text) {
            doc.title_notes.push(note.to_string());
            continue;
        }

        if let Some(tags) = text.strip_prefix(TAGS_PREFIX) {
            doc.tags.extend(
                tags.split(',')
                    .map(str::trim)
                    .map(str::to_string),
            );
        } else if let Some(time) = parse_time(text) {
            doc.time = Some(time);
        } else if doc.subtitle.is_none() {
            doc.subtitle = Some(text.to_string());
        } else {
            return Err(ParseError::UnexpectedHeaderLine {
                file: name.to_string(),
                line: lines.line_number(),
                text: text.to_string(),
            });
        }
    }
    Ok(())
}

/// Parse a header time in either accepted format
///
/// `"15:04 2 Jan 2006"` gives that exact time (UTC); `"2 Jan 2006"` gives
/// 11:00 UTC on that date.
pub fn parse_time(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT) {
        return Some(time.and_utc());
    }
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT).ok()?;
    Some(date.and_hms_opt(DATE_ONLY_HOUR, 0, 0)?.and_utc())
}
