//! Author block between the header and the first section

use super::{speaker_note, LineCursor, ParseError};
use crate::document::{Author, Element, Link, Text};
use url::Url;

/// Profile URL that `@handle` lines are resolved against
pub const SOCIAL_PROFILE_BASE: &str = "http://twitter.com/";

/// Marker that ends the author block
const TOP_LEVEL_HEADING: &str = "* ";

/// Parse author paragraphs up to the first top-level heading
///
/// Each run of non-blank lines is one author. Speaker notes found here
/// belong to the title slide and are appended to `title_notes`.
pub(super) fn parse_authors(
    lines: &mut LineCursor<'_>,
    name: &str,
    title_notes: &mut Vec<String>,
) -> Result<Vec<Author>, ParseError> {
    if lines.next_non_empty().is_none() {
        return Err(unexpected_eof(name, lines));
    }
    lines.back();

    let mut authors = Vec::new();
    let mut current: Option<Author> = None;
    loop {
        let Some(text) = lines.next_line() else {
            return Err(unexpected_eof(name, lines));
        };
        if text.starts_with(TOP_LEVEL_HEADING) {
            lines.back();
            break;
        }
        if let Some(note) = speaker_note(text) {
            title_notes.push(note.to_string());
            continue;
        }
        if text.is_empty() {
            authors.extend(current.take());
            continue;
        }

        let element = classify_line(text, name, lines.line_number());
        current.get_or_insert_with(Author::default).elements.push(element);
    }
    authors.extend(current);

    log::debug!("{}: {} author(s)", name, authors.len());
    Ok(authors)
}

/// Collect speaker notes up to the first top-level heading, skipping authors
pub(super) fn collect_notes(lines: &mut LineCursor<'_>, title_notes: &mut Vec<String>) {
    while let Some(text) = lines.next_line() {
        if text.starts_with(TOP_LEVEL_HEADING) {
            lines.back();
            break;
        }
        title_notes.extend(speaker_note(text).map(str::to_string));
    }
}

fn unexpected_eof(name: &str, lines: &LineCursor<'_>) -> ParseError {
    ParseError::UnexpectedEof {
        file: name.to_string(),
        line: lines.line_number(),
        context: "authors",
    }
}

/// Turn one author line into a link or plain text
///
/// Rules apply in order: `@handle` is a social profile, anything with a
/// `:` is a URL, anything else with an `@` is an email address. Lines that
/// fail to parse as URLs fall back to text.
fn classify_line(text: &str, name: &str, line: usize) -> Element {
    let target = if let Some(handle) = text.strip_prefix('@') {
        Some(format!("{}{}", SOCIAL_PROFILE_BASE, handle))
    } else if text.contains(':') {
        Some(text.to_string())
    } else if text.contains('@') {
        Some(format!("mailto:{}", text))
    } else {
        None
    };

    let url = target.and_then(|target| match Url::parse(&target) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("{}:{}: malformed URL {:?}: {}", name, line, target, e);
            None
        }
    });

    match url {
        Some(url) => Element::Link(Link::new(url, Some(text.to_string()))),
        None => Element::Text(Text::plain(vec![text.to_string()])),
    }
}
