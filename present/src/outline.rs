//! Outline and markup writers
//!
//! Re-serializes a parsed document's structure:
//! - `to_outline`: numbered headings, indented by depth
//! - `to_markup`: header and `*` headings that parse back to the same tree shape

use crate::document::{Document, Element, Section};
use itertools::Itertools;

/// Indentation per nesting level in outlines
const OUTLINE_INDENT: &str = "  ";

/// Format the section tree as a numbered outline
///
/// ```text
/// 1 Introduction
///   1.1 Background
/// 2 Goroutines
/// ```
pub fn to_outline(doc: &Document) -> String {
    let mut output = String::new();
    output.push_str(&doc.title);
    output.push('\n');

    for section in doc.sections_depth_first() {
        output.push_str(&OUTLINE_INDENT.repeat(section.depth().saturating_sub(1)));
        output.push_str(&format!("{} {}\n", section.number, section.title));
    }
    output
}

/// Write the document header, authors and section headings back as markup
///
/// Element content other than sub-sections is not written. Only a fully
/// parsed document round-trips: a header-only document has no author block
/// and its markup does not parse again.
pub fn to_markup(doc: &Document) -> String {
    let mut output = String::new();

    write_header(&mut output, doc);
    output.push('\n');

    for author in &doc.authors {
        for element in &author.elements {
            match element {
                Element::Text(text) => {
                    output.push_str(&text.lines.join("\n"));
                    output.push('\n');
                }
                Element::Link(link) => {
                    output.push_str(link.display_text());
                    output.push('\n');
                }
                _ => {}
            }
        }
        output.push('\n');
    }

    for section in &doc.sections {
        write_section(&mut output, section);
    }
    output
}

fn write_header(output: &mut String, doc: &Document) {
    output.push_str(&doc.title);
    output.push('\n');
    if let Some(subtitle) = &doc.subtitle {
        output.push_str(subtitle);
        output.push('\n');
    }
    if let Some(time) = &doc.time {
        output.push_str(&time.format("%H:%M %-d %b %Y").to_string());
        output.push('\n');
    }
    if !doc.tags.is_empty() {
        output.push_str(&format!("Tags: {}\n", doc.tags.iter().join(", ")));
    }
    for note in &doc.title_notes {
        output.push_str(&format!(": {}\n", note));
    }
}

fn write_section(output: &mut String, section: &Section) {
    output.push_str(&format!(
        "{} {}\n\n",
        "*".repeat(section.depth()),
        section.title
    ));
    for child in section.subsections() {
        write_section(output, child);
    }
}
