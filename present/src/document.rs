//! Document tree produced by the parser
//!
//! A parsed document owns its whole tree: authors, sections and the
//! elements inside them. Nothing is shared between nodes, so the tree can be
//! serialized field-for-field for an external renderer.

use chrono::{DateTime, Utc};
use serde::Serialize;

// Submodules
mod elements;
mod section_number;

// Re-export public types
pub use elements::{Code, Custom, Element, Image, Link, List, Text};
pub use section_number::SectionNumber;

/// A parsed presentation or article
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    /// Document title (first non-empty line)
    pub title: String,

    /// Optional subtitle (first unrecognized header line)
    pub subtitle: Option<String>,

    /// Presentation time, if the header carried one
    pub time: Option<DateTime<Utc>>,

    /// Tags from `Tags:` header lines, in order
    pub tags: Vec<String>,

    /// Speaker notes attached to the title slide
    pub title_notes: Vec<String>,

    /// Presenters, in the order they appear
    pub authors: Vec<Author>,

    /// Top-level sections
    pub sections: Vec<Section>,
}

impl Document {
    /// All sections in depth-first order, top-level and nested alike
    pub fn sections_depth_first(&self) -> Vec<&Section> {
        let mut out = Vec::new();
        for section in &self.sections {
            section.collect_depth_first(&mut out);
        }
        out
    }

    /// Total number of sections at any depth
    pub fn section_count(&self) -> usize {
        self.sections_depth_first().len()
    }
}

/// The person who wrote and/or is presenting the document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Author {
    /// Text and link elements describing the author, one per source line
    pub elements: Vec<Element>,
}

impl Author {
    /// The first plain-text line, conventionally the author's name
    pub fn name(&self) -> Option<&str> {
        self.elements.iter().find_map(|element| match element {
            Element::Text(text) => text.lines.first().map(String::as_str),
            _ => None,
        })
    }

    /// Links attached to this author (social handles, homepages, email)
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.elements.iter().filter_map(|element| match element {
            Element::Link(link) => Some(link),
            _ => None,
        })
    }
}

/// A section of a document, such as a presentation slide
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Section {
    /// Path of this section in the tree (e.g. `[2, 1]`)
    pub number: SectionNumber,

    /// Heading text without the markers
    pub title: String,

    /// Content in source order, including nested sections
    pub elements: Vec<Element>,

    /// Speaker notes
    pub notes: Vec<String>,

    /// Rendering classes set by section-level commands
    pub classes: Vec<String>,

    /// Inline style declarations set by section-level commands
    pub styles: Vec<String>,
}

impl Section {
    /// Create an empty section with the given number and title
    pub fn new(number: SectionNumber, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Template used to render a section
    pub fn template_name(&self) -> &'static str {
        "section"
    }

    /// Heading depth (1 for top-level sections)
    pub fn depth(&self) -> usize {
        self.number.depth()
    }

    /// Direct child sections, in order
    pub fn subsections(&self) -> impl Iterator<Item = &Section> {
        self.elements.iter().filter_map(|element| match element {
            Element::Section(section) => Some(section),
            _ => None,
        })
    }

    fn collect_depth_first<'a>(&'a self, out: &mut Vec<&'a Section>) {
        out.push(self);
        for child in self.subsections() {
            child.collect_depth_first(out);
        }
    }
}
