//! Slide markup parser
//!
//! Converts a plain-text document into a [`Document`] tree in three steps:
//! 1. **Header**: title, subtitle, time and tags up to the first blank line
//! 2. **Authors**: blank-line separated author paragraphs up to the first heading
//! 3. **Sections**: `*`-prefixed headings, recursively nested by marker count
//!
//! The whole input is held in memory and parsed synchronously. A
//! [`Parser`] carries no per-document state, so one instance can parse many
//! documents, including from several threads at once.

use crate::commands::{CommandRegistry, Context};
use crate::document::{Document, SectionNumber};
use std::io::Read;
use std::path::Path;

// Submodules
mod authors;
mod error;
mod header;
mod lines;
mod sections;

// Re-export public types
pub use error::ParseError;
pub use header::parse_time;
pub use lines::LineCursor;

/// Prefix of speaker-note lines
const SPEAKER_NOTE_PREFIX: &str = ": ";

/// How much of a document to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Header, authors and sections
    #[default]
    Full,

    /// Title, subtitle, time and tags only
    TitlesOnly,
}

/// Parser for slide markup
#[derive(Debug)]
pub struct Parser {
    registry: CommandRegistry,
    context: Context,
}

impl Parser {
    /// Create a parser from a finished command registry
    pub fn new(registry: CommandRegistry, context: Context) -> Self {
        Self { registry, context }
    }

    /// Commands this parser understands
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Context passed to command handlers
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Parse a document held in memory
    ///
    /// # Parameters
    /// * `source` - Full document text
    /// * `name` - Document name used in error messages and passed to commands
    /// * `mode` - Whether to stop after the header
    ///
    /// # Returns
    /// * `Ok(Document)` - The parsed tree
    /// * `Err(ParseError)` - The first fatal error; no partial document is returned
    pub fn parse_str(
        &self,
        source: &str,
        name: &str,
        mode: ParseMode,
    ) -> Result<Document, ParseError> {
        let mut lines = LineCursor::new(source);
        let mut doc = Document::default();

        header::parse_header(&mut doc, &mut lines, name)?;
        if mode == ParseMode::TitlesOnly {
            authors::collect_notes(&mut lines, &mut doc.title_notes);
            return Ok(doc);
        }

        doc.authors = authors::parse_authors(&mut lines, name, &mut doc.title_notes)?;

        let sections = sections::SectionParser {
            name,
            registry: &self.registry,
            context: &self.context,
        };
        doc.sections = sections.parse_sections(&mut lines, &SectionNumber::root())?;

        log::debug!(
            "{}: parsed {} authors, {} top-level sections",
            name,
            doc.authors.len(),
            doc.sections.len()
        );
        Ok(doc)
    }

    /// Read `reader` to the end and parse it
    pub fn parse_reader<R: Read>(
        &self,
        mut reader: R,
        name: &str,
        mode: ParseMode,
    ) -> Result<Document, ParseError> {
        let mut source = String::new();
        reader
            .read_to_string(&mut source)
            .map_err(|source| ParseError::Io {
                file: name.to_string(),
                source,
            })?;
        self.parse_str(&source, name, mode)
    }

    /// Read and parse a file, using its path as the document name
    pub fn parse_file(&self, path: &Path, mode: ParseMode) -> Result<Document, ParseError> {
        let name = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            file: name.clone(),
            source,
        })?;
        self.parse_str(&source, &name, mode)
    }
}

impl Default for Parser {
    /// A parser with the built-in commands and default context
    fn default() -> Self {
        Self::new(CommandRegistry::with_builtins(), Context::default())
    }
}

/// Parse `source` with the built-in commands
pub fn parse(source: &str, name: &str, mode: ParseMode) -> Result<Document, ParseError> {
    Parser::default().parse_str(source, name, mode)
}

/// Text of a speaker-note line without its marker
fn speaker_note(text: &str) -> Option<&str> {
    text.strip_prefix(SPEAKER_NOTE_PREFIX)
}
