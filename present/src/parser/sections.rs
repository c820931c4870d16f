//! Recursive section parser
//!
//! A heading is `depth` `*` markers followed by a space. Each section body
//! runs until a heading at the same depth or shallower; deeper headings
//! (exactly one more marker) open sub-sections parsed by recursion with the
//! same cursor.

use super::{speaker_note, LineCursor, ParseError};
use crate::commands::{CommandError, CommandRegistry, Context, BACKGROUND_COMMAND};
use crate::document::{Element, List, Section, SectionNumber, Text};

const HEADING_MARKER: char = '*';
const BULLET_PREFIX: &str = "- ";
const COMMAND_PREFIX: char = '.';
const ESCAPED_COMMAND_PREFIX: &str = "\\.";

/// Preformatted blocks render tabs as this many spaces
const TAB_WIDTH: usize = 4;

/// Kind of block a body line starts, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    /// Leading whitespace: preformatted text
    Indented,
    /// `- item`
    Bullets,
    /// `: note`
    SpeakerNote,
    /// Heading one level deeper than the current section
    Subsection,
    /// `.command args`
    Command,
    /// Anything else
    Paragraph,
}

impl BlockKind {
    fn classify(text: &str, prefix: &str) -> Self {
        if text.starts_with(char::is_whitespace) {
            BlockKind::Indented
        } else if text.starts_with(BULLET_PREFIX) {
            BlockKind::Bullets
        } else if speaker_note(text).is_some() {
            BlockKind::SpeakerNote
        } else if is_heading_with_prefix(text, prefix, 1) {
            BlockKind::Subsection
        } else if text.starts_with(COMMAND_PREFIX) {
            BlockKind::Command
        } else {
            BlockKind::Paragraph
        }
    }
}

/// Whether `text` is a heading made of `prefix` plus `extra` more markers
fn is_heading_with_prefix(text: &str, prefix: &str, extra: usize) -> bool {
    let Some(rest) = text.strip_prefix(prefix) else {
        return false;
    };
    let markers = rest.len() - rest.trim_start_matches(HEADING_MARKER).len();
    markers == extra && rest[markers..].starts_with(' ')
}

/// Any heading: one or more markers followed by a space
fn is_heading(text: &str) -> bool {
    let markers = text.len() - text.trim_start_matches(HEADING_MARKER).len();
    markers > 0 && text[markers..].starts_with(' ')
}

/// A heading at the depth of `prefix` or shallower
fn ends_section(text: &str, prefix: &str) -> bool {
    is_heading(text) && !text.starts_with(&format!("{}{}", prefix, HEADING_MARKER))
}

/// Per-document parameters shared by every level of the recursion
pub(super) struct SectionParser<'p> {
    /// Document name, for errors and command handlers
    pub name: &'p str,
    pub registry: &'p CommandRegistry,
    pub context: &'p Context,
}

impl SectionParser<'_> {
    /// Parse consecutive sibling sections under `parent`
    ///
    /// Stops at end of input or at the first non-empty line that is not a
    /// heading of this depth. That line is left unread.
    pub fn parse_sections(
        &self,
        lines: &mut LineCursor<'_>,
        parent: &SectionNumber,
    ) -> Result<Vec<Section>, ParseError> {
        let prefix = HEADING_MARKER.to_string().repeat(parent.depth() + 1);
        let mut sections = Vec::new();

        for index in 1u32.. {
            let Some(text) = lines.next_non_empty() else {
                break;
            };
            let Some(title) = text
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix(' '))
            else {
                lines.back();
                break;
            };

            let mut section = Section::new(parent.child(index), title);
            log::debug!(
                "{}:{}: section {} {:?}",
                self.name,
                lines.line_number(),
                section.number,
                section.title
            );
            self.parse_body(lines, &prefix, &mut section)?;
            sections.push(section);
        }
        Ok(sections)
    }

    /// Parse the content of `section` up to the next heading that ends it
    fn parse_body(
        &self,
        lines: &mut LineCursor<'_>,
        prefix: &str,
        section: &mut Section,
    ) -> Result<(), ParseError> {
        while let Some(text) = lines.next_non_empty() {
            if ends_section(text, prefix) {
                lines.back();
                break;
            }

            let element = match BlockKind::classify(text, prefix) {
                BlockKind::Indented => parse_indented(lines, text),
                BlockKind::Bullets => Some(parse_bullets(lines, text)),
                BlockKind::SpeakerNote => {
                    section.notes.extend(speaker_note(text).map(str::to_string));
                    None
                }
                BlockKind::Subsection => {
                    lines.back();
                    let subsections = self.parse_sections(lines, &section.number)?;
                    section
                        .elements
                        .extend(subsections.into_iter().map(Element::Section));
                    None
                }
                BlockKind::Command => self.parse_command(lines, text, section)?,
                BlockKind::Paragraph => parse_paragraph(lines, text),
            };
            section.elements.extend(element);
        }
        Ok(())
    }

    /// Run a `.command` line
    ///
    /// `.background URL` is handled here and styles the section; every other
    /// command goes through the registry.
    fn parse_command(
        &self,
        lines: &LineCursor<'_>,
        text: &str,
        section: &mut Section,
    ) -> Result<Option<Element>, ParseError> {
        let line = lines.line_number();
        let mut args = text.split_whitespace();
        let name = args
            .next()
            .and_then(|command| command.strip_prefix(COMMAND_PREFIX))
            .unwrap_or_default();

        if name == BACKGROUND_COMMAND {
            let Some(url) = args.next() else {
                return Err(ParseError::Command {
                    file: self.name.to_string(),
                    line,
                    source: CommandError::missing_argument(BACKGROUND_COMMAND, "image URL"),
                });
            };
            section.classes = vec![BACKGROUND_COMMAND.to_string()];
            section.styles = vec![format!("background-image: url('{}')", url)];
            return Ok(None);
        }

        let Some(handler) = self.registry.get(name) else {
            return Err(ParseError::UnknownCommand {
                file: self.name.to_string(),
                line,
                text: text.to_string(),
            });
        };
        handler(self.context, self.name, line, text).map_err(|source| ParseError::Command {
            file: self.name.to_string(),
            line,
            source,
        })
    }
}

/// Collect an indented block starting at `first`
///
/// Lines continue the block while they start with the first line's
/// indentation or are empty. Returns `None` for a whitespace-only line.
fn parse_indented<'a>(lines: &mut LineCursor<'a>, first: &'a str) -> Option<Element> {
    let width = first.find(|c: char| !c.is_whitespace())?;
    let indent = &first[..width];

    let mut block = Vec::new();
    let mut current = Some(first);
    while let Some(text) = current {
        if text.is_empty() {
            block.push(text);
        } else if text.starts_with(indent) {
            block.push(&text[width..]);
        } else {
            break;
        }
        current = lines.next_line();
    }
    lines.back();

    let mut pre: Vec<String> = block
        .iter()
        .map(|text| {
            text.replace('\t', &" ".repeat(TAB_WIDTH))
                .trim_end()
                .to_string()
        })
        .collect();
    while pre.last().is_some_and(String::is_empty) {
        pre.pop();
    }
    Some(Element::Text(Text::preformatted(pre)))
}

/// Collect consecutive `- ` lines starting at `first`
fn parse_bullets<'a>(lines: &mut LineCursor<'a>, first: &'a str) -> Element {
    let mut bullets = Vec::new();
    let mut current = Some(first);
    while let Some(item) = current.and_then(|text| text.strip_prefix(BULLET_PREFIX)) {
        bullets.push(item.to_string());
        current = lines.next_line();
    }
    lines.back();
    Element::List(List { bullets })
}

/// Collect a paragraph of non-blank lines starting at `first`
///
/// A command line ends the paragraph and is left unread; `\.` at the start
/// of a line escapes a literal period.
fn parse_paragraph<'a>(lines: &mut LineCursor<'a>, first: &'a str) -> Option<Element> {
    let mut paragraph = Vec::new();
    let mut current = Some(first);
    while let Some(text) = current {
        if text.trim().is_empty() {
            break;
        }
        if text.starts_with(COMMAND_PREFIX) {
            lines.back();
            break;
        }
        let text = if text.starts_with(ESCAPED_COMMAND_PREFIX) {
            &text[1..]
        } else {
            text
        };
        paragraph.push(text.to_string());
        current = lines.next_line();
    }

    if paragraph.is_empty() {
        None
    } else {
        Some(Element::Text(Text::plain(paragraph)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Code, Image};

    fn sections_with(registry: &CommandRegistry, source: &str) -> Result<Vec<Section>, ParseError> {
        let context = Context::default();
        let parser = SectionParser {
            name: "s.slide",
            registry,
            context: &context,
        };
        let mut lines = LineCursor::new(source);
        parser.parse_sections(&mut lines, &SectionNumber::root())
    }

    fn sections(source: &str) -> Result<Vec<Section>, ParseError> {
        sections_with(&CommandRegistry::with_builtins(), source)
    }

    fn text(lines: &[&str]) -> Element {
        Element::Text(Text::plain(lines.iter().map(|l| l.to_string()).collect()))
    }

    fn pre(lines: &[&str]) -> Element {
        Element::Text(Text::preformatted(
            lines.iter().map(|l| l.to_string()).collect(),
        ))
    }

    #[test]
    fn test_nesting() {
        // Arrange: One top-level section with a sub-section, then a sibling
        let source = "* A\n** B\n* C\n";

        // Act
        let sections = sections(source).unwrap();

        // Assert
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "A");
        assert_eq!(sections[0].number.parts, vec![1]);
        assert_eq!(sections[0].elements.len(), 1);
        match &sections[0].elements[0] {
            Element::Section(sub) => {
                assert_eq!(sub.title, "B");
                assert_eq!(sub.number.parts, vec![1, 1]);
            }
            other => panic!("Expected Section, got {:?}", other),
        }
        assert_eq!(sections[1].title, "C");
        assert_eq!(sections[1].number.parts, vec![2]);
    }

    #[test]
    fn test_sibling_numbers_and_deep_nesting() {
        let source = "* A\n** A1\n*** A1a\n** A2\n* B\n** B1\n";

        let sections = sections(source).unwrap();

        let a: Vec<&Section> = sections[0].subsections().collect();
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].number.to_string(), "1.1");
        assert_eq!(a[1].number.to_string(), "1.2");
        let a1: Vec<&Section> = a[0].subsections().collect();
        assert_eq!(a1[0].number.to_string(), "1.1.1");
        assert_eq!(a1[0].title, "A1a");
        let b: Vec<&Section> = sections[1].subsections().collect();
        assert_eq!(b[0].number.to_string(), "2.1");
    }

    #[test]
    fn test_forty_levels_of_nesting() {
        // Arrange: One chain of headings 40 deep, then siblings at depth 2 and 1
        const DEPTH: usize = 40;
        let mut source: String = (1..=DEPTH)
            .map(|depth| format!("{} L{}\n", "*".repeat(depth), depth))
            .collect();
        source.push_str("** Second\n* Last\n");

        // Act
        let sections = sections(&source).unwrap();

        // Assert: Each level is the first child of the one above
        let mut current = &sections[0];
        for depth in 1..=DEPTH {
            assert_eq!(current.depth(), depth);
            assert_eq!(current.number.parts, vec![1; depth]);
            assert_eq!(current.title, format!("L{}", depth));
            if depth < DEPTH {
                current = current.subsections().next().unwrap();
            }
        }
        assert_eq!(current.subsections().count(), 0);

        // Assert: Numbering resumes once the recursion unwinds
        let children: Vec<&Section> = sections[0].subsections().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].number.parts, vec![1, 2]);
        assert_eq!(children[1].title, "Second");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].number.parts, vec![2]);
        assert_eq!(sections[1].title, "Last");
    }

    #[test]
    fn test_content_between_subsections_stays_in_order() {
        let source = "* A\n\nintro\n\n** B\n\nin b\n\n* C\n";

        let sections = sections(source).unwrap();

        assert_eq!(sections[0].elements.len(), 2);
        assert_eq!(sections[0].elements[0], text(&["intro"]));
        match &sections[0].elements[1] {
            Element::Section(sub) => assert_eq!(sub.elements, vec![text(&["in b"])]),
            other => panic!("Expected Section, got {:?}", other),
        }
    }

    #[test]
    fn test_indented_block() {
        let sections = sections("* A\n\n\tfoo\n\tbar\n").unwrap();

        assert_eq!(sections[0].elements, vec![pre(&["foo", "bar"])]);
    }

    #[test]
    fn test_indented_block_keeps_blank_lines_and_relative_indent() {
        let source = "* A\n\n  if x {\n  \tdo()   \n\n  }\n\n\nafter\n";

        let sections = sections(source).unwrap();

        assert_eq!(
            sections[0].elements,
            vec![pre(&["if x {", "    do()", "", "}"]), text(&["after"])]
        );
    }

    #[test]
    fn test_indented_block_ends_at_shallower_line() {
        let sections = sections("* A\n\n    deep\n  shallow\n").unwrap();

        assert_eq!(
            sections[0].elements,
            vec![pre(&["deep"]), pre(&["shallow"])]
        );
    }

    #[test]
    fn test_whitespace_only_line_is_skipped() {
        let sections = sections("* A\n   \ntext\n").unwrap();

        assert_eq!(sections[0].elements, vec![text(&["text"])]);
    }

    #[test]
    fn test_bullets() {
        let sections = sections("* A\n\n- one\n- two\n\n- three\n").unwrap();

        assert_eq!(
            sections[0].elements,
            vec![
                Element::List(List {
                    bullets: vec!["one".to_string(), "two".to_string()],
                }),
                Element::List(List {
                    bullets: vec!["three".to_string()],
                }),
            ]
        );
    }

    #[test]
    fn test_paragraph_lines_and_escape() {
        let sections = sections("* A\n\nfirst line\n\\.not a command\nthird\n\nsecond\n").unwrap();

        assert_eq!(
            sections[0].elements,
            vec![
                text(&["first line", ".not a command", "third"]),
                text(&["second"]),
            ]
        );
    }

    #[test]
    fn test_command_breaks_paragraph() {
        let sections = sections("* A\n\ntext\n.image gopher.png\nmore\n").unwrap();

        assert_eq!(sections[0].elements.len(), 3);
        assert_eq!(sections[0].elements[0], text(&["text"]));
        assert_eq!(
            sections[0].elements[1],
            Element::Image(Image {
                url: "gopher.png".to_string(),
                width: 0,
                height: 0,
            })
        );
        assert_eq!(sections[0].elements[2], text(&["more"]));
    }

    #[test]
    fn test_speaker_notes() {
        let sections = sections("* A\n: remember this\ntext\n\n: and this\n").unwrap();

        assert_eq!(sections[0].notes, vec!["remember this", "and this"]);
        assert_eq!(sections[0].elements, vec![text(&["text"])]);
    }

    #[test]
    fn test_paragraph_absorbs_following_lines() {
        // Only a blank line or a command ends a paragraph
        let sections = sections("* A\ntext\n- not a bullet\n* not a heading\n").unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].elements,
            vec![text(&["text", "- not a bullet", "* not a heading"])]
        );
    }

    #[test]
    fn test_background_command() {
        let sections = sections("* A\n\n.background image.png\n").unwrap();

        assert_eq!(sections[0].classes, vec!["background"]);
        assert_eq!(
            sections[0].styles,
            vec!["background-image: url('image.png')"]
        );
        assert!(sections[0].elements.is_empty());
    }

    #[test]
    fn test_background_bypasses_registry() {
        // An empty registry still understands .background
        let sections = sections_with(&CommandRegistry::new(), "* A\n.background bg.jpg\n").unwrap();

        assert_eq!(sections[0].classes, vec!["background"]);
    }

    #[test]
    fn test_background_without_url() {
        let err = sections("* A\n.background\n").unwrap_err();

        assert!(matches!(err, ParseError::Command { line: 2, .. }));
    }

    #[test]
    fn test_unknown_command() {
        let err = sections("* A\n\ntext\n\n.bogus arg\n").unwrap_err();

        match err {
            ParseError::UnknownCommand { file, line, text } => {
                assert_eq!(file, "s.slide");
                assert_eq!(line, 5);
                assert_eq!(text, ".bogus arg");
            }
            other => panic!("Expected UnknownCommand, got {:?}", other),
        }
    }

    #[test]
    fn test_registered_command_element_appended() {
        let sections = sections("* A\n.code -numbers main.go\n").unwrap();

        assert_eq!(
            sections[0].elements,
            vec![Element::Code(Code {
                file: "main.go".to_string(),
                address: None,
                edit: false,
                numbers: true,
                play: false,
            })]
        );
    }

    #[test]
    fn test_command_without_element() {
        let mut registry = CommandRegistry::new();
        registry
            .register("pause", |_: &Context, _: &str, _: usize, _: &str| Ok(None))
            .unwrap();

        let sections = sections_with(&registry, "* A\n.pause\ntext\n").unwrap();

        assert_eq!(sections[0].elements, vec![text(&["text"])]);
    }

    #[test]
    fn test_too_deep_heading_is_text() {
        let sections = sections("* A\n\n*** too deep\n").unwrap();

        assert_eq!(sections[0].elements, vec![text(&["*** too deep"])]);
    }

    #[test]
    fn test_comments_skipped_in_body() {
        let sections = sections("* A\n# hidden\ntext\n# hidden\nmore\n").unwrap();

        assert_eq!(sections[0].elements, vec![text(&["text", "more"])]);
    }

    #[test]
    fn test_stops_at_non_heading_and_leaves_it_unread() {
        let registry = CommandRegistry::with_builtins();
        let context = Context::default();
        let parser = SectionParser {
            name: "s.slide",
            registry: &registry,
            context: &context,
        };
        let mut lines = LineCursor::new("stray text\n* A\n");

        let sections = parser
            .parse_sections(&mut lines, &SectionNumber::root())
            .unwrap();

        assert!(sections.is_empty());
        assert_eq!(lines.peek(), Some("stray text"));
    }

    #[test]
    fn test_subsection_leaves_cursor_at_next_heading() {
        let registry = CommandRegistry::with_builtins();
        let context = Context::default();
        let parser = SectionParser {
            name: "s.slide",
            registry: &registry,
            context: &context,
        };
        let mut lines = LineCursor::new("** B\ntext\n\n* C\n");

        let subsections = parser
            .parse_sections(&mut lines, &SectionNumber::new(vec![1]))
            .unwrap();

        assert_eq!(subsections.len(), 1);
        assert_eq!(subsections[0].number.parts, vec![1, 1]);
        assert_eq!(lines.peek(), Some("* C"));
    }

    #[test]
    fn test_heading_helpers() {
        assert!(is_heading("* A"));
        assert!(is_heading("*** A"));
        assert!(!is_heading("*A"));
        assert!(!is_heading("text"));
        assert!(is_heading_with_prefix("** B", "*", 1));
        assert!(!is_heading_with_prefix("*** B", "*", 1));
        assert!(ends_section("* C", "**"));
        assert!(ends_section("** C", "**"));
        assert!(!ends_section("*** C", "**"));
    }
}
