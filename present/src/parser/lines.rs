//! Line cursor with one step of pushback

/// Lines starting with this character are comments and never returned
const COMMENT_MARKER: char = '#';

/// Sequential reader over the lines of a document
///
/// The cursor only ever moves forward, except that the most recent read can
/// be undone once with [`LineCursor::back`]. Undoing twice in a row is not
/// supported: the parser never needs more than one line of lookahead.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    /// Index of the next line to examine
    pos: usize,
    /// Whether `back` may be called
    can_retreat: bool,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor positioned before the first line of `source`
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
            pos: 0,
            can_retreat: false,
        }
    }

    /// Return the next non-comment line and advance past it
    ///
    /// Returns `None` at end of input.
    pub fn next_line(&mut self) -> Option<&'a str> {
        self.can_retreat = true;
        loop {
            let current = self.pos;
            self.pos += 1;
            let text = *self.lines.get(current)?;
            if !text.starts_with(COMMENT_MARKER) {
                return Some(text);
            }
        }
    }

    /// Return the next line that is neither a comment nor empty
    pub fn next_non_empty(&mut self) -> Option<&'a str> {
        loop {
            let text = self.next_line()?;
            if !text.is_empty() {
                return Some(text);
            }
        }
    }

    /// Undo the most recent read
    ///
    /// Only one step can be undone; the next read must happen before
    /// calling `back` again.
    pub fn back(&mut self) {
        debug_assert!(self.can_retreat, "LineCursor::back called twice in a row");
        if self.can_retreat {
            self.pos = self.pos.saturating_sub(1);
            self.can_retreat = false;
        }
    }

    /// Look at the next non-comment line without consuming it
    pub fn peek(&self) -> Option<&'a str> {
        self.lines
            .iter()
            .skip(self.pos)
            .find(|text| !text.starts_with(COMMENT_MARKER))
            .copied()
    }

    /// 1-based number of the line returned by the most recent read
    pub fn line_number(&self) -> usize {
        self.pos.min(self.lines.len())
    }
}
