//! Error types for document parsing

use crate::commands::CommandError;
use thiserror::Error;

/// Fatal errors that abort a parse
///
/// Every variant carries the document name; line numbers are 1-based.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input ended before a title line was found
    #[error("{file}: unexpected EOF; expected title")]
    MissingTitle {
        /// Document name
        file: String,
    },

    /// Input ended while more structure was required
    #[error("{file}:{line}: unexpected EOF while reading {context}")]
    UnexpectedEof {
        /// Document name
        file: String,
        /// Last line read
        line: usize,
        /// What the parser was reading ("header", "authors")
        context: &'static str,
    },

    /// A header line that is not a note, tags, a time or the subtitle
    #[error("{file}:{line}: unexpected header line: {text:?}")]
    UnexpectedHeaderLine {
        /// Document name
        file: String,
        /// Line of the offending header
        line: usize,
        /// The line itself
        text: String,
    },

    /// A `.` line naming a command with no registered handler
    #[error("{file}:{line}: unknown command {text:?}")]
    UnknownCommand {
        /// Document name
        file: String,
        /// Line of the command
        line: usize,
        /// The full command line
        text: String,
    },

    /// A command handler rejected its line
    #[error("{file}:{line}: {source}")]
    Command {
        /// Document name
        file: String,
        /// Line of the command
        line: usize,
        /// Error reported by the handler
        #[source]
        source: CommandError,
    },

    /// The input could not be read
    #[error("failed to read {file}: {source}")]
    Io {
        /// Document name
        file: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Line number the error refers to, when there is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnexpectedEof { line, .. }
            | Self::UnexpectedHeaderLine { line, .. }
            | Self::UnknownCommand { line, .. }
            | Self::Command { line, .. } => Some(*line),
            Self::MissingTitle { .. } | Self::Io { .. } => None,
        }
    }

    /// Name of the document being parsed
    pub fn file(&self) -> &str {
        match self {
            Self::MissingTitle { file }
            | Self::UnexpectedEof { file, .. }
            | Self::UnexpectedHeaderLine { file, .. }
            | Self::UnknownCommand { file, .. }
            | Self::Command { file, .. }
            | Self::Io { file, .. } => file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_message() {
        let err = ParseError::UnknownCommand {
            file: "talk.slide".to_string(),
            line: 12,
            text: ".bogus x".to_string(),
        };

        assert_eq!(err.to_string(), "talk.slide:12: unknown command \".bogus x\"");
        assert_eq!(err.line(), Some(12));
        assert_eq!(err.file(), "talk.slide");
    }

    #[test]
    fn test_command_error_message_includes_source() {
        let err = ParseError::Command {
            file: "talk.slide".to_string(),
            line: 4,
            source: CommandError::missing_argument("image", "image URL"),
        };

        assert_eq!(err.to_string(), "talk.slide:4: .image: missing image URL");
    }
}
