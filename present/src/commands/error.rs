//! Error types for command registration and command handlers

use thiserror::Error;

/// Errors raised when registering a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Command names cannot be empty
    #[error("command name must not be empty")]
    EmptyName,

    /// Command name starts with a character the grammar reserves
    #[error("bad command name {name:?}: must not start with {prefix:?}")]
    ReservedPrefix {
        /// The rejected name
        name: String,
        /// The offending first character
        prefix: char,
    },

    /// Command names are a single whitespace-free field
    #[error("bad command name {0:?}: must not contain whitespace")]
    ContainsWhitespace(String),

    /// Name is handled by the parser itself
    #[error("command name {0:?} is reserved")]
    Reserved(String),
}

/// Errors returned by command handlers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A required argument is missing
    #[error(".{command}: missing {argument}")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },

    /// An argument could not be interpreted
    #[error(".{command}: {message}")]
    InvalidArgument { command: String, message: String },

    /// Any other failure reported by an external handler
    #[error("{0}")]
    Other(String),
}

impl CommandError {
    /// Create a missing argument error
    pub fn missing_argument(command: impl Into<String>, argument: &'static str) -> Self {
        Self::MissingArgument {
            command: command.into(),
            argument,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a generic handler error
    pub fn other(reason: impl Into<String>) -> Self {
        Self::Other(reason.into())
    }
}
