//! Block commands
//!
//! A line starting with `.` names a command. Commands are looked up in a
//! [`CommandRegistry`] that is built before the parser and stays read-only
//! while documents are parsed, so new element kinds can be added without
//! touching the section parser.

use crate::document::Element;
use std::collections::HashMap;

// Submodules
mod builtin;
mod error;

// Re-export public types
pub use error::{CommandError, RegistryError};

/// Name of the section-level command handled by the parser itself
pub const BACKGROUND_COMMAND: &str = "background";

/// Signature of a command handler
///
/// Handlers receive the parse context, the document name, the 1-based line
/// number of the command and the full command line. Returning `Ok(None)`
/// appends nothing to the section.
pub type CommandFn =
    dyn Fn(&Context, &str, usize, &str) -> Result<Option<Element>, CommandError> + Send + Sync;

/// Settings made available to every command handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    /// Whether `.play` snippets are runnable
    pub play_enabled: bool,
}

/// Registry mapping command names (without the leading `.`) to handlers
pub struct CommandRegistry {
    commands: HashMap<String, Box<CommandFn>>,
}

impl CommandRegistry {
    /// Create a registry with no commands
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in `image`, `code`, `play` and `link` commands
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register_all(&mut registry);
        registry
    }

    /// Register a handler under `name`
    ///
    /// Replaces any handler already registered under the same name.
    ///
    /// # Returns
    /// * `Err(RegistryError)` - The name is empty, reserved or malformed
    pub fn register<F>(&mut self, name: &str, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(&Context, &str, usize, &str) -> Result<Option<Element>, CommandError>
            + Send
            + Sync
            + 'static,
    {
        validate_name(name)?;
        self.insert(name, handler);
        Ok(())
    }

    pub(crate) fn insert<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&Context, &str, usize, &str) -> Result<Option<Element>, CommandError>
            + Send
            + Sync
            + 'static,
    {
        if self
            .commands
            .insert(name.to_string(), Box::new(handler))
            .is_some()
        {
            log::debug!("Replaced handler for command .{}", name);
        }
    }

    /// Look up the handler for a command name (without the leading `.`)
    pub fn get(&self, name: &str) -> Option<&CommandFn> {
        self.commands.get(name).map(|handler| handler.as_ref())
    }

    /// Check whether a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    match name.chars().next() {
        None => Err(RegistryError::EmptyName),
        Some(c @ ('.' | ';')) => Err(RegistryError::ReservedPrefix {
            name: name.to_string(),
            prefix: c,
        }),
        Some(_) if name.chars().any(char::is_whitespace) => {
            Err(RegistryError::ContainsWhitespace(name.to_string()))
        }
        Some(_) if name == BACKGROUND_COMMAND => Err(RegistryError::Reserved(name.to_string())),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Text;

    fn echo(
        _ctx: &Context,
        _file: &str,
        _line: usize,
        text: &str,
    ) -> Result<Option<Element>, CommandError> {
        Ok(Some(Element::Text(Text::plain(vec![text.to_string()]))))
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CommandRegistry::new();
        registry.register("echo", echo).unwrap();

        let handler = registry.get("echo").expect("registered");
        let element = handler(&Context::default(), "talk.slide", 7, ".echo hi").unwrap();

        assert_eq!(
            element,
            Some(Element::Text(Text::plain(vec![".echo hi".to_string()])))
        );
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_register_rejects_bad_names() {
        let mut registry = CommandRegistry::new();

        assert_eq!(registry.register("", echo), Err(RegistryError::EmptyName));
        assert!(matches!(
            registry.register(";note", echo),
            Err(RegistryError::ReservedPrefix { prefix: ';', .. })
        ));
        assert!(matches!(
            registry.register(".image", echo),
            Err(RegistryError::ReservedPrefix { prefix: '.', .. })
        ));
        assert!(matches!(
            registry.register("two words", echo),
            Err(RegistryError::ContainsWhitespace(_))
        ));
        assert!(matches!(
            registry.register("background", echo),
            Err(RegistryError::Reserved(_))
        ));
        assert!(registry.names().is_empty());
    }

    #[test]
    fn test_with_builtins() {
        let registry = CommandRegistry::with_builtins();

        assert_eq!(registry.names(), vec!["code", "image", "link", "play"]);
        assert!(!registry.contains(BACKGROUND_COMMAND));
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = CommandRegistry::with_builtins();
        registry
            .register("image", |_: &Context, _: &str, _: usize, _: &str| Ok(None))
            .unwrap();

        let handler = registry.get("image").unwrap();
        let element = handler(&Context::default(), "x", 1, ".image a.png").unwrap();

        assert_eq!(element, None);
    }
}
