//! Content elements
//!
//! Every element reports a stable template name that renderers use to pick
//! a template. Elements produced by externally registered commands that do
//! not fit a built-in variant travel as [`Custom`].

use super::Section;
use serde::Serialize;
use url::Url;

/// Content element of a section or author
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    /// A paragraph or preformatted block
    Text(Text),

    /// A bullet list
    List(List),

    /// A hyperlink
    Link(Link),

    /// A nested section
    Section(Section),

    /// An image reference (`.image`)
    Image(Image),

    /// A code or playground snippet reference (`.code`, `.play`)
    Code(Code),

    /// An element contributed by an external command
    Custom(Custom),
}

impl Element {
    /// Template name used by renderers for this element
    pub fn template_name(&self) -> &str {
        match self {
            Element::Text(_) => "text",
            Element::List(_) => "list",
            Element::Link(_) => "link",
            Element::Section(section) => section.template_name(),
            Element::Image(_) => "image",
            Element::Code(_) => "code",
            Element::Custom(custom) => &custom.template,
        }
    }
}

/// Lines of text, either a paragraph or a preformatted block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Text {
    /// Source lines in order
    pub lines: Vec<String>,

    /// Whether the block is preformatted (rendered verbatim)
    pub pre: bool,
}

impl Text {
    /// A paragraph of reflowable lines
    pub fn plain(lines: Vec<String>) -> Self {
        Self { lines, pre: false }
    }

    /// A verbatim block
    pub fn preformatted(lines: Vec<String>) -> Self {
        Self { lines, pre: true }
    }
}

/// A bullet list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct List {
    /// Item text without the `- ` marker
    pub bullets: Vec<String>,
}

/// A hyperlink with an optional display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Target URL
    pub url: Url,

    /// Text shown instead of the URL
    pub label: Option<String>,
}

impl Link {
    pub fn new(url: Url, label: Option<String>) -> Self {
        Self { url, label }
    }

    /// Label if present, the URL otherwise
    pub fn display_text(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.url.as_str())
    }
}

/// An image reference
///
/// Zero width or height means "unspecified" and is left to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A reference to a code snippet
///
/// The parser records what the command asked for; reading and slicing the
/// file is left to whoever renders the element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Code {
    /// File the snippet comes from
    pub file: String,

    /// Optional address selecting part of the file (e.g. `/start/,/end/`)
    pub address: Option<String>,

    /// Snippet may be edited by the viewer
    pub edit: bool,

    /// Show line numbers
    pub numbers: bool,

    /// Snippet can be run in a playground
    pub play: bool,
}

/// Element produced by a command the core knows nothing about
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Custom {
    /// Template name reported to renderers
    pub template: String,

    /// Arbitrary structured payload
    pub data: serde_json::Value,
}
