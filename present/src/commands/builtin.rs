//! Built-in command handlers: `.image`, `.code`, `.play` and `.link`
//!
//! Handlers only interpret their argument line. Files and URLs they name
//! are never opened.

use super::{CommandError, CommandRegistry, Context};
use crate::document::{Code, Element, Image, Link};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// `.code|.play [-edit] [-numbers] FILE [ADDRESS]`
static CODE_RE: OnceLock<Regex> = OnceLock::new();

fn code_regex() -> &'static Regex {
    CODE_RE.get_or_init(|| {
        Regex::new(r"^\.(code|play)\s+((?:(?:-edit|-numbers)\s+)*)(\S+)(?:\s+(.*))?$")
            .expect("code command regex is valid")
    })
}

pub(super) fn register_all(registry: &mut CommandRegistry) {
    registry.insert("image", parse_image);
    registry.insert("code", parse_code);
    registry.insert("play", parse_code);
    registry.insert("link", parse_link);
}

/// `.image URL [HEIGHT WIDTH]`, where either size may be `_`
fn parse_image(
    _ctx: &Context,
    _file: &str,
    _line: usize,
    text: &str,
) -> Result<Option<Element>, CommandError> {
    let args: Vec<&str> = text.split_whitespace().collect();
    let Some(url) = args.get(1) else {
        return Err(CommandError::missing_argument("image", "image URL"));
    };

    let mut image = Image {
        url: url.to_string(),
        ..Image::default()
    };
    match &args[2..] {
        [] => {}
        [height, width] => {
            image.height = parse_dimension(height)?;
            image.width = parse_dimension(width)?;
        }
        _ => {
            return Err(CommandError::invalid_argument(
                "image",
                "expected a URL optionally followed by height and width",
            ))
        }
    }
    Ok(Some(Element::Image(image)))
}

fn parse_dimension(arg: &str) -> Result<u32, CommandError> {
    if arg == "_" {
        return Ok(0);
    }
    arg.parse::<u32>()
        .map_err(|_| CommandError::invalid_argument("image", format!("bad size {:?}", arg)))
}

/// `.code` and `.play` share one grammar; only `.play` can be runnable
fn parse_code(
    ctx: &Context,
    _file: &str,
    _line: usize,
    text: &str,
) -> Result<Option<Element>, CommandError> {
    let Some(caps) = code_regex().captures(text.trim_end()) else {
        let command = text
            .split_whitespace()
            .next()
            .unwrap_or(".code")
            .trim_start_matches('.');
        return Err(CommandError::invalid_argument(
            command,
            format!("syntax error in {:?}", text),
        ));
    };

    let command = &caps[1];
    let flags = caps.get(2).map_or("", |m| m.as_str());
    let code = Code {
        file: caps[3].to_string(),
        address: caps.get(4).map(|m| m.as_str().trim().to_string()),
        edit: flags.split_whitespace().any(|flag| flag == "-edit"),
        numbers: flags.split_whitespace().any(|flag| flag == "-numbers"),
        play: command == "play" && ctx.play_enabled,
    };
    Ok(Some(Element::Code(code)))
}

/// `.link URL [LABEL...]`
fn parse_link(
    _ctx: &Context,
    _file: &str,
    _line: usize,
    text: &str,
) -> Result<Option<Element>, CommandError> {
    let mut args = text.trim().splitn(3, char::is_whitespace).skip(1);
    let Some(target) = args.next().filter(|arg| !arg.is_empty()) else {
        return Err(CommandError::missing_argument("link", "URL"));
    };
    let url = Url::parse(target)
        .map_err(|e| CommandError::invalid_argument("link", format!("{}: {}", target, e)))?;
    let label = args
        .next()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string);

    Ok(Some(Element::Link(Link::new(url, label))))
}
