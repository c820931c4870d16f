//! present - slide and article markup parser
//!
//! Parses the plain-text presentation format into a document tree of
//! authors and nested sections, ready for an external renderer.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod commands;
pub mod config;
pub mod document;
pub mod index;
pub mod outline;
pub mod parser;

pub use commands::{CommandError, CommandRegistry, Context, RegistryError};
pub use document::{Author, Document, Element, Section, SectionNumber};
pub use parser::{parse, ParseError, ParseMode, Parser};
