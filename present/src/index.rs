//! Directory index built from document headers
//!
//! Listing a directory only needs titles, so every document is parsed in
//! [`ParseMode::TitlesOnly`]. Parses are independent and run in parallel
//! when the `parallel` feature is enabled.

use crate::config::PresentConfig;
use crate::parser::{ParseError, ParseMode, Parser};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Errors that can occur while discovering documents
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("failed to walk {path}: {source}", path = .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Header information for one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub path: PathBuf,
    pub title: String,
    pub subtitle: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

/// Find every document under `root`, sorted by path
///
/// # Parameters
/// * `root` - Directory to search recursively
/// * `config` - Supplies the document extensions
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - Matching files
/// * `Err(IndexError)` - A directory could not be read
pub fn discover(root: &Path, config: &PresentConfig) -> Result<Vec<PathBuf>, IndexError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|source| IndexError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && config.is_document(path) {
            paths.push(path.to_path_buf());
        }
    }
    log::info!("Found {} documents under {}", paths.len(), root.display());
    Ok(paths)
}

/// Parse the header of every path
///
/// Results are returned in the order of `paths`; one failing document does
/// not stop the others.
pub fn index_documents(
    parser: &Parser,
    paths: &[PathBuf],
) -> Vec<Result<DocumentSummary, ParseError>> {
    #[cfg(feature = "parallel")]
    let summaries = paths
        .par_iter()
        .map(|path| summarize(parser, path))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let summaries = paths.iter().map(|path| summarize(parser, path)).collect();

    summaries
}

fn summarize(parser: &Parser, path: &Path) -> Result<DocumentSummary, ParseError> {
    let doc = parser.parse_file(path, ParseMode::TitlesOnly)?;
    Ok(DocumentSummary {
        path: path.to_path_buf(),
        title: doc.title,
        subtitle: doc.subtitle,
        time: doc.time,
        tags: doc.tags,
    })
}
