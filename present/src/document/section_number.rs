//! Section number representation

use itertools::Itertools;
use serde::Serialize;

/// Section number representation
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SectionNumber {
    /// Number components (e.g., [2, 1] for the first sub-section of the second section)
    pub parts: Vec<u32>,
}

impl SectionNumber {
    /// Create a section number from its components
    pub fn new(parts: Vec<u32>) -> Self {
        Self { parts }
    }

    /// The empty path that top-level sections hang from
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the `index`-th child (1-based) of this section
    pub fn child(&self, index: u32) -> Self {
        let mut parts = self.parts.clone();
        parts.push(index);
        Self { parts }
    }

    /// Path of the enclosing section, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.parts.split_last()?;
        Some(Self {
            parts: rest.to_vec(),
        })
    }

    /// Nesting depth, equal to the number of heading markers (0 for the root)
    pub fn depth(&self) -> usize {
        self.parts.len()
    }
}

impl std::fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parts.iter().join("."))
    }
}
