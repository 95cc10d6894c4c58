//! Status markers encoded as name prefixes.
//!
//! A tagged name is the only state that survives between poll cycles: any
//! name containing one of the markers is never touched again.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTag {
    Skip,
    Duplicate,
    Tv,
}

impl StatusTag {
    pub const ALL: [StatusTag; 3] = [StatusTag::Tv, StatusTag::Duplicate, StatusTag::Skip];

    pub fn marker(self) -> &'static str {
        match self {
            StatusTag::Skip => "[SKIP]",
            StatusTag::Duplicate => "[DUPLICATE]",
            StatusTag::Tv => "[TV]",
        }
    }

    /// `"[TAG] name"`
    pub fn apply(self, name: &str) -> String {
        format!("{} {}", self.marker(), name)
    }

    /// Finds the first marker present anywhere in `name`.
    pub fn detect(name: &str) -> Option<StatusTag> {
        Self::ALL.into_iter().find(|tag| name.contains(tag.marker()))
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}
