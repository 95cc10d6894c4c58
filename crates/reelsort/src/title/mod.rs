pub mod extractor;

pub use extractor::{title_case, Normalized, TitleExtractor};

/// A recognized movie: both fields are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleYear {
    pub title: String,
    pub year: String,
}

impl TitleYear {
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
        }
    }

    /// `"Title (Year)"`, before banned characters are stripped.
    pub fn canonical_name(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}
