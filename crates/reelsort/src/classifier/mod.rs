pub mod content;
pub mod extension;

pub use content::{ContentClassification, ContentClassifier, DirFile};
pub use extension::{extension_of, ExtensionClassifier};
