use crate::error::Result;
use crate::format::Format;
use std::path::Path;

/// Whether a fragment is plain text already or still carries markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Text,
    Markup,
}

/// One logical unit of a source document: an EPUB item, a PDF page, a whole TXT/MOBI book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub kind: FragmentKind,
}

impl Fragment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: FragmentKind::Text,
        }
    }

    pub fn markup(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: FragmentKind::Markup,
        }
    }
}

/// Trait for format-specific extractors (EPUB, TXT, PDF, MOBI)
pub trait BookReader {
    /// The format this reader handles
    fn format(&self) -> Format;
    /// Read the whole input and return its fragments in source order, or
    /// fail without partial results
    fn extract(&self, path: &Path) -> Result<Vec<Fragment>>;
}
