use crate::error::{ConvertError, Result};
use std::fmt;
use std::path::Path;

/// Input formats recognised by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Epub,
    Txt,
    Pdf,
    Mobi,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Epub, Format::Txt, Format::Pdf, Format::Mobi];

    /// Match a leading-dot extension tag such as `.EPUB`, ignoring ASCII case.
    pub fn from_tag(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ConvertError::UnsupportedFormat(tag.to_string()))
    }

    /// Leading-dot tag of a file's extension, as accepted by [`Format::from_tag`].
    /// Empty when the path has no extension.
    pub fn tag_of(path: &Path) -> String {
        path.extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }

    pub fn tag(self) -> &'static str {
        match self {
            Format::Epub => ".epub",
            Format::Txt => ".txt",
            Format::Pdf => ".pdf",
            Format::Mobi => ".mobi",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Epub => "EPUB",
            Format::Txt => "TXT",
            Format::Pdf => "PDF",
            Format::Mobi => "MOBI",
        };
        f.write_str(name)
    }
}
