use crate::format::Format;
use std::io;
use std::path::PathBuf;

/// Errors produced while converting an ebook to plain text
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Input path does not exist; raised before any extractor runs
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Format tag outside {.epub, .txt, .pdf, .mobi}
    #[error("unsupported format: {0:?}")]
    UnsupportedFormat(String),

    /// A parsing capability is not built into this binary
    #[error("{capability} is unavailable: {reason}")]
    CapabilityUnavailable {
        capability: &'static str,
        reason: String,
    },

    /// The parsing capability failed on the document content
    #[error("failed to extract {format} text: {message}")]
    Parse { format: Format, message: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    pub(crate) fn parse(format: Format, message: impl ToString) -> Self {
        ConvertError::Parse {
            format,
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
