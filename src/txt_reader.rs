use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::reader::{BookReader, Fragment};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Passes plain text through, replacing invalid UTF-8 with U+FFFD
pub struct TxtReader;

impl BookReader for TxtReader {
    fn format(&self) -> Format {
        Format::Txt
    }

    fn extract(&self, path: &Path) -> Result<Vec<Fragment>> {
        info!(path = %path.display(), "Loading plain text content");
        let bytes = fs::read(path).map_err(|e| ConvertError::io(path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        if matches!(text, Cow::Owned(_)) {
            warn!(path = %path.display(), "Replaced invalid UTF-8 sequences");
        }
        Ok(vec![Fragment::text(text.into_owned())])
    }
}
