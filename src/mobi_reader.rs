use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::reader::{BookReader, Fragment};
use mobi::Mobi;
use std::fs;
use std::path::Path;
use tracing::info;

/// Decodes the book markup of a MOBI file; the markup itself is left in place
pub struct MobiReader;

impl BookReader for MobiReader {
    fn format(&self) -> Format {
        Format::Mobi
    }

    fn extract(&self, path: &Path) -> Result<Vec<Fragment>> {
        info!(path = %path.display(), "Loading MOBI content");
        let bytes = fs::read(path).map_err(|e| ConvertError::io(path, e))?;

        let book = Mobi::new(bytes).map_err(|e| {
            let message = e.to_string();
            if message.contains("drm") || message.contains("encrypted") {
                ConvertError::parse(Format::Mobi, format!("DRM-protected book: {message}"))
            } else {
                ConvertError::parse(Format::Mobi, message)
            }
        })?;

        // Lossy: Calibre output often mixes encodings inside text records
        let markup = book.content_as_string_lossy();
        info!(title = %book.title(), chars = markup.len(), "Finished loading MOBI content");
        Ok(vec![Fragment::markup(markup)])
    }
}
