//! PDF text extraction through a prioritised chain of page sources.
//!
//! Each [`PageSource`] wraps one PDF library. Sources are tried in order: a
//! source that is not built into this binary reports
//! [`ConvertError::CapabilityUnavailable`] and the next one is tried. Any
//! other error ends the extraction. Running out of sources is fatal.

use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::reader::{BookReader, Fragment};
use std::path::Path;
use tracing::{debug, info, warn};

/// A PDF library able to return text per page, in page order
pub trait PageSource {
    fn name(&self) -> &'static str;
    fn pages(&self, path: &Path) -> Result<Vec<String>>;
}

#[cfg(not(all(feature = "pdf-pages", feature = "pdf-text")))]
fn unavailable(capability: &'static str, feature: &str) -> ConvertError {
    ConvertError::CapabilityUnavailable {
        capability,
        reason: format!("built without the `{feature}` feature"),
    }
}

/// Page-oriented reader backed by `lopdf`
pub struct LopdfPages;

impl PageSource for LopdfPages {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    #[cfg(feature = "pdf-pages")]
    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        let doc = lopdf::Document::load(path)
            .map_err(|e| ConvertError::parse(Format::Pdf, format!("lopdf: {e}")))?;
        // BTreeMap keyed by page number
        doc.get_pages()
            .keys()
            .map(|&number| {
                doc.extract_text(&[number]).map_err(|e| {
                    ConvertError::parse(Format::Pdf, format!("lopdf page {number}: {e}"))
                })
            })
            .collect()
    }

    #[cfg(not(feature = "pdf-pages"))]
    fn pages(&self, _path: &Path) -> Result<Vec<String>> {
        Err(unavailable(self.name(), "pdf-pages"))
    }
}

/// Per-page reader backed by `pdf-extract`
pub struct PdfExtractText;

impl PageSource for PdfExtractText {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    #[cfg(feature = "pdf-text")]
    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        pdf_extract::extract_text_by_pages(path)
            .map_err(|e| ConvertError::parse(Format::Pdf, format!("pdf-extract: {e}")))
    }

    #[cfg(not(feature = "pdf-text"))]
    fn pages(&self, _path: &Path) -> Result<Vec<String>> {
        Err(unavailable(self.name(), "pdf-text"))
    }
}

pub struct PdfReader {
    sources: Vec<Box<dyn PageSource>>,
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new(vec![Box::new(LopdfPages), Box::new(PdfExtractText)])
    }
}

impl PdfReader {
    pub fn new(sources: Vec<Box<dyn PageSource>>) -> Self {
        Self { sources }
    }

    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        let mut last_absence = None;
        for source in &self.sources {
            match source.pages(path) {
                Ok(pages) => {
                    info!(source = source.name(), pages = pages.len(), "Extracted PDF pages");
                    return Ok(pages);
                }
                Err(err @ ConvertError::CapabilityUnavailable { .. }) => {
                    warn!(source = source.name(), "{err}; trying next PDF reader");
                    last_absence = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_absence.unwrap_or_else(|| ConvertError::CapabilityUnavailable {
            capability: "PDF reader",
            reason: "no PDF reader configured".to_string(),
        }))
    }
}

impl BookReader for PdfReader {
    fn format(&self) -> Format {
        Format::Pdf
    }

    fn extract(&self, path: &Path) -> Result<Vec<Fragment>> {
        info!(path = %path.display(), "Loading PDF content");
        let pages = self.pages(path)?;
        debug!(
            pages = pages.len(),
            chars = pages.iter().map(String::len).sum::<usize>(),
            "Read PDF pages"
        );
        Ok(pages.into_iter().map(Fragment::text).collect())
    }
}
