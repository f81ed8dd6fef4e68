use crate::epub_reader::EpubReader;
use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::markup::{default_excluded_tags, markup_to_text};
use crate::mobi_reader::MobiReader;
use crate::normalizer::{join_fragments, normalize, Normalization};
use crate::pdf_reader::PdfReader;
use crate::reader::{BookReader, Fragment, FragmentKind};
use crate::txt_reader::TxtReader;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// One conversion: where to read, where to write, and which extractor to use
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: Format,
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub normalization: Normalization,
    /// Markup elements whose text is never extracted
    pub exclude_tags: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            normalization: Normalization::Default,
            exclude_tags: default_excluded_tags(),
        }
    }
}

pub struct Converter {
    options: ConvertOptions,
    epub: EpubReader,
    pdf: PdfReader,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        let epub = EpubReader::new(options.exclude_tags.clone());
        Self {
            options,
            epub,
            pdf: PdfReader::default(),
        }
    }

    /// Replace the PDF capability chain
    pub fn with_pdf_reader(mut self, pdf: PdfReader) -> Self {
        self.pdf = pdf;
        self
    }

    fn reader(&self, format: Format) -> &dyn BookReader {
        match format {
            Format::Epub => &self.epub,
            Format::Txt => &TxtReader,
            Format::Pdf => &self.pdf,
            Format::Mobi => &MobiReader,
        }
    }

    /// Check the input, resolve a leading-dot format tag, then convert.
    pub fn dispatch(&self, input: &Path, output: &Path, tag: &str) -> Result<()> {
        check_input(input)?;
        let format = Format::from_tag(tag)?;
        self.convert(&ExtractionRequest {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            format,
        })
    }

    /// Extract, clean and write one book whose format is already resolved.
    ///
    /// Public entry point for callers that build an [`ExtractionRequest`]
    /// themselves, so the input is checked here as well as in
    /// [`Converter::dispatch`]. The output is written once, at the end; on
    /// any error it is left untouched.
    pub fn convert(&self, request: &ExtractionRequest) -> Result<()> {
        check_input(&request.input)?;

        let reader = self.reader(request.format);
        info!(
            input = %request.input.display(),
            format = %reader.format(),
            "Converting to plain text"
        );
        let fragments = reader.extract(&request.input)?;
        let count = fragments.len();
        let text = self.render(request.format, fragments)?;

        write_output(&request.output, &text)?;
        info!(
            output = %request.output.display(),
            fragments = count,
            bytes = text.len(),
            "Wrote plain text"
        );
        Ok(())
    }

    fn render(&self, format: Format, fragments: Vec<Fragment>) -> Result<String> {
        let normalized = self.options.normalization.applies_to(format);
        let mut texts = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let text = match (normalized, fragment.kind) {
                (false, _) => fragment.text,
                (true, FragmentKind::Text) => normalize(&fragment.text),
                (true, FragmentKind::Markup) => normalize(&markup_to_text(
                    format,
                    fragment.text.as_bytes(),
                    &self.options.exclude_tags,
                )?),
            };
            texts.push(text);
        }
        Ok(join_fragments(&texts))
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

fn check_input(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ConvertError::NotFound(path.to_path_buf()))
    }
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))?;
        }
    }
    fs::write(path, text).map_err(|e| ConvertError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_leaves_mobi_markup() {
        let converter = Converter::default();
        let fragments = vec![Fragment::markup("<p>Raw  <b>markup</b></p>")];
        let text = converter.render(Format::Mobi, fragments).unwrap();
        assert_eq!(text, "<p>Raw  <b>markup</b></p>");
    }

    #[test]
    fn test_render_all_strips_mobi_markup() {
        let converter = Converter::new(ConvertOptions {
            normalization: Normalization::All,
            ..ConvertOptions::default()
        });
        let fragments = vec![Fragment::markup(
            "<html><body><p>Raw  <b>markup</b></p><script>x()</script></body></html>",
        )];
        let text = converter.render(Format::Mobi, fragments).unwrap();
        assert_eq!(text, "Raw\nmarkup");
    }

    #[test]
    fn test_render_off_keeps_epub_whitespace() {
        let converter = Converter::new(ConvertOptions {
            normalization: Normalization::Off,
            ..ConvertOptions::default()
        });
        let fragments = vec![Fragment::text("  a  b "), Fragment::text("c")];
        let text = converter.render(Format::Epub, fragments).unwrap();
        assert_eq!(text, "  a  b \n\nc");
    }

    #[test]
    fn test_convert_request_checks_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");
        let request = ExtractionRequest {
            input: dir.path().join("missing.mobi"),
            output: output.clone(),
            format: Format::Mobi,
        };
        let err = Converter::default().convert(&request).unwrap_err();
        assert!(matches!(err, ConvertError::NotFound(ref p) if p == &request.input));
        assert!(!output.exists());
    }
}
