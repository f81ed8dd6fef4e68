//! Convert ebooks (EPUB, TXT, PDF, MOBI) to plain text.
//!
//! The [`Converter`] picks a [`BookReader`] by [`Format`], collects the
//! book's fragments in source order, optionally cleans them, joins them with
//! a blank line and writes the result in one go.

pub mod converter;
pub mod epub_reader;
pub mod error;
pub mod format;
pub mod markup;
pub mod mobi_reader;
pub mod normalizer;
pub mod pdf_reader;
pub mod reader;
pub mod txt_reader;

pub use converter::{ConvertOptions, Converter, ExtractionRequest};
pub use error::{ConvertError, Result};
pub use format::Format;
pub use normalizer::Normalization;
pub use reader::{BookReader, Fragment, FragmentKind};
