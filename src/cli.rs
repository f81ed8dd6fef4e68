use anyhow::{Context, Result};
use clap::Parser;
use ebook2txt::markup::default_excluded_tags;
use ebook2txt::{ConvertOptions, Format, Normalization};
use std::path::PathBuf;

/// Convert EPUB, TXT, PDF and MOBI ebooks to plain text
#[derive(Parser, Debug)]
#[command(name = "ebook2txt", version, about)]
pub struct Cli {
    /// Path to the input ebook
    pub input: PathBuf,

    /// Output text file. Defaults to `<input name>.txt` in the current directory.
    pub output: Option<PathBuf>,

    /// Format tag such as `.epub` (case-insensitive). Defaults to the input's extension.
    pub format: Option<String>,

    /// Which formats get whitespace and markup cleanup
    #[arg(long, value_enum, default_value_t = Normalization::Default)]
    pub normalize: Normalization,

    /// Markup element whose text is skipped (repeatable). Defaults to script and style.
    #[arg(long = "exclude-tag", value_name = "TAG")]
    pub exclude_tags: Vec<String>,

    /// Log more (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn output_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.output {
            return Ok(path.clone());
        }
        let stem = self
            .input
            .file_stem()
            .context("Input file has no name")?
            .to_string_lossy();
        Ok(PathBuf::from(format!("{}.txt", stem)))
    }

    pub fn format_tag(&self) -> String {
        match self.format {
            Some(ref tag) => tag.clone(),
            None => Format::tag_of(&self.input),
        }
    }

    pub fn options(&self) -> ConvertOptions {
        let exclude_tags = if self.exclude_tags.is_empty() {
            default_excluded_tags()
        } else {
            self.exclude_tags.clone()
        };
        ConvertOptions {
            normalization: self.normalize,
            exclude_tags,
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
