//! Markup-to-text capability.
//!
//! Parsing and text extraction are kept behind [`MarkupParser`] so extractors
//! only depend on "bytes in, tree out, text out". [`HtmlMarkup`] backs it with
//! `scraper` (html5ever), which is lenient enough for both XHTML from EPUB
//! containers and the tag soup found in MOBI books.

use crate::error::{ConvertError, Result};
use crate::format::Format;
use scraper::{ElementRef, Html};

/// Element names skipped by default when collecting text
pub const DEFAULT_EXCLUDED_TAGS: &[&str] = &["script", "style"];

/// Elements that start a new line in the extracted text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "nav", "ol",
    "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

pub trait MarkupParser {
    type Tree;

    fn parse(&self, bytes: &[u8]) -> Result<Self::Tree>;

    /// Concatenate text nodes in document order, skipping `exclude` subtrees
    fn extract_text(&self, tree: &Self::Tree, exclude: &[String]) -> String;
}

/// HTML/XHTML parser; `format` only labels decode errors
#[derive(Debug, Clone, Copy)]
pub struct HtmlMarkup {
    format: Format,
}

impl HtmlMarkup {
    pub fn new(format: Format) -> Self {
        Self { format }
    }
}

impl MarkupParser for HtmlMarkup {
    type Tree = Html;

    fn parse(&self, bytes: &[u8]) -> Result<Html> {
        let source = std::str::from_utf8(bytes)
            .map_err(|e| ConvertError::parse(self.format, format!("markup is not UTF-8: {e}")))?;
        Ok(Html::parse_document(source))
    }

    fn extract_text(&self, tree: &Html, exclude: &[String]) -> String {
        let mut out = String::new();
        collect_text(tree.root_element(), exclude, &mut out);
        out
    }
}

fn collect_text(element: ElementRef<'_>, exclude: &[String], out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if exclude.iter().any(|tag| tag.eq_ignore_ascii_case(name)) {
            continue;
        }
        if name == "br" {
            out.push(' ');
            continue;
        }
        let block = BLOCK_TAGS.iter().any(|tag| *tag == name);
        if block {
            out.push('\n');
        }
        collect_text(child, exclude, out);
        if block {
            out.push('\n');
        }
    }
}

pub fn default_excluded_tags() -> Vec<String> {
    DEFAULT_EXCLUDED_TAGS.iter().map(|t| t.to_string()).collect()
}

/// Parse `bytes` as HTML and return its visible text (not yet normalized)
pub fn markup_to_text(format: Format, bytes: &[u8], exclude: &[String]) -> Result<String> {
    let parser = HtmlMarkup::new(format);
    let tree = parser.parse(bytes)?;
    Ok(parser.extract_text(&tree, exclude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;

    fn text_of(html: &str) -> String {
        markup_to_text(Format::Epub, html.as_bytes(), &default_excluded_tags()).unwrap()
    }

    #[test]
    fn test_script_and_style_are_dropped() {
        let html = "<html><head><style>p { color: red }</style></head>\
                    <body><p>Text</p><script>alert('hi');</script><p>More text</p></body></html>";
        let text = normalize(&text_of(html));
        assert_eq!(text, "Text\nMore text");
    }

    #[test]
    fn test_line_break_becomes_space() {
        assert_eq!(normalize(&text_of("<p>Second<br>Chapter</p>")), "Second Chapter");
        assert_eq!(normalize(&text_of("<p>Second<br/>Chapter</p>")), "Second Chapter");
    }

    #[test]
    fn test_inline_elements_do_not_split() {
        assert_eq!(
            normalize(&text_of("<p>Hello <b>bold</b> <i>world</i>!</p>")),
            "Hello bold world!"
        );
    }

    #[test]
    fn test_blocks_split_lines() {
        let html = "<div><h1>Title</h1><p>one</p><ul><li>a</li><li>b</li></ul></div>";
        assert_eq!(normalize(&text_of(html)), "Title\none\na\nb");
    }

    #[test]
    fn test_custom_exclusions() {
        let exclude = vec!["NAV".to_string()];
        let text = markup_to_text(
            Format::Epub,
            b"<nav>Contents</nav><p>Body</p>",
            &exclude,
        )
        .unwrap();
        assert_eq!(normalize(&text), "Body");
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let err = markup_to_text(Format::Epub, b"<p>\xff\xfe</p>", &[]).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Parse {
                format: Format::Epub,
                ..
            }
        ));
    }
}
