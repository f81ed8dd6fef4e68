use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::markup::{HtmlMarkup, MarkupParser};
use crate::reader::{BookReader, Fragment};
use quick_xml::events::Event;
use quick_xml::Reader;
use rbook::prelude::*;
use rbook::Epub;
use std::path::Path;
use tracing::{debug, info, warn};

/// Media types treated as document items
const DOCUMENT_MEDIA_TYPES: [&str; 2] = ["application/xhtml+xml", "text/html"];

/// Reads every document item of an EPUB container, in manifest order, and
/// strips its markup. Items outside the spine (such as the navigation
/// document) are included.
pub struct EpubReader {
    exclude_tags: Vec<String>,
}

impl EpubReader {
    pub fn new(exclude_tags: Vec<String>) -> Self {
        Self { exclude_tags }
    }

    fn open(path: &Path) -> Result<Epub> {
        Epub::options()
            .strict(false)
            .open(path)
            .map_err(|e| ConvertError::parse(Format::Epub, format!("failed to open container: {e}")))
    }
}

/// Ids of the document items declared in an OPF manifest, in declaration order
pub(crate) fn document_item_ids(opf: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(opf);
    let mut in_manifest = false;
    let mut ids = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"manifest" => in_manifest = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"manifest" => in_manifest = false,
            Ok(Event::Start(e) | Event::Empty(e))
                if in_manifest && e.local_name().as_ref() == b"item" =>
            {
                let mut id = None;
                let mut media_type = None;
                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"id" => id = attr.unescape_value().ok().map(|v| v.into_owned()),
                        b"media-type" => {
                            media_type = attr.unescape_value().ok().map(|v| v.into_owned())
                        }
                        _ => {}
                    }
                }
                if let (Some(id), Some(media_type)) = (id, media_type) {
                    if DOCUMENT_MEDIA_TYPES.iter().any(|t| *t == media_type.trim()) {
                        ids.push(id);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ConvertError::parse(
                    Format::Epub,
                    format!("malformed package document: {e}"),
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(ids)
}

impl BookReader for EpubReader {
    fn format(&self) -> Format {
        Format::Epub
    }

    fn extract(&self, path: &Path) -> Result<Vec<Fragment>> {
        info!(path = %path.display(), "Loading EPUB content");
        let epub = Self::open(path)?;
        let opf = epub.read_resource_bytes(epub.package_file()).map_err(|e| {
            ConvertError::parse(Format::Epub, format!("failed to read package document: {e}"))
        })?;
        let manifest = epub.manifest();
        let markup = HtmlMarkup::new(Format::Epub);

        let mut fragments = Vec::new();
        for id in document_item_ids(&opf)? {
            let Some(entry) = manifest.by_id(&id) else {
                warn!(id = %id, "Manifest item not resolved by container");
                continue;
            };
            let bytes = entry.read_bytes().map_err(|e| {
                ConvertError::parse(Format::Epub, format!("failed to read document item {id}: {e}"))
            })?;
            let tree = markup.parse(&bytes)?;
            let text = markup.extract_text(&tree, &self.exclude_tags);
            debug!(id = %id, chars = text.len(), "Parsed document item");
            fragments.push(Fragment::text(text));
        }

        info!(items = fragments.len(), "Finished loading EPUB content");
        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
  <metadata/>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="css" href="style.css" media-type="text/css"/>
    <item id="one" href="one.xhtml" media-type="application/xhtml+xml"/>
    <item id="legacy" href="old.html" media-type="text/html"></item>
    <item id="two" href="two.xhtml" media-type="application/xhtml+xml"/>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
  </manifest>
  <spine><itemref idref="two"/><itemref idref="one"/></spine>
</package>"#;

    #[test]
    fn test_manifest_order_not_spine_order() {
        let ids = document_item_ids(OPF.as_bytes()).unwrap();
        assert_eq!(ids, ["nav", "one", "legacy", "two"]);
    }

    #[test]
    fn test_items_outside_manifest_are_ignored() {
        let opf = r#"<package><guide><item id="g" media-type="text/html"/></guide>
<manifest><item id="a" media-type="application/xhtml+xml"/></manifest></package>"#;
        assert_eq!(document_item_ids(opf.as_bytes()).unwrap(), ["a"]);
    }

    #[test]
    fn test_malformed_package_is_parse_error() {
        let err = document_item_ids(b"<package><manifest></package>").unwrap_err();
        assert!(matches!(err, ConvertError::Parse { format: Format::Epub, .. }));
    }
}
