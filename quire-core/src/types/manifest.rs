//! OPF `<manifest>`: every file in the package

use crate::xml::{write_parent, WriteXml, XmlResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// A single manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub id: String,
    pub href: String,
    pub media_type: String,
}

/// Ordered list of package files.
///
/// Id uniqueness is the caller's responsibility; the document's id allocator
/// guarantees it for everything added through [`Document`](crate::Document).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    items: Vec<ManifestItem>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, id: &str, href: &str, media_type: &str) {
        self.items.push(ManifestItem {
            id: id.to_string(),
            href: href.to_string(),
            media_type: media_type.to_string(),
        });
    }

    pub fn items(&self) -> &[ManifestItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&ManifestItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains_href(&self, href: &str) -> bool {
        self.items.iter().any(|item| item.href == href)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl WriteXml for Manifest {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        write_parent(
            writer,
            BytesStart::new("manifest"),
            !self.items.is_empty(),
            |writer| {
                for item in &self.items {
                    let mut elem = BytesStart::new("item");
                    elem.push_attribute(("id", item.id.as_str()));
                    elem.push_attribute(("href", item.href.as_str()));
                    elem.push_attribute(("media-type", item.media_type.as_str()));
                    writer.write_event(Event::Empty(elem))?;
                }
                Ok(())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::new_writer;

    #[test]
    fn test_items_render_in_insertion_order() {
        let mut manifest = Manifest::new();
        manifest.add_item("ncx", "toc.ncx", "application/x-dtbncx+xml");
        manifest.add_item("html1", "text/ch1.xhtml", "application/xhtml+xml");
        manifest.add_item("img1", "images/cover.png", "image/png");

        let mut writer = new_writer();
        manifest.write_xml(&mut writer).unwrap();
        let xml = String::from_utf8(writer.into_inner().into_inner()).unwrap();

        assert_eq!(xml.matches("<item ").count(), 3);
        assert!(xml.contains(
            r#"<item id="html1" href="text/ch1.xhtml" media-type="application/xhtml+xml"/>"#
        ));
        assert!(xml.find("ncx").unwrap() < xml.find("html1").unwrap());
        assert!(xml.find("html1").unwrap() < xml.find("img1").unwrap());
    }

    #[test]
    fn test_lookup() {
        let mut manifest = Manifest::new();
        manifest.add_item("css1", "style.css", "text/css");
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get("css1").unwrap().href, "style.css");
        assert!(manifest.contains_href("style.css"));
        assert!(!manifest.contains_href("other.css"));
    }
}
