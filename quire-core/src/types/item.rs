//! Leaf metadata values: `<meta>` items and Dublin Core elements

use crate::xml::{WriteXml, XmlResult};
use indexmap::IndexMap;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Generic `<meta name="..." content="..."/>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub value: String,
}

impl Item {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl WriteXml for Item {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        let mut elem = BytesStart::new("meta");
        elem.push_attribute(("name", self.name.as_str()));
        elem.push_attribute(("content", self.value.as_str()));
        writer.write_event(Event::Empty(elem))?;
        Ok(())
    }
}

/// A single Dublin Core element such as `dc:title` or `dc:creator`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DcItem {
    /// Element name without the `dc:` prefix
    pub name: String,

    /// Text content
    pub value: String,

    /// Plain attributes (e.g. `id`)
    attributes: IndexMap<String, String>,

    /// Attributes in the OPF namespace (e.g. `opf:role`)
    opf_attributes: IndexMap<String, String>,
}

impl DcItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            attributes: IndexMap::new(),
            opf_attributes: IndexMap::new(),
        }
    }

    /// Set a plain attribute, replacing any previous value for `name`
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Set an `opf:`-prefixed attribute, replacing any previous value for `name`
    pub fn set_opf_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.opf_attributes.insert(name.into(), value.into());
    }

    /// Builder form of [`set_attribute`](Self::set_attribute)
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`set_opf_attribute`](Self::set_opf_attribute)
    pub fn with_opf_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_opf_attribute(name, value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn opf_attribute(&self, name: &str) -> Option<&str> {
        self.opf_attributes.get(name).map(String::as_str)
    }
}

impl WriteXml for DcItem {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        let tag = format!("dc:{}", self.name);
        let mut elem = BytesStart::new(tag.as_str());

        for (key, value) in &self.opf_attributes {
            let qualified = format!("opf:{key}");
            elem.push_attribute((qualified.as_str(), value.as_str()));
        }
        for (key, value) in &self.attributes {
            elem.push_attribute((key.as_str(), value.as_str()));
        }

        writer.write_event(Event::Start(elem))?;
        writer.write_event(Event::Text(BytesText::new(&self.value)))?;
        writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::new_writer;

    fn render<T: WriteXml>(value: &T) -> String {
        let mut writer = new_writer();
        value.write_xml(&mut writer).unwrap();
        String::from_utf8(writer.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_item_renders_meta() {
        let xml = render(&Item::new("cover", "img1"));
        assert_eq!(xml, r#"<meta name="cover" content="img1"/>"#);
    }

    #[test]
    fn test_dc_item_attribute_order() {
        let item = DcItem::new("identifier", "978-0-00-000000-0")
            .with_attribute("id", "id1")
            .with_opf_attribute("scheme", "ISBN");
        let xml = render(&item);
        assert_eq!(
            xml,
            r#"<dc:identifier opf:scheme="ISBN" id="id1">978-0-00-000000-0</dc:identifier>"#
        );
    }

    #[test]
    fn test_dc_item_repeated_key_replaces() {
        let mut item = DcItem::new("creator", "Jane Doe");
        item.set_opf_attribute("role", "aut");
        item.set_opf_attribute("file-as", "Doe, Jane");
        item.set_opf_attribute("role", "edt");

        assert_eq!(item.opf_attribute("role"), Some("edt"));
        let xml = render(&item);
        assert!(xml.contains(r#"opf:role="edt" opf:file-as="Doe, Jane""#));
    }

    #[test]
    fn test_dc_item_escapes_text() {
        let xml = render(&DcItem::new("title", "Salt & <Pepper>"));
        assert!(xml.contains("Salt &amp; &lt;Pepper&gt;"));
    }
}
