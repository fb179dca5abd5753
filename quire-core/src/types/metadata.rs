//! OPF `<metadata>` block (Dublin Core with generic meta extensions)

use super::{DcItem, Item};
use crate::xml::{WriteXml, XmlResult, NS_DC, NS_OPF};
use chrono::NaiveDate;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// MARC relator code for authors
pub const ROLE_AUTHOR: &str = "aut";

/// MARC relator code for translators
pub const ROLE_TRANSLATOR: &str = "trl";

/// Accumulated package metadata. No validation is performed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    items: Vec<Item>,
    dc_items: Vec<DcItem>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_author(&mut self, name: &str) {
        self.add_creator(name, ROLE_AUTHOR);
    }

    pub fn add_translator(&mut self, name: &str) {
        self.add_creator(name, ROLE_TRANSLATOR);
    }

    pub fn add_creator(&mut self, name: &str, role: &str) {
        self.push(DcItem::new("creator", name).with_opf_attribute("role", role));
    }

    pub fn add_contributor(&mut self, name: &str, role: &str) {
        self.push(DcItem::new("contributor", name).with_opf_attribute("role", role));
    }

    pub fn add_title(&mut self, title: &str) {
        self.push(DcItem::new("title", title));
    }

    pub fn add_subject(&mut self, subject: &str) {
        self.push(DcItem::new("subject", subject));
    }

    pub fn add_description(&mut self, description: &str) {
        self.push(DcItem::new("description", description));
    }

    pub fn add_type(&mut self, kind: &str) {
        self.push(DcItem::new("type", kind));
    }

    pub fn add_format(&mut self, format: &str) {
        self.push(DcItem::new("format", format));
    }

    pub fn add_language(&mut self, language: &str) {
        self.push(DcItem::new("language", language));
    }

    pub fn add_relation(&mut self, relation: &str) {
        self.push(DcItem::new("relation", relation));
    }

    pub fn add_rights(&mut self, rights: &str) {
        self.push(DcItem::new("rights", rights));
    }

    pub fn add_publisher(&mut self, publisher: &str) {
        self.push(DcItem::new("publisher", publisher));
    }

    /// Publication date, rendered as `YYYY-MM-DD`
    pub fn add_date(&mut self, date: NaiveDate) {
        self.push(DcItem::new("date", date.format("%Y-%m-%d").to_string()));
    }

    /// Add a `dc:identifier` carrying element id `id`.
    ///
    /// `scheme` becomes `opf:scheme` when non-empty.
    pub fn add_book_identifier(&mut self, id: &str, value: &str, scheme: &str) {
        let mut item = DcItem::new("identifier", value).with_attribute("id", id);
        if !scheme.is_empty() {
            item.set_opf_attribute("scheme", scheme);
        }
        self.push(item);
    }

    /// Add a generic `<meta>` item
    pub fn add_item(&mut self, name: &str, value: &str) {
        self.items.push(Item::new(name, value));
    }

    /// Add an arbitrary Dublin Core element
    pub fn push(&mut self, item: DcItem) {
        self.dc_items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn dc_items(&self) -> &[DcItem] {
        &self.dc_items
    }

    /// Iterate over Dublin Core elements named `name`
    pub fn dc_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DcItem> + 'a {
        self.dc_items.iter().filter(move |item| item.name == name)
    }
}

impl WriteXml for Metadata {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        let mut elem = BytesStart::new("metadata");
        elem.push_attribute(("xmlns:dc", NS_DC));
        elem.push_attribute(("xmlns:opf", NS_OPF));
        writer.write_event(Event::Start(elem))?;

        for item in &self.items {
            item.write_xml(writer)?;
        }
        for item in &self.dc_items {
            item.write_xml(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("metadata")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::new_writer;

    fn render(metadata: &Metadata) -> String {
        let mut writer = new_writer();
        metadata.write_xml(&mut writer).unwrap();
        String::from_utf8(writer.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_meta_items_render_before_dublin_core() {
        let mut metadata = Metadata::new();
        metadata.add_title("First");
        metadata.add_item("cover", "img1");
        metadata.add_language("en");

        let xml = render(&metadata);
        let meta = xml.find("<meta name=\"cover\"").unwrap();
        let title = xml.find("<dc:title>First</dc:title>").unwrap();
        let lang = xml.find("<dc:language>en</dc:language>").unwrap();
        assert!(meta < title);
        assert!(title < lang);
    }

    #[test]
    fn test_creator_roles() {
        let mut metadata = Metadata::new();
        metadata.add_author("A. Writer");
        metadata.add_translator("T. Lator");
        metadata.add_contributor("E. Ditor", "edt");

        let xml = render(&metadata);
        assert!(xml.contains(r#"<dc:creator opf:role="aut">A. Writer</dc:creator>"#));
        assert!(xml.contains(r#"<dc:creator opf:role="trl">T. Lator</dc:creator>"#));
        assert!(xml.contains(r#"<dc:contributor opf:role="edt">E. Ditor</dc:contributor>"#));
    }

    #[test]
    fn test_identifier_scheme_is_optional() {
        let mut metadata = Metadata::new();
        metadata.add_book_identifier("BookId", "urn:uuid:1234", "");
        metadata.add_book_identifier("id1", "978-3-16-148410-0", "ISBN");

        let xml = render(&metadata);
        assert!(xml.contains(r#"<dc:identifier id="BookId">urn:uuid:1234</dc:identifier>"#));
        assert!(xml.contains(
            r#"<dc:identifier opf:scheme="ISBN" id="id1">978-3-16-148410-0</dc:identifier>"#
        ));
    }

    #[test]
    fn test_date_format() {
        let mut metadata = Metadata::new();
        metadata.add_date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert!(render(&metadata).contains("<dc:date>2024-03-09</dc:date>"));
    }

    #[test]
    fn test_namespaces_declared() {
        let xml = render(&Metadata::new());
        assert!(xml.contains(r#"xmlns:dc="http://purl.org/dc/elements/1.1/""#));
        assert!(xml.contains(r#"xmlns:opf="http://www.idpf.org/2007/opf""#));
    }
}
