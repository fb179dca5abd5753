//! NCX navigation document (`toc.ncx`)

use super::NavPoint;
use crate::xml::{new_writer, write_declaration, write_text_element, WriteXml, XmlResult, NS_NCX};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

const NCX_DOCTYPE: &str =
    r#"ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd""#;

// Head values are fixed placeholders, not computed from the navMap.
const DTB_DEPTH: &str = "1";
const DTB_TOTAL_PAGE_COUNT: &str = "0";
const DTB_MAX_PAGE_NUMBER: &str = "0";

/// Navigation control document.
///
/// Duplicates the title and authors from the OPF metadata because some
/// reading systems only look here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ncx {
    title: String,
    authors: Vec<String>,
    uid: String,
    nav_points: Vec<NavPoint>,
}

impl Ncx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_uid(&mut self, uid: &str) {
        self.uid = uid.to_string();
    }

    pub fn add_author(&mut self, author: &str) {
        self.authors.push(author.to_string());
    }

    /// Append a title. Every call prepends a single space, the first included.
    pub fn add_title(&mut self, title: &str) {
        self.title.push(' ');
        self.title.push_str(title);
    }

    /// Replace the accumulated title
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Append a top-level navigation point with a caller-allocated id
    pub fn add_nav_point(
        &mut self,
        label: &str,
        id: String,
        content: &str,
        play_order: u32,
    ) -> &mut NavPoint {
        self.nav_points.push(NavPoint::new(label, id, content, play_order));
        let last = self.nav_points.len() - 1;
        &mut self.nav_points[last]
    }

    /// Find a navigation point anywhere in the tree
    pub fn find_mut(&mut self, id: &str) -> Option<&mut NavPoint> {
        self.nav_points.iter_mut().find_map(|point| point.find_mut(id))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn nav_points(&self) -> &[NavPoint] {
        &self.nav_points
    }

    /// Render the complete NCX document, doctype included
    pub fn to_xml(&self) -> XmlResult<Vec<u8>> {
        let mut writer = new_writer();
        write_declaration(&mut writer)?;
        writer.write_event(Event::DocType(BytesText::from_escaped(NCX_DOCTYPE)))?;
        self.write_xml(&mut writer)?;
        Ok(writer.into_inner().into_inner())
    }

    fn write_head<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        writer.write_event(Event::Start(BytesStart::new("head")))?;
        for (name, content) in [
            ("dtb:uid", self.uid.as_str()),
            ("dtb:depth", DTB_DEPTH),
            ("dtb:totalPageCount", DTB_TOTAL_PAGE_COUNT),
            ("dtb:maxPageNumber", DTB_MAX_PAGE_NUMBER),
        ] {
            let mut elem = BytesStart::new("meta");
            elem.push_attribute(("name", name));
            elem.push_attribute(("content", content));
            writer.write_event(Event::Empty(elem))?;
        }
        writer.write_event(Event::End(BytesEnd::new("head")))?;
        Ok(())
    }
}

impl WriteXml for Ncx {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        let mut elem = BytesStart::new("ncx");
        elem.push_attribute(("xmlns", NS_NCX));
        elem.push_attribute(("version", "2005-1"));
        writer.write_event(Event::Start(elem))?;

        self.write_head(writer)?;

        writer.write_event(Event::Start(BytesStart::new("docTitle")))?;
        write_text_element(writer, "text", &self.title)?;
        writer.write_event(Event::End(BytesEnd::new("docTitle")))?;

        for author in &self.authors {
            writer.write_event(Event::Start(BytesStart::new("docAuthor")))?;
            write_text_element(writer, "text", author)?;
            writer.write_event(Event::End(BytesEnd::new("docAuthor")))?;
        }

        writer.write_event(Event::Start(BytesStart::new("navMap")))?;
        for point in &self.nav_points {
            point.write_xml(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("navMap")))?;

        writer.write_event(Event::End(BytesEnd::new("ncx")))?;
        Ok(())
    }
}
