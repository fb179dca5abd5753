//! XML generation helpers
//!
//! Every package component renders itself through quick-xml by implementing
//! [`WriteXml`]. Whole documents are produced with [`render_document`].

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};

// XML Namespaces
pub const NS_OPF: &str = "http://www.idpf.org/2007/opf";
pub const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
pub const NS_NCX: &str = "http://www.daisy.org/z3986/2005/ncx/";
pub const NS_CONTAINER: &str = "urn:oasis:names:tc:opendocument:xmlns:container";

/// Result type for XML rendering
pub type XmlResult<T> = std::result::Result<T, quick_xml::Error>;

/// A component that renders itself as one XML element (with children)
pub trait WriteXml {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()>;
}

/// Create the indenting writer shared by all package documents
pub(crate) fn new_writer() -> Writer<Cursor<Vec<u8>>> {
    Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2)
}

/// Write the `<?xml ...?>` declaration
pub(crate) fn write_declaration<W: Write>(writer: &mut Writer<W>) -> XmlResult<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    Ok(())
}

/// Render `root` as a standalone document with an XML declaration
pub fn render_document<T: WriteXml + ?Sized>(root: &T) -> XmlResult<Vec<u8>> {
    let mut writer = new_writer();
    write_declaration(&mut writer)?;
    root.write_xml(&mut writer)?;
    Ok(writer.into_inner().into_inner())
}

/// Write a simple text element
pub(crate) fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    content: &str,
) -> XmlResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(content)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write `elem` wrapping whatever `children` emits.
///
/// Falls back to a self-closing element when `has_children` is false.
pub(crate) fn write_parent<W, F>(
    writer: &mut Writer<W>,
    elem: BytesStart<'_>,
    has_children: bool,
    children: F,
) -> XmlResult<()>
where
    W: Write,
    F: FnOnce(&mut Writer<W>) -> XmlResult<()>,
{
    if !has_children {
        writer.write_event(Event::Empty(elem))?;
        return Ok(());
    }

    let end = elem.to_end().into_owned();
    writer.write_event(Event::Start(elem))?;
    children(writer)?;
    writer.write_event(Event::End(end))?;
    Ok(())
}
