//! Package-level documents and archive output
//!
//! Everything that is rendered from several object-model parts at once (the
//! OPF package document) or is fixed boilerplate (the Apple display options)
//! lives here, together with the ZIP writer.

mod archive;

pub use archive::{write_archive, write_archive_to, MIMETYPE_CONTENT};

use crate::types::{Guide, Manifest, Metadata, Spine};
use crate::xml::{WriteXml, XmlResult, NS_OPF};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Element id of the primary `dc:identifier`
pub const UNIQUE_IDENTIFIER_ID: &str = "BookId";

/// Directory holding the package document and content
pub const OPF_DIR: &str = "OPF";

/// Directory holding the container and vendor files
pub const META_INF_DIR: &str = "META-INF";

pub const OPF_FILE: &str = "content.opf";
pub const NCX_FILE: &str = "toc.ncx";
pub const CONTAINER_FILE: &str = "container.xml";
pub const DISPLAY_OPTIONS_FILE: &str = "com.apple.ibooks.display-options.xml";

/// Borrowed view of the parts making up `content.opf`
pub struct Package<'a> {
    pub metadata: &'a Metadata,
    pub manifest: &'a Manifest,
    pub spine: &'a Spine,
    pub guide: &'a Guide,
}

impl WriteXml for Package<'_> {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        let mut elem = BytesStart::new("package");
        elem.push_attribute(("xmlns", NS_OPF));
        elem.push_attribute(("version", "2.0"));
        elem.push_attribute(("unique-identifier", UNIQUE_IDENTIFIER_ID));
        writer.write_event(Event::Start(elem))?;

        self.metadata.write_xml(writer)?;
        self.manifest.write_xml(writer)?;
        self.spine.write_xml(writer)?;
        self.guide.write_xml(writer)?;

        writer.write_event(Event::End(BytesEnd::new("package")))?;
        Ok(())
    }
}

/// Apple Books display options enabling embedded fonts
pub struct DisplayOptions;

impl WriteXml for DisplayOptions {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        writer.write_event(Event::Start(BytesStart::new("display_options")))?;

        let mut platform = BytesStart::new("platform");
        platform.push_attribute(("name", "*"));
        writer.write_event(Event::Start(platform))?;

        let mut option = BytesStart::new("option");
        option.push_attribute(("name", "specified-fonts"));
        writer.write_event(Event::Start(option))?;
        writer.write_event(Event::Text(BytesText::new("true")))?;
        writer.write_event(Event::End(BytesEnd::new("option")))?;

        writer.write_event(Event::End(BytesEnd::new("platform")))?;
        writer.write_event(Event::End(BytesEnd::new("display_options")))?;
        Ok(())
    }
}
