//! `META-INF/container.xml`

use crate::xml::{WriteXml, XmlResult, NS_CONTAINER};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// Location of a package document inside the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootFile {
    pub full_path: String,
    pub media_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    root_files: Vec<RootFile>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root_file(&mut self, full_path: &str, media_type: &str) {
        self.root_files.push(RootFile {
            full_path: full_path.to_string(),
            media_type: media_type.to_string(),
        });
    }

    pub fn root_files(&self) -> &[RootFile] {
        &self.root_files
    }
}

impl WriteXml for Container {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        let mut elem = BytesStart::new("container");
        elem.push_attribute(("xmlns", NS_CONTAINER));
        elem.push_attribute(("version", "1.0"));
        writer.write_event(Event::Start(elem))?;
        writer.write_event(Event::Start(BytesStart::new("rootfiles")))?;

        for root_file in &self.root_files {
            let mut elem = BytesStart::new("rootfile");
            elem.push_attribute(("full-path", root_file.full_path.as_str()));
            elem.push_attribute(("media-type", root_file.media_type.as_str()));
            writer.write_event(Event::Empty(elem))?;
        }

        writer.write_event(Event::End(BytesEnd::new("rootfiles")))?;
        writer.write_event(Event::End(BytesEnd::new("container")))?;
        Ok(())
    }
}
