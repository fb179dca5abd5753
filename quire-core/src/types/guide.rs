//! OPF `<guide>`: landmark references for reading systems

use crate::xml::{write_parent, WriteXml, XmlResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// A landmark such as `cover`, `toc` or `text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub href: String,
    pub kind: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Guide {
    references: Vec<Reference>,
}

impl Guide {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference. An empty `title` is treated as absent.
    pub fn add_reference(&mut self, href: &str, kind: &str, title: &str) {
        self.references.push(Reference {
            href: href.to_string(),
            kind: kind.to_string(),
            title: (!title.is_empty()).then(|| title.to_string()),
        });
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }
}

impl WriteXml for Guide {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        write_parent(
            writer,
            BytesStart::new("guide"),
            !self.references.is_empty(),
            |writer| {
                for reference in &self.references {
                    let mut elem = BytesStart::new("reference");
                    elem.push_attribute(("href", reference.href.as_str()));
                    elem.push_attribute(("type", reference.kind.as_str()));
                    if let Some(ref title) = reference.title {
                        elem.push_attribute(("title", title.as_str()));
                    }
                    writer.write_event(Event::Empty(elem))?;
                }
                Ok(())
            },
        )
    }
}
