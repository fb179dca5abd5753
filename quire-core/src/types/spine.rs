//! OPF `<spine>`: the linear reading order

use crate::xml::{write_parent, WriteXml, XmlResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// Reference to a manifest item in reading order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub idref: String,

    /// Non-linear items (notes, popups) render with `linear="no"`
    pub linear: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spine {
    toc: Option<String>,
    item_refs: Vec<ItemRef>,
}

impl Spine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the spine at the manifest id of the NCX
    pub fn set_toc(&mut self, toc: &str) {
        self.toc = Some(toc.to_string());
    }

    pub fn add_item_ref(&mut self, idref: &str, linear: bool) {
        self.item_refs.push(ItemRef {
            idref: idref.to_string(),
            linear,
        });
    }

    pub fn toc(&self) -> Option<&str> {
        self.toc.as_deref()
    }

    pub fn item_refs(&self) -> &[ItemRef] {
        &self.item_refs
    }
}

impl WriteXml for Spine {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        let mut elem = BytesStart::new("spine");
        if let Some(toc) = self.toc.as_deref().filter(|t| !t.is_empty()) {
            elem.push_attribute(("toc", toc));
        }

        write_parent(writer, elem, !self.item_refs.is_empty(), |writer| {
            for item_ref in &self.item_refs {
                let mut elem = BytesStart::new("itemref");
                elem.push_attribute(("idref", item_ref.idref.as_str()));
                if !item_ref.linear {
                    elem.push_attribute(("linear", "no"));
                }
                writer.write_event(Event::Empty(elem))?;
            }
            Ok(())
        })
    }
}
