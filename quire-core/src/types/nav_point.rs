//! Table of contents tree nodes

use crate::xml::{write_text_element, WriteXml, XmlResult};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// Id of the child at 1-based `position` under `parent_id`
pub fn child_nav_id(parent_id: &str, position: usize) -> String {
    format!("{parent_id}x{position}")
}

/// A single table-of-contents entry owning its nested entries.
///
/// Top-level points are created through
/// [`Document::add_nav_point`](crate::Document::add_nav_point); nested ones
/// through [`NavPoint::add_nav_point`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavPoint {
    label: String,
    id: String,
    content: String,
    play_order: u32,
    class: Option<String>,
    children: Vec<NavPoint>,
}

impl NavPoint {
    pub(crate) fn new(label: &str, id: String, content: &str, play_order: u32) -> Self {
        Self {
            label: label.to_string(),
            id,
            content: content.to_string(),
            play_order,
            class: None,
            children: Vec::new(),
        }
    }

    /// Add a direct child entry and return it for further nesting
    pub fn add_nav_point(&mut self, label: &str, content: &str, play_order: u32) -> &mut NavPoint {
        let id = child_nav_id(&self.id, self.children.len() + 1);
        self.children.push(NavPoint::new(label, id, content, play_order));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Set the `class` attribute (e.g. `chapter`, `section`). Empty clears it.
    pub fn set_class(&mut self, class: &str) -> &mut Self {
        self.class = (!class.is_empty()).then(|| class.to_string());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn play_order(&self) -> u32 {
        self.play_order
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn children(&self) -> &[NavPoint] {
        &self.children
    }

    /// Depth-first search of this subtree
    pub fn find_mut(&mut self, id: &str) -> Option<&mut NavPoint> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }
}

impl WriteXml for NavPoint {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult<()> {
        let play_order = self.play_order.to_string();
        let mut elem = BytesStart::new("navPoint");
        elem.push_attribute(("id", self.id.as_str()));
        if let Some(ref class) = self.class {
            elem.push_attribute(("class", class.as_str()));
        }
        elem.push_attribute(("playOrder", play_order.as_str()));
        writer.write_event(Event::Start(elem))?;

        writer.write_event(Event::Start(BytesStart::new("navLabel")))?;
        write_text_element(writer, "text", &self.label)?;
        writer.write_event(Event::End(BytesEnd::new("navLabel")))?;

        let mut content = BytesStart::new("content");
        content.push_attribute(("src", self.content.as_str()));
        writer.write_event(Event::Empty(content))?;

        for child in &self.children {
            child.write_xml(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("navPoint")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::new_writer;

    fn render(point: &NavPoint) -> String {
        let mut writer = new_writer();
        point.write_xml(&mut writer).unwrap();
        String::from_utf8(writer.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_child_ids_derive_from_parent() {
        let mut root = NavPoint::new("Part I", "navid3".to_string(), "part1.xhtml", 3);
        let first = root.add_nav_point("Chapter 1", "ch1.xhtml", 4);
        assert_eq!(first.id(), "navid3x1");
        let nested = first.add_nav_point("Section 1.1", "ch1.xhtml#s1", 5);
        assert_eq!(nested.id(), "navid3x1x1");

        let second = root.add_nav_point("Chapter 2", "ch2.xhtml", 6);
        assert_eq!(second.id(), "navid3x2");
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn test_render_with_children_in_order() {
        let mut root = NavPoint::new("Part I", "navid1".to_string(), "part1.xhtml", 1);
        root.set_class("part");
        root.add_nav_point("Chapter 1", "ch1.xhtml", 2);
        root.add_nav_point("Chapter 2", "ch2.xhtml", 3);

        let xml = render(&root);
        assert!(xml.starts_with(r#"<navPoint id="navid1" class="part" playOrder="1">"#));
        assert!(xml.contains("<text>Part I</text>"));
        assert!(xml.contains(r#"<content src="part1.xhtml"/>"#));
        assert!(xml.contains(r#"<navPoint id="navid1x1" playOrder="2">"#));
        assert!(xml.find("navid1x1").unwrap() < xml.find("navid1x2").unwrap());
        assert_eq!(xml.matches("</navPoint>").count(), 3);
    }

    #[test]
    fn test_find_mut() {
        let mut root = NavPoint::new("Root", "navid1".to_string(), "a.xhtml", 1);
        root.add_nav_point("Child", "b.xhtml", 2)
            .add_nav_point("Grandchild", "c.xhtml", 3);

        let found = root.find_mut("navid1x1x1").unwrap();
        assert_eq!(found.label(), "Grandchild");
        found.set_class("leaf");
        assert_eq!(root.children()[0].children()[0].class(), Some("leaf"));
        assert!(root.find_mut("navid9").is_none());
    }
}
