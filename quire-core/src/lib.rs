//! Quire Core Library
//!
//! This crate builds EPUB 2 packages programmatically. Metadata, content files
//! and a table of contents are accumulated on a [`Document`], which mirrors the
//! OPF, NCX and OCF container structures in memory and serializes them to XML
//! when the archive is generated.

pub mod document;
pub mod error;
pub mod ids;
pub mod media_type;
pub mod options;
pub mod package;
pub mod staging;
pub mod types;
pub mod xml;

pub use document::Document;
pub use error::{InputError, QuireError, Result};
pub use options::DocumentOptions;
pub use types::{
    Container, DcItem, Guide, Item, Manifest, ManifestItem, Metadata, NavPoint, Ncx, Reference,
    RootFile, Spine,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let mut doc = Document::new();
        doc.add_title("Test Book");
        doc.add_language("en");
        assert_eq!(doc.metadata().dc_values("title").next().unwrap().value, "Test Book");
        assert_eq!(doc.metadata().dc_values("language").next().unwrap().value, "en");
    }
}
