//! JSON recipe describing a book to build

use anyhow::{Context, Result};
use chrono::NaiveDate;
use quire_core::{Document, DocumentOptions, NavPoint};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A book recipe. Source paths are relative to the recipe file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub titles: Vec<String>,
    pub authors: Vec<String>,
    pub translators: Vec<String>,
    pub languages: Vec<String>,
    pub subjects: Vec<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub rights: Option<String>,
    pub date: Option<NaiveDate>,
    pub identifiers: Vec<IdentifierEntry>,
    pub meta: Vec<MetaEntry>,

    pub stylesheets: Vec<FileEntry>,
    pub images: Vec<FileEntry>,
    pub chapters: Vec<ChapterEntry>,
    pub files: Vec<MediaFileEntry>,

    pub toc: Vec<TocEntry>,
    pub guide: Vec<GuideEntry>,

    pub options: DocumentOptions,
}

#[derive(Debug, Deserialize)]
pub struct IdentifierEntry {
    pub value: String,
    #[serde(default)]
    pub scheme: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MetaEntry {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct FileEntry {
    pub source: PathBuf,
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct ChapterEntry {
    pub source: PathBuf,
    pub path: String,
    #[serde(default = "default_linear")]
    pub linear: bool,
}

#[derive(Debug, Deserialize)]
pub struct MediaFileEntry {
    pub source: PathBuf,
    pub path: String,
    pub media_type: String,
}

#[derive(Debug, Deserialize)]
pub struct TocEntry {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub children: Vec<TocEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GuideEntry {
    pub href: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
}

fn default_linear() -> bool {
    true
}

impl Recipe {
    /// Load a recipe from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse recipe: {}", path.display()))
    }

    /// Build the document, resolving sources against `base_dir`
    pub fn into_document(self, base_dir: &Path) -> Result<Document> {
        let mut doc = Document::with_options(self.options);

        for title in &self.titles {
            doc.add_title(title);
        }
        for author in &self.authors {
            doc.add_author(author);
        }
        for translator in &self.translators {
            doc.add_translator(translator);
        }
        for language in &self.languages {
            doc.add_language(language);
        }
        for subject in &self.subjects {
            doc.add_subject(subject);
        }
        if let Some(ref description) = self.description {
            doc.add_description(description);
        }
        if let Some(ref publisher) = self.publisher {
            doc.add_publisher(publisher);
        }
        if let Some(ref rights) = self.rights {
            doc.add_rights(rights);
        }
        if let Some(date) = self.date {
            doc.add_date(date);
        }
        for identifier in &self.identifiers {
            doc.add_book_identifier_with_scheme(
                &identifier.value,
                identifier.scheme.as_deref().unwrap_or_default(),
            );
        }
        for meta in &self.meta {
            doc.add_meta_item(&meta.name, &meta.content);
        }

        for item in &self.stylesheets {
            doc.add_stylesheet_file(base_dir.join(&item.source), &item.path)
                .with_context(|| format!("Failed to add stylesheet {}", item.path))?;
        }
        for item in &self.images {
            doc.add_image_file(base_dir.join(&item.source), &item.path)
                .with_context(|| format!("Failed to add image {}", item.path))?;
        }
        for item in &self.chapters {
            let source = base_dir.join(&item.source);
            let added = if item.linear {
                doc.add_xhtml_file(source, &item.path)
            } else {
                doc.add_auxiliary_xhtml_file(source, &item.path)
            };
            added.with_context(|| format!("Failed to add chapter {}", item.path))?;
        }
        for item in &self.files {
            doc.add_file(base_dir.join(&item.source), &item.path, &item.media_type)
                .with_context(|| format!("Failed to add file {}", item.path))?;
        }

        let mut play_order = 0;
        for entry in &self.toc {
            play_order += 1;
            let point = doc.add_nav_point(&entry.label, &entry.href, play_order);
            apply_toc_entry(point, entry, &mut play_order);
        }

        for reference in &self.guide {
            doc.add_reference_with_title(
                &reference.href,
                &reference.kind,
                reference.title.as_deref().unwrap_or_default(),
            );
        }

        Ok(doc)
    }
}

/// Set the class of `point` and add `entry`'s children depth-first,
/// continuing the play order
fn apply_toc_entry(point: &mut NavPoint, entry: &TocEntry, play_order: &mut u32) {
    if let Some(ref class) = entry.class {
        point.set_class(class);
    }
    for child in &entry.children {
        *play_order += 1;
        let child_point = point.add_nav_point(&child.label, &child.href, *play_order);
        apply_toc_entry(child_point, child, play_order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_order_is_depth_first() {
        let recipe: Recipe = serde_json::from_str(
            r#"{
                "titles": ["Nested"],
                "toc": [
                    {"label": "One", "href": "1.xhtml", "children": [
                        {"label": "One.One", "href": "1.xhtml#a"},
                        {"label": "One.Two", "href": "1.xhtml#b"}
                    ]},
                    {"label": "Two", "href": "2.xhtml", "class": "chapter"}
                ]
            }"#,
        )
        .unwrap();

        let doc = recipe.into_document(Path::new(".")).unwrap();
        let points = doc.ncx().nav_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].play_order(), 1);
        assert_eq!(points[0].children()[0].play_order(), 2);
        assert_eq!(points[0].children()[1].id(), "navid1x2");
        assert_eq!(points[0].children()[1].play_order(), 3);
        assert_eq!(points[1].play_order(), 4);
        assert_eq!(points[1].class(), Some("chapter"));
    }

    #[test]
    fn test_metadata_fields() {
        let recipe: Recipe = serde_json::from_str(
            r#"{
                "titles": ["Sample"],
                "authors": ["A. Writer"],
                "languages": ["en"],
                "date": "2024-03-09",
                "identifiers": [{"value": "978-3-16-148410-0", "scheme": "ISBN"}],
                "meta": [{"name": "cover", "content": "img1"}],
                "guide": [{"href": "cover.xhtml", "type": "cover"}]
            }"#,
        )
        .unwrap();

        let opf = recipe.into_document(Path::new(".")).unwrap().to_opf_xml().unwrap();
        assert!(opf.contains("<dc:title>Sample</dc:title>"));
        assert!(opf.contains("<dc:date>2024-03-09</dc:date>"));
        assert!(opf.contains(r#"opf:scheme="ISBN""#));
        assert!(opf.contains(r#"<meta name="cover" content="img1"/>"#));
        assert!(opf.contains(r#"<reference href="cover.xhtml" type="cover"/>"#));
    }

    #[test]
    fn test_missing_chapter_source() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"chapters": [{"source": "missing.xhtml", "path": "ch1.xhtml"}]}"#,
        )
        .unwrap();

        let err = recipe.into_document(Path::new("/nonexistent")).unwrap_err();
        assert!(err.to_string().contains("ch1.xhtml"));
    }
}
