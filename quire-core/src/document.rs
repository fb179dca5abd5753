//! The `Document` facade: builds and generates an EPUB 2 package

use crate::error::{InputError, QuireError, Result};
use crate::ids::IdAllocator;
use crate::media_type;
use crate::options::DocumentOptions;
use crate::package::{
    self, DisplayOptions, Package, CONTAINER_FILE, DISPLAY_OPTIONS_FILE, META_INF_DIR, NCX_FILE,
    OPF_DIR, OPF_FILE, UNIQUE_IDENTIFIER_ID,
};
use crate::staging::{normalize_package_path, Staging};
use crate::types::{Container, Guide, Manifest, Metadata, NavPoint, Ncx, Spine};
use crate::xml::render_document;
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Manifest id of the NCX, referenced from the spine
const NCX_ID: &str = "ncx";

// Id kinds handed to the allocator
const KIND_GENERIC: &str = "id";
const KIND_STYLESHEET: &str = "stylesheet";
const KIND_XHTML: &str = "html";
const KIND_IMAGE: &str = "img";
const KIND_NAV: &str = "navid";

/// A content file waiting to be staged, keyed by its normalized package path
#[derive(Debug, Clone)]
struct ContentFile {
    path: PathBuf,
    data: Vec<u8>,
}

/// An EPUB 2 document under construction.
///
/// Metadata, content and navigation are accumulated through the `add_*`
/// methods; [`generate`](Self::generate) writes the finished archive. A
/// document can be generated any number of times: each run stages into a
/// fresh temporary directory that is removed afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    metadata: Metadata,
    manifest: Manifest,
    spine: Spine,
    guide: Guide,
    ncx: Ncx,
    container: Container,
    ids: IdAllocator,
    identifier: String,
    contents: Vec<ContentFile>,
    options: DocumentOptions,
}

impl Document {
    /// Create an empty document with default options
    pub fn new() -> Self {
        Self::with_options(DocumentOptions::default())
    }

    /// Create an empty document.
    ///
    /// The NCX manifest entry, spine toc reference and container root file
    /// are registered up front, and a fresh `urn:uuid:` identifier is used
    /// both as the `BookId` identifier and as the NCX uid.
    pub fn with_options(options: DocumentOptions) -> Self {
        let mut document = Self {
            metadata: Metadata::new(),
            manifest: Manifest::new(),
            spine: Spine::new(),
            guide: Guide::new(),
            ncx: Ncx::new(),
            container: Container::new(),
            ids: IdAllocator::new(),
            identifier: format!("urn:uuid:{}", Uuid::new_v4()),
            contents: Vec::new(),
            options,
        };

        document.manifest.add_item(NCX_ID, NCX_FILE, media_type::NCX);
        document.spine.set_toc(NCX_ID);
        document
            .container
            .add_root_file(&format!("{OPF_DIR}/{OPF_FILE}"), media_type::OPF);

        document.ncx.set_uid(&document.identifier);
        document
            .metadata
            .add_book_identifier(UNIQUE_IDENTIFIER_ID, &document.identifier, "");
        document
    }

    // ---------------------------------------------------------------------
    // Metadata
    // ---------------------------------------------------------------------

    /// Add an author (`dc:creator` with role `aut`), also listed in the NCX
    pub fn add_author(&mut self, author: &str) {
        self.metadata.add_author(author);
        self.ncx.add_author(author);
    }

    /// Add a title, also appended to the NCX document title
    pub fn add_title(&mut self, title: &str) {
        self.metadata.add_title(title);
        self.ncx.add_title(title);
    }

    /// Add a translator (`dc:creator` with role `trl`)
    pub fn add_translator(&mut self, name: &str) {
        self.metadata.add_translator(name);
    }

    /// Add a creator with an arbitrary MARC relator role
    pub fn add_creator(&mut self, name: &str, role: &str) {
        self.metadata.add_creator(name, role);
    }

    /// Add a contributor with an arbitrary MARC relator role
    pub fn add_contributor(&mut self, name: &str, role: &str) {
        self.metadata.add_contributor(name, role);
    }

    /// Add a subject: a phrase or list of keywords
    pub fn add_subject(&mut self, subject: &str) {
        self.metadata.add_subject(subject);
    }

    pub fn add_description(&mut self, description: &str) {
        self.metadata.add_description(description);
    }

    /// Add a genre or category term, ideally from a controlled vocabulary
    pub fn add_type(&mut self, kind: &str) {
        self.metadata.add_type(kind);
    }

    /// Add the media type or dimensions of the publication
    pub fn add_format(&mut self, format: &str) {
        self.metadata.add_format(format);
    }

    /// Add a language as an RFC 3066 code such as `en` or `es`
    pub fn add_language(&mut self, language: &str) {
        self.metadata.add_language(language);
    }

    pub fn add_relation(&mut self, relation: &str) {
        self.metadata.add_relation(relation);
    }

    pub fn add_rights(&mut self, rights: &str) {
        self.metadata.add_rights(rights);
    }

    pub fn add_publisher(&mut self, publisher: &str) {
        self.metadata.add_publisher(publisher);
    }

    pub fn add_date(&mut self, date: NaiveDate) {
        self.metadata.add_date(date);
    }

    /// Add an extra identifier without a scheme
    pub fn add_book_identifier(&mut self, value: &str) {
        self.add_book_identifier_with_scheme(value, "");
    }

    /// Add an extra identifier issued by `scheme` (e.g. `ISBN`, `DOI`)
    pub fn add_book_identifier_with_scheme(&mut self, value: &str, scheme: &str) {
        let id = self.ids.next_id(KIND_GENERIC);
        self.metadata.add_book_identifier(&id, value, scheme);
    }

    /// Add a generic `<meta name content>` item
    pub fn add_meta_item(&mut self, name: &str, value: &str) {
        self.metadata.add_item(name, value);
    }

    /// Replace the NCX document title accumulated by [`add_title`](Self::add_title)
    pub fn set_toc_title(&mut self, title: &str) {
        self.ncx.set_title(title);
    }

    // ---------------------------------------------------------------------
    // Content from files
    // ---------------------------------------------------------------------

    /// Copy an image into the package. The media type is inferred from the
    /// extension of `epub_path`.
    pub fn add_image_file(&mut self, source: impl AsRef<Path>, epub_path: &str) -> Result<String> {
        let href = self.copy_file(source.as_ref(), epub_path)?;
        Ok(self.add_image_entry(&href))
    }

    pub fn add_stylesheet_file(
        &mut self,
        source: impl AsRef<Path>,
        epub_path: &str,
    ) -> Result<String> {
        let href = self.copy_file(source.as_ref(), epub_path)?;
        Ok(self.add_stylesheet_entry(&href))
    }

    /// Copy a primary XHTML document into the package and the reading order
    pub fn add_xhtml_file(&mut self, source: impl AsRef<Path>, epub_path: &str) -> Result<String> {
        let href = self.copy_file(source.as_ref(), epub_path)?;
        Ok(self.add_xhtml_entry(&href, true))
    }

    /// Copy an auxiliary XHTML document (notes, popups), spine `linear="no"`
    pub fn add_auxiliary_xhtml_file(
        &mut self,
        source: impl AsRef<Path>,
        epub_path: &str,
    ) -> Result<String> {
        let href = self.copy_file(source.as_ref(), epub_path)?;
        Ok(self.add_xhtml_entry(&href, false))
    }

    /// Copy any file into the package with an explicit media type
    pub fn add_file(
        &mut self,
        source: impl AsRef<Path>,
        epub_path: &str,
        media_type: &str,
    ) -> Result<String> {
        let href = self.copy_file(source.as_ref(), epub_path)?;
        Ok(self.add_entry(&href, media_type))
    }

    // ---------------------------------------------------------------------
    // Content from memory
    // ---------------------------------------------------------------------

    pub fn add_image_data(&mut self, epub_path: &str, content: impl Into<Vec<u8>>) -> Result<String> {
        let href = self.write_file(epub_path, content.into())?;
        Ok(self.add_image_entry(&href))
    }

    pub fn add_stylesheet_data(&mut self, epub_path: &str, content: &str) -> Result<String> {
        let href = self.write_file(epub_path, content.as_bytes().to_vec())?;
        Ok(self.add_stylesheet_entry(&href))
    }

    pub fn add_xhtml_data(&mut self, epub_path: &str, content: &str) -> Result<String> {
        let href = self.write_file(epub_path, content.as_bytes().to_vec())?;
        Ok(self.add_xhtml_entry(&href, true))
    }

    pub fn add_auxiliary_xhtml_data(&mut self, epub_path: &str, content: &str) -> Result<String> {
        let href = self.write_file(epub_path, content.as_bytes().to_vec())?;
        Ok(self.add_xhtml_entry(&href, false))
    }

    pub fn add_data(
        &mut self,
        epub_path: &str,
        content: impl Into<Vec<u8>>,
        media_type: &str,
    ) -> Result<String> {
        let href = self.write_file(epub_path, content.into())?;
        Ok(self.add_entry(&href, media_type))
    }

    // ---------------------------------------------------------------------
    // Navigation and guide
    // ---------------------------------------------------------------------

    /// Add a top-level table of contents entry and return it for nesting
    pub fn add_nav_point(&mut self, label: &str, content: &str, play_order: u32) -> &mut NavPoint {
        let id = self.ids.next_id(KIND_NAV);
        self.ncx.add_nav_point(label, id, content, play_order)
    }

    /// Look up any table of contents entry by id
    pub fn nav_point_mut(&mut self, id: &str) -> Option<&mut NavPoint> {
        self.ncx.find_mut(id)
    }

    /// Add a guide reference without a title
    pub fn add_reference(&mut self, href: &str, kind: &str) {
        self.guide.add_reference(href, kind, "");
    }

    pub fn add_reference_with_title(&mut self, href: &str, kind: &str, title: &str) {
        self.guide.add_reference(href, kind, title);
    }

    // ---------------------------------------------------------------------
    // Output
    // ---------------------------------------------------------------------

    /// Render `content.opf`
    pub fn to_opf_xml(&self) -> Result<String> {
        let bytes = render_document(&self.package())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Render `toc.ncx`
    pub fn to_ncx_xml(&self) -> Result<String> {
        let bytes = self.ncx.to_xml()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Render `META-INF/container.xml`
    pub fn to_container_xml(&self) -> Result<String> {
        let bytes = render_document(&self.container)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write the EPUB archive to `target`, replacing any existing file.
    ///
    /// The staging directory is removed whether or not generation succeeds.
    pub fn generate(&self, target: impl AsRef<Path>) -> Result<PathBuf> {
        let target = target.as_ref();
        let staging = Staging::create(self.options.staging_root.as_deref())?;

        let result = self.write_package(&staging, target);
        drop(staging);

        let entries = result?;
        tracing::info!("Generated {} ({} entries)", target.display(), entries);
        Ok(target.to_path_buf())
    }

    /// Like [`generate`](Self::generate), but hands the outcome to callbacks
    /// instead of returning it
    pub fn generate_with<S, F>(&self, target: impl AsRef<Path>, on_success: S, on_failure: F)
    where
        S: FnOnce(&Path),
        F: FnOnce(QuireError),
    {
        match self.generate(target) {
            Ok(path) => on_success(&path),
            Err(e) => on_failure(e),
        }
    }

    fn write_package(&self, staging: &Staging, target: &Path) -> Result<usize> {
        let opf_dir = Path::new(OPF_DIR);
        let meta_inf_dir = Path::new(META_INF_DIR);

        for file in &self.contents {
            staging.write(&opf_dir.join(&file.path), &file.data)?;
        }

        staging.write(&opf_dir.join(OPF_FILE), &render_document(&self.package())?)?;
        staging.write(&opf_dir.join(NCX_FILE), &self.ncx.to_xml()?)?;
        staging.write(
            &meta_inf_dir.join(CONTAINER_FILE),
            &render_document(&self.container)?,
        )?;
        staging.write(
            &meta_inf_dir.join(DISPLAY_OPTIONS_FILE),
            &render_document(&DisplayOptions)?,
        )?;

        remove_existing(target);
        package::write_archive(staging.path(), target)
    }

    fn package(&self) -> Package<'_> {
        Package {
            metadata: &self.metadata,
            manifest: &self.manifest,
            spine: &self.spine,
            guide: &self.guide,
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// The `urn:uuid:` book identifier, shared with the NCX uid
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn spine(&self) -> &Spine {
        &self.spine
    }

    pub fn guide(&self) -> &Guide {
        &self.guide
    }

    pub fn ncx(&self) -> &Ncx {
        &self.ncx
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn add_entry(&mut self, path: &str, media_type: &str) -> String {
        let id = self.ids.next_id(KIND_GENERIC);
        self.manifest.add_item(&id, path, media_type);
        id
    }

    fn add_stylesheet_entry(&mut self, path: &str) -> String {
        let id = self.ids.next_id(KIND_STYLESHEET);
        self.manifest.add_item(&id, path, media_type::CSS);
        id
    }

    fn add_xhtml_entry(&mut self, path: &str, linear: bool) -> String {
        let id = self.ids.next_id(KIND_XHTML);
        self.manifest.add_item(&id, path, media_type::XHTML);
        self.spine.add_item_ref(&id, linear);
        id
    }

    fn add_image_entry(&mut self, path: &str) -> String {
        let id = self.ids.next_id(KIND_IMAGE);
        let media_type = media_type::image_media_type(path).unwrap_or_else(|| {
            tracing::warn!("Unrecognized image extension for {}, media type left empty", path);
            ""
        });
        self.manifest.add_item(&id, path, media_type);
        id
    }

    /// Validate `epub_path` for a new content file.
    ///
    /// A path may not equal, contain or sit inside another content file or a
    /// generated file, since staging could not lay both out on disk.
    fn check_path(&self, epub_path: &str) -> Result<PathBuf> {
        let path = normalize_package_path(epub_path)?;
        for reserved in [OPF_FILE, NCX_FILE] {
            if path.starts_with(reserved) {
                return Err(InputError::ReservedPath(epub_path.to_string()).into());
            }
        }
        for file in &self.contents {
            if file.path == path {
                return Err(InputError::DuplicatePath(epub_path.to_string()).into());
            }
            if path.starts_with(&file.path) || file.path.starts_with(&path) {
                return Err(InputError::PathConflict(
                    epub_path.to_string(),
                    package_href(&file.path),
                )
                .into());
            }
        }
        Ok(path)
    }

    /// Read `source` into the package at `epub_path`, returning the manifest href
    fn copy_file(&mut self, source: &Path, epub_path: &str) -> Result<String> {
        let path = self.check_path(epub_path)?;
        let data = fs::read(source).map_err(|e| {
            io::Error::new(e.kind(), format!("{}: {}", source.display(), e))
        })?;
        tracing::debug!("Copied {} to {}", source.display(), epub_path);
        Ok(self.push_content(path, data))
    }

    fn write_file(&mut self, epub_path: &str, data: Vec<u8>) -> Result<String> {
        let path = self.check_path(epub_path)?;
        Ok(self.push_content(path, data))
    }

    fn push_content(&mut self, path: PathBuf, data: Vec<u8>) -> String {
        let href = package_href(&path);
        self.contents.push(ContentFile { path, data });
        href
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Manifest href of a normalized package path, `/`-separated
fn package_href(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Best-effort removal of a previous archive at `target`
fn remove_existing(target: &Path) {
    match fs::remove_file(target) {
        Ok(()) => tracing::debug!("Removed existing {}", target.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove existing {}: {}", target.display(), e),
    }
}
