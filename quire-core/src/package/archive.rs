//! EPUB (ZIP) archive writer

use crate::error::Result;
use std::fs::File;
use std::io::{self, BufWriter, Seek, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Contents of the leading `mimetype` entry
pub const MIMETYPE_CONTENT: &str = "application/epub+zip\n";

const MIMETYPE_ENTRY: &str = "mimetype";

/// Zip every file under `dir` into a new archive at `target`.
///
/// Returns the number of entries written, `mimetype` included.
pub fn write_archive(dir: &Path, target: &Path) -> Result<usize> {
    let file = File::create(target)?;
    let mut writer = BufWriter::new(file);
    let count = write_archive_to(dir, &mut writer)?;
    writer.flush()?;
    Ok(count)
}

/// Zip every file under `dir` into `writer`.
///
/// The first entry is always an uncompressed `mimetype`; the staged files
/// follow, deflated, in file-name order.
pub fn write_archive_to<W: Write + Seek>(dir: &Path, writer: W) -> Result<usize> {
    let mut zip = ZipWriter::new(writer);

    let options_stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let options_deflate =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(MIMETYPE_ENTRY, options_stored)?;
    zip.write_all(MIMETYPE_CONTENT.as_bytes())?;
    let mut count = 1;

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry_name(dir, entry.path())?;
        if name == MIMETYPE_ENTRY {
            continue;
        }

        zip.start_file(name.as_str(), options_deflate)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut zip)?;
        tracing::debug!("Archived {}", name);
        count += 1;
    }

    zip.finish()?;
    Ok(count)
}

/// Archive entry name of `path` relative to `root`, `/`-separated
fn entry_name(root: &Path, path: &Path) -> io::Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is outside {}", path.display(), root.display()),
        )
    })?;

    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Ok(parts.join("/"))
}
