//! Media types used inside the package

pub const NCX: &str = "application/x-dtbncx+xml";
pub const OPF: &str = "application/oebps-package+xml";
pub const XHTML: &str = "application/xhtml+xml";
pub const CSS: &str = "text/css";
pub const JPEG: &str = "image/jpeg";
pub const PNG: &str = "image/png";
pub const GIF: &str = "image/gif";
pub const SVG: &str = "image/svg+xml";

/// Infer an image media type from the file extension of `path`.
///
/// Returns `None` for anything outside jpg/jpeg/png/gif/svg.
pub fn image_media_type(path: &str) -> Option<&'static str> {
    let ext = path.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(JPEG),
        "png" => Some(PNG),
        "gif" => Some(GIF),
        "svg" => Some(SVG),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions() {
        assert_eq!(image_media_type("images/cover.jpg"), Some(JPEG));
        assert_eq!(image_media_type("images/cover.JPEG"), Some(JPEG));
        assert_eq!(image_media_type("a.png"), Some(PNG));
        assert_eq!(image_media_type("a.gif"), Some(GIF));
        assert_eq!(image_media_type("figures/plot.svg"), Some(SVG));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(image_media_type("image.webp"), None);
        assert_eq!(image_media_type("no_extension"), None);
    }
}
