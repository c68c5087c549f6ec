// Type definitions and enums

/// Image formats the gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Webp,
}

impl ImageKind {
    /// Resolve a kind from a bare extension (no leading dot), ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            "webp" => Some(ImageKind::Webp),
            _ => None,
        }
    }

    /// Resolve a kind from a client-supplied filename.
    pub fn from_filename(filename: &str) -> Option<Self> {
        extension(filename).and_then(|ext| Self::from_extension(&ext[1..]))
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Webp => "image/webp",
        }
    }
}

/// Extension of the last path segment, including the leading dot and in its
/// original case. `None` when the segment has no dot.
pub fn extension(filename: &str) -> Option<&str> {
    let name = filename.rsplit('/').next().unwrap_or(filename);
    name.rfind('.').map(|idx| &name[idx..])
}
