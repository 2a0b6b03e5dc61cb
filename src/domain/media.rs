//! Uploaded image payloads.

/// An image received from a multipart form field.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied file name, used only to derive the suffix.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn suffix(&self) -> Option<String> {
        image_suffix(&self.file_name)
    }
}

/// Suffix of `file_name` including the leading dot (`".png"`), lower-cased.
///
/// Returns `None` when there is no dot or nothing but whitespace follows the
/// last one. Only the final path component is considered.
pub fn image_suffix(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (_, ext) = base.rsplit_once('.')?;
    let ext = ext.trim();
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}
