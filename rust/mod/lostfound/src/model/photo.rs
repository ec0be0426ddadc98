use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// An item photo, inlined into the record as an encoded data URL.
///
/// The workflow treats the payload as opaque text: it only cares that a
/// non-empty payload is present at submission time. Encoding happens up
/// front, before the item is constructed; a failed read aborts the
/// submission with nothing written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo(String);

impl Photo {
    /// Wrap an already-encoded payload (e.g. a data URL posted by a client).
    pub fn from_encoded(payload: impl Into<String>) -> Photo {
        Photo(payload.into())
    }

    /// Encode raw image bytes as a `data:` URL.
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Photo {
        Photo(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    /// Read an image file and encode it. The read must complete before a
    /// report can be submitted; an I/O error propagates to the caller.
    pub fn load(path: &Path) -> std::io::Result<Photo> {
        let bytes = std::fs::read(path)?;
        let mime = match path.extension().and_then(|e| e.to_str()) {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        };
        Ok(Photo::from_bytes(mime, &bytes))
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
