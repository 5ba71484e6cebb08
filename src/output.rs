use crate::error::{CreatureError, Result};
use std::path::Path;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn looks_like_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Writes `bytes` to `path` verbatim and returns the byte count. The payload
/// is never validated; a non-PNG body only produces a warning.
pub async fn write_image(path: &Path, bytes: &[u8]) -> Result<usize> {
    tokio::fs::write(path, bytes).await.map_err(|e| {
        CreatureError::IoError(format!("Failed to write {}: {}", path.display(), e))
    })?;

    if looks_like_png(bytes) {
        log::info!("💾 Wrote {} bytes of PNG to {}", bytes.len(), path.display());
    } else {
        log::warn!(
            "⚠️  Wrote {} bytes to {}, but they do not start with a PNG signature",
            bytes.len(),
            path.display()
        );
    }
    Ok(bytes.len())
}
