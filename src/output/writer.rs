use std::path::Path;

use tokio::fs;

use crate::error::{Result, VectorError};
use crate::types::TestVectorDocument;

/// Serialize `doc` as 2-space indented JSON and write it to `path`.
///
/// The document is written to a sibling `.tmp` file and renamed into place, so
/// a failed run never leaves a truncated vectors file behind. Returns the
/// number of bytes written. Parent directories are created as needed.
pub async fn write_document(doc: &TestVectorDocument, path: &str) -> Result<usize> {
    let json = serde_json::to_string_pretty(doc)?;
    let write_err = |source: std::io::Error| VectorError::Write { path: path.to_string(), source };

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(write_err)?;
        }
    }

    let tmp = format!("{}.tmp", path);
    if let Err(source) = fs::write(&tmp, json.as_bytes()).await {
        fs::remove_file(&tmp).await.ok();
        return Err(write_err(source));
    }
    if let Err(source) = fs::rename(&tmp, path).await {
        fs::remove_file(&tmp).await.ok();
        return Err(write_err(source));
    }

    eprintln!("[WRITE] {} cases, {} bytes → {}", doc.total_cases(), json.len(), path);
    Ok(json.len())
}
