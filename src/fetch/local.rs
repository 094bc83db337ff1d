use std::fs;
use std::io;
use std::path::Path;

use log::info;
use walkdir::WalkDir;

use super::{FetchError, SourceDoc};

/// Collect `.py` files under a local directory, in stable name order.
pub fn collect_local_samples(dir: &Path) -> Result<Vec<SourceDoc>, FetchError> {
    let mut docs = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("py") {
            continue;
        }
        let content = fs::read_to_string(path)?;
        docs.push(SourceDoc {
            name: entry.file_name().to_string_lossy().into_owned(),
            content,
            path: path.display().to_string(),
        });
    }

    info!("collected {} samples from {}", docs.len(), dir.display());
    Ok(docs)
}
