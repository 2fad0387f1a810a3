//! Recursive discovery of PDF files under an input directory.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::{ConvertError, Result};
use crate::models::config::DiscoveryConfig;

/// Extension selected by discovery. Compared case-sensitively.
pub const PDF_EXTENSION: &str = "pdf";

/// List every non-directory entry ending in `.pdf` under `dir`, recursively.
///
/// Entries are returned in traversal order; with [`DiscoveryConfig::sorted`]
/// each directory is visited in file-name order, which makes the result
/// deterministic. The first filesystem error aborts the walk.
pub fn list_pdfs(dir: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(dir).map_err(|source| ConvertError::Discovery {
        path: dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(ConvertError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut walker = WalkDir::new(dir).follow_links(config.follow_links);
    if config.sorted {
        walker = walker.sort_by_file_name();
    }

    let mut pdfs = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| ConvertError::Discovery {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
            source: e.into(),
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        if is_pdf(entry.path()) {
            trace!("Discovered {}", entry.path().display());
            pdfs.push(entry.into_path());
        }
    }

    debug!("Found {} PDF files under {}", pdfs.len(), dir.display());
    Ok(pdfs)
}

/// True when the file name ends in `.pdf`, including a bare `.pdf`.
pub fn is_pdf(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.as_encoded_bytes();
    name.len() > PDF_EXTENSION.len()
        && name.ends_with(PDF_EXTENSION.as_bytes())
        && name[name.len() - PDF_EXTENSION.len() - 1] == b'.'
}
