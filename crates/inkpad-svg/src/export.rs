//! Export the canvas to a file download.

use crate::writer::{RenderOptions, write_svg};
use inkpad_core::Document;
use inkpad_core::editor::SelectionRecord;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed name of the exported file.
pub const EXPORT_FILE_NAME: &str = "drawing.svg";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serialize the document to a self-contained SVG and write it as
/// `drawing.svg` in the given directory. Returns the written path.
pub fn export_drawing(
    document: &Document,
    selection: &[SelectionRecord],
    options: &RenderOptions,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let markup = write_svg(document, selection, options);
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, markup).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!("exported {} shapes to {}", document.len(), path.display());
    Ok(path)
}
