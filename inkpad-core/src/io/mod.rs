//! # Export
//!
//! The two durable outputs of a session: a PNG of the canvas, and an SVG of the document.
//! Neither reads anything but the canvas or the shape list, so an export can never change the
//! session - whatever the outcome.

pub mod png;
pub mod svg;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("failed to encode png: {0}")]
    Png(#[from] ::png::EncodingError),
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persist exported bytes to a host-chosen path, replacing any existing file.
/// No retry is attempted.
pub fn write_path(path: impl AsRef<std::path::Path>, bytes: &[u8]) -> Result<(), ExportError> {
    let path = path.as_ref();
    std::fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_owned(),
        source,
    })?;
    log::debug!("Wrote {} bytes to {path:?}", bytes.len());
    Ok(())
}
