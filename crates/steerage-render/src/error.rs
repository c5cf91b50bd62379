use std::{io, path::PathBuf};

/// Failures while writing rendered images.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RenderError {
    #[display("failed to create figures directory {}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[display("failed to save image {}", path.display())]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },
}
