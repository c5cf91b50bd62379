use std::{
    fs,
    path::{Path, PathBuf},
};

use image::RgbImage;
use steerage_table::report::ReportFrame;
use tracing::info;

use crate::{
    error::RenderError,
    table_image::{TableStyle, render_table},
};

/// Saves named figures as PNG files into one directory.
#[derive(Debug, Clone)]
pub struct FigureWriter {
    dir: PathBuf,
}

impl FigureWriter {
    /// Uses `dir` as the output directory, creating it if needed.
    pub fn create<P>(dir: P) -> Result<Self, RenderError>
    where
        P: Into<PathBuf>,
    {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| RenderError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the figure `name`, i.e. `<dir>/<name>.png`.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.png"))
    }

    /// Writes `image` as `<name>.png`, replacing an existing file.
    pub fn save(&self, name: &str, image: &RgbImage) -> Result<PathBuf, RenderError> {
        let path = self.path_for(name);
        image
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|source| RenderError::Save {
                path: path.clone(),
                source,
            })?;
        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "saved figure"
        );
        Ok(path)
    }

    /// Renders `frame` as a table image and saves it as `<name>.png`.
    pub fn save_table(
        &self,
        name: &str,
        frame: &ReportFrame,
        title: Option<&str>,
        style: &TableStyle,
    ) -> Result<PathBuf, RenderError> {
        self.save(name, &render_table(frame, title, style))
    }
}

#[cfg(test)]
mod tests {
    use steerage_table::column::Cell;

    use super::*;

    #[test]
    fn test_creates_directory_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = FigureWriter::create(tmp.path().join("figures/nested")).unwrap();
        assert!(writer.dir().is_dir());

        let mut frame = ReportFrame::new(["n_rows", "n_cols"]);
        frame.push_row(0, vec![Cell::Int(891), Cell::Int(8)]);
        let path = writer
            .save_table("tbl_shape", &frame, Some("Shape"), &TableStyle::default())
            .unwrap();
        assert_eq!(path, writer.path_for("tbl_shape"));

        let small = RgbImage::new(10, 10);
        writer.save("tbl_shape", &small).unwrap();
        let reloaded = image::open(&path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (10, 10));
    }

    #[test]
    fn test_directory_blocked_by_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("figures");
        fs::write(&blocker, "not a directory").unwrap();
        let err = FigureWriter::create(&blocker).unwrap_err();
        assert!(matches!(err, RenderError::CreateDir { .. }));
    }
}
