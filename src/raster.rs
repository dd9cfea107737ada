use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};

use crate::error::Error;

/// A content block that can produce its own raster on demand.
pub trait Renderable {
    fn label(&self) -> String;

    fn rasterize(&self) -> Result<RgbaImage, Error>;
}

/// Rasterizes `block` and rejects empty output.
pub(crate) fn rasterize_checked(block: &dyn Renderable) -> Result<RgbaImage, Error> {
    let img = block.rasterize()?;
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::render(
            &block.label(),
            format!("zero-sized raster ({}x{})", img.width(), img.height()),
        ));
    }
    Ok(img)
}

/// A section that has already been rendered.
pub struct RasterSection {
    name: String,
    image: RgbaImage,
}

impl RasterSection {
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }
}

impl Renderable for RasterSection {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn rasterize(&self) -> Result<RgbaImage, Error> {
        Ok(self.image.clone())
    }
}

impl Renderable for DynamicImage {
    fn label(&self) -> String {
        format!("{}x{} image", self.width(), self.height())
    }

    fn rasterize(&self) -> Result<RgbaImage, Error> {
        Ok(self.to_rgba8())
    }
}

/// A PNG or JPEG on disk, decoded only when the paginator reaches it.
pub struct ImageFileSection {
    path: PathBuf,
}

impl ImageFileSection {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Renderable for ImageFileSection {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn rasterize(&self) -> Result<RgbaImage, Error> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| Error::render(&self.label(), e.to_string()))?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| Error::render(&self.label(), e.to_string()))?;
        Ok(decoded.to_rgba8())
    }
}
