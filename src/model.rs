use crate::error::Error;

pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

pub const DEFAULT_FILE_NAME: &str = "roteiro-rio-de-janeiro.pdf";

/// Physical page size in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 210.0,
        height: 297.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_points(self) -> (f32, f32) {
        (self.width * POINTS_PER_MM, self.height * POINTS_PER_MM)
    }

    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

/// A contiguous vertical band of one section's raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slice {
    pub section: usize,
    pub index: usize,
    pub source_y: u32,
    pub height_px: u32,
    pub width_px: u32,
}

impl Slice {
    pub fn end_y(&self) -> u32 {
        self.source_y + self.height_px
    }
}

/// Where a slice was drawn. Always anchored at the top-left corner of its
/// page; `width`/`height` are in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagePlacement {
    pub page_index: usize,
    pub slice: Slice,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub page: PageSize,
    /// JPEG quality, 1..=100. 95 matches a canvas export at 0.95.
    pub jpeg_quality: u8,
    pub file_name: String,
    pub title: Option<String>,
    pub author: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            jpeg_quality: 95,
            file_name: DEFAULT_FILE_NAME.to_string(),
            title: None,
            author: None,
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.page.is_valid() {
            return Err(Error::Config(format!(
                "page size must be positive, got {}x{} mm",
                self.page.width, self.page.height
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::Config(format!(
                "JPEG quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.file_name.trim().is_empty() {
            return Err(Error::Config("output file name is empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ExportedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub placements: Vec<PagePlacement>,
}

impl ExportedPdf {
    pub fn pages_for_section(&self, section: usize) -> impl Iterator<Item = &PagePlacement> {
        self.placements
            .iter()
            .filter(move |p| p.slice.section == section)
    }
}
