use crate::model::{PageSize, Slice};

/// Source pixels per millimetre of output at full page width.
pub fn ratio(img_width: u32, page: PageSize) -> f64 {
    img_width as f64 / page.width as f64
}

/// How many source rows fill one page at this section's scale, rounded
/// down to whole pixels.
pub fn page_height_in_pixels(img_width: u32, page: PageSize) -> u32 {
    // Multiply before dividing so 297 * 210 / 210 stays exact.
    let exact = page.height as f64 * img_width as f64 / page.width as f64;
    ((exact + 1e-9).floor() as u32).max(1)
}

/// Cuts a `img_width` x `img_height` raster into page-sized bands, top to
/// bottom. The bands tile the raster exactly.
pub fn plan_slices(section: usize, img_width: u32, img_height: u32, page: PageSize) -> Vec<Slice> {
    let page_px = page_height_in_pixels(img_width, page);
    let mut slices = Vec::with_capacity(img_height.div_ceil(page_px) as usize);
    let mut y = 0u32;
    while y < img_height {
        let height_px = page_px.min(img_height - y);
        slices.push(Slice {
            section,
            index: slices.len(),
            source_y: y,
            height_px,
            width_px: img_width,
        });
        y += height_px;
    }
    slices
}

/// Height in millimetres a slice occupies once scaled to the page width.
pub fn slice_height_on_page(slice: &Slice, page: PageSize) -> f32 {
    (slice.height_px as f64 / ratio(slice.width_px, page)) as f32
}
