mod error;
pub mod flow;
pub mod itinerary;
mod model;
pub mod pdf;
mod raster;

pub use error::{Error, Result};
pub use model::{
    DEFAULT_FILE_NAME, ExportOptions, ExportedPdf, POINTS_PER_MM, PagePlacement, PageSize, Slice,
};
pub use raster::{ImageFileSection, RasterSection, Renderable};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Paginates the registered sections into a PDF held in memory.
///
/// Unlike [`pdf::render`], an empty section list is refused with
/// [`Error::MissingTarget`] instead of producing a blank page.
pub fn export_sections(sections: &[&dyn Renderable], options: &ExportOptions) -> Result<ExportedPdf> {
    if sections.is_empty() {
        log::warn!("Export requested with no content sections");
        return Err(Error::MissingTarget);
    }
    let t0 = Instant::now();
    let exported = pdf::render(sections, options)?;
    log::info!(
        "Exported {} section(s) into {} page(s) in {:.1}ms ({} bytes)",
        sections.len(),
        exported.page_count,
        t0.elapsed().as_secs_f64() * 1000.0,
        exported.bytes.len(),
    );
    Ok(exported)
}

/// Paginates and saves to `output`. The file is only written once the
/// whole document rendered successfully.
pub fn export_sections_to_file(
    sections: &[&dyn Renderable],
    output: &Path,
    options: &ExportOptions,
) -> Result<ExportedPdf> {
    let t0 = Instant::now();

    let exported = export_sections(sections, options)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &exported.bytes).map_err(|e| {
        Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", e, output.display())))
    })?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        exported.bytes.len(),
    );

    Ok(exported)
}

/// Saves into `dir` under `options.file_name`, returning the full path.
pub fn export_sections_to_dir(
    sections: &[&dyn Renderable],
    dir: &Path,
    options: &ExportOptions,
) -> Result<(PathBuf, ExportedPdf)> {
    let path = dir.join(&options.file_name);
    let exported = export_sections_to_file(sections, &path, options)?;
    Ok((path, exported))
}

/// Convenience for image files on disk, one file per section.
pub fn export_image_files<P: AsRef<Path>>(
    inputs: &[P],
    output: &Path,
    options: &ExportOptions,
) -> Result<ExportedPdf> {
    let files: Vec<ImageFileSection> = inputs.iter().map(ImageFileSection::new).collect();
    let sections: Vec<&dyn Renderable> = files.iter().map(|f| f as &dyn Renderable).collect();
    export_sections_to_file(&sections, output, options)
}
