mod jpeg;
pub mod slicing;

use std::time::{Duration, Instant};

use image::RgbaImage;
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::error::Error;
use crate::model::{ExportOptions, ExportedPdf, PagePlacement, PageSize, Slice};
use crate::raster::{Renderable, rasterize_checked};

use slicing::{plan_slices, slice_height_on_page};

/// An embedded slice waiting for its page.
struct PageImage {
    pdf_name: String,
    xobj_ref: Ref,
    placement: PagePlacement,
}

fn embed_slice(
    pdf: &mut Pdf,
    xobj_ref: Ref,
    raster: &RgbaImage,
    slice: &Slice,
    quality: u8,
    label: &str,
) -> Result<usize, Error> {
    let rgb = jpeg::crop_to_rgb(raster, slice);
    let data = jpeg::encode(&rgb, quality).map_err(|e| Error::Encoding {
        section: label.to_string(),
        slice: slice.index,
        reason: e.to_string(),
    })?;

    let mut xobj = pdf.image_xobject(xobj_ref, &data);
    xobj.filter(Filter::DctDecode);
    xobj.width(slice.width_px as i32);
    xobj.height(slice.height_px as i32);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    Ok(data.len())
}

/// Draws the image so its top edge sits on the top edge of the page.
fn page_content(image: Option<&PageImage>, page: PageSize) -> Content {
    let mut content = Content::new();
    if let Some(img) = image {
        let (page_w, page_h) = page.to_points();
        let (_, img_h) = PageSize::new(img.placement.width, img.placement.height).to_points();
        content.save_state();
        content.transform([page_w, 0.0, 0.0, img_h, 0.0, page_h - img_h]);
        content.x_object(Name(img.pdf_name.as_bytes()));
        content.restore_state();
    }
    content
}

/// Paginates `sections` into a single PDF, one slice per page.
///
/// Sections are rasterized one at a time, in order; each raster is dropped
/// as soon as its last slice is embedded. The first slice of the first
/// section lands on the initial page, every later slice opens a new one,
/// so sections never share a page. With no sections the document is a
/// single blank page.
///
/// Any render or encoding failure aborts the export and nothing is
/// returned.
pub fn render(sections: &[&dyn Renderable], options: &ExportOptions) -> Result<ExportedPdf, Error> {
    options.validate()?;

    let t0 = Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();
    let page = options.page;

    // Phase 1: rasterize, slice and embed, section by section
    let mut images: Vec<PageImage> = Vec::new();
    let mut t_raster = Duration::ZERO;
    let mut jpeg_bytes = 0usize;

    for (si, section) in sections.iter().enumerate() {
        let label = section.label();
        let ts = Instant::now();
        let raster = rasterize_checked(*section)?;
        t_raster += ts.elapsed();

        let slices = plan_slices(si, raster.width(), raster.height(), page);
        log::debug!(
            "Section {} ({}): {}x{} px -> {} page(s), {} px per page",
            si,
            label,
            raster.width(),
            raster.height(),
            slices.len(),
            slicing::page_height_in_pixels(raster.width(), page),
        );

        for slice in slices {
            let xobj_ref = alloc();
            jpeg_bytes += embed_slice(&mut pdf, xobj_ref, &raster, &slice, options.jpeg_quality, &label)?;

            let placement = PagePlacement {
                page_index: images.len(),
                slice,
                width: page.width,
                height: slice_height_on_page(&slice, page),
            };
            log::debug!(
                "  page {}: rows {}..{} -> {:.2}x{:.2} mm",
                placement.page_index + 1,
                slice.source_y,
                slice.end_y(),
                placement.width,
                placement.height,
            );
            images.push(PageImage {
                pdf_name: format!("Im{}", images.len() + 1),
                xobj_ref,
                placement,
            });
        }
    }

    let t_embed = t0.elapsed();

    // Phase 2: allocate page and content IDs now that page count is known
    let n = images.len().max(1);
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for i in 0..n {
        let raw = page_content(images.get(i), page).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    let (page_w, page_h) = page.to_points();
    for i in 0..n {
        let mut pdf_page = pdf.page(page_ids[i]);
        pdf_page
            .media_box(Rect::new(0.0, 0.0, page_w, page_h))
            .parent(pages_id)
            .contents(content_ids[i]);
        if let Some(img) = images.get(i) {
            pdf_page
                .resources()
                .x_objects()
                .pair(Name(img.pdf_name.as_bytes()), img.xobj_ref);
        }
    }

    {
        let mut info = pdf.document_info(info_id);
        info.creator(TextStr(env!("CARGO_PKG_NAME")));
        if let Some(title) = &options.title {
            info.title(TextStr(title));
        }
        if let Some(author) = &options.author {
            info.author(TextStr(author));
        }
    }

    let t_assembly = t0.elapsed();

    log::info!(
        "Render phases: rasterize={:.1}ms, slice+encode={:.1}ms, assembly={:.1}ms ({} sections, {} pages, {} JPEG bytes)",
        t_raster.as_secs_f64() * 1000.0,
        (t_embed - t_raster).as_secs_f64() * 1000.0,
        (t_assembly - t_embed).as_secs_f64() * 1000.0,
        sections.len(),
        n,
        jpeg_bytes,
    );

    let placements = images.into_iter().map(|img| img.placement).collect();
    Ok(ExportedPdf {
        bytes: pdf.finish(),
        page_count: n,
        placements,
    })
}
