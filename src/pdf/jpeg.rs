use image::codecs::jpeg::JpegEncoder;
use image::{RgbImage, RgbaImage};

use crate::model::Slice;

/// Copies the slice's band out of `src`, compositing alpha onto white.
pub(super) fn crop_to_rgb(src: &RgbaImage, slice: &Slice) -> RgbImage {
    let band = image::imageops::crop_imm(src, 0, slice.source_y, slice.width_px, slice.height_px)
        .to_image();
    let mut out = RgbImage::new(band.width(), band.height());
    for (dst, px) in out.pixels_mut().zip(band.pixels()) {
        let [r, g, b, a] = px.0;
        let a = a as u16;
        let over_white = |c: u8| ((c as u16 * a + 255 * (255 - a) + 127) / 255) as u8;
        dst.0 = [over_white(r), over_white(g), over_white(b)];
    }
    out
}

pub(super) fn encode(rgb: &RgbImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality).encode_image(rgb)?;
    Ok(buf)
}
