#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use roteiro_pdf::itinerary::PreferenceRecord;
use roteiro_pdf::{RasterSection, Renderable};

/// A raster with a vertical gradient and a stripe every 100 rows, so JPEG
/// slices are not trivially compressible.
pub fn striped(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let band = if (y / 100) % 2 == 0 { 40 } else { 200 };
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            band,
            255,
        ])
    })
}

pub fn section(name: &str, width: u32, height: u32) -> RasterSection {
    RasterSection::new(name, striped(width, height))
}

pub fn as_renderables(sections: &[RasterSection]) -> Vec<&dyn Renderable> {
    sections.iter().map(|s| s as &dyn Renderable).collect()
}

pub fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn sample_preferences() -> PreferenceRecord {
    PreferenceRecord {
        name: "Ana".into(),
        email: "ana@example.com".into(),
        duration_days: "3".into(),
        start_date: "2026-12-01".into(),
        lodging_neighborhood: "Copacabana".into(),
        lodging_type: "Hotel".into(),
        group_composition: vec!["Casal".into()],
        min_age: "30".into(),
        max_age: "34".into(),
        accessibility: "Não".into(),
        interests: vec!["Praias".into(), "Gastronomia".into()],
        pacing: "Moderado".into(),
        daily_budget: "R$ 100-200".into(),
        transport: vec!["Metrô".into(), "Uber".into()],
        home_meals: "Não".into(),
        home_meal_kinds: vec![],
        optimize_time: "Sim".into(),
        ..Default::default()
    }
}
