mod common;

use roteiro_pdf::pdf::slicing::{page_height_in_pixels, plan_slices, ratio, slice_height_on_page};
use roteiro_pdf::{ExportOptions, PageSize, Slice};

fn heights(slices: &[Slice]) -> Vec<u32> {
    slices.iter().map(|s| s.height_px).collect()
}

fn assert_tiles(slices: &[Slice], img_height: u32) {
    let mut y = 0;
    for s in slices {
        assert_eq!(s.source_y, y, "gap or overlap at slice {}", s.index);
        assert!(s.height_px > 0, "zero-height slice {}", s.index);
        y = s.end_y();
    }
    assert_eq!(y, img_height);
}

#[test]
fn a4_page_height_rounds_down() {
    let page = PageSize::A4;
    assert!((ratio(1000, page) - 1000.0 / 210.0).abs() < 1e-9);
    assert_eq!(page_height_in_pixels(1000, page), 1414);
    // 297 * 210 / 210 must not become 296
    assert_eq!(page_height_in_pixels(210, page), 297);
}

#[test]
fn short_section_is_one_page() {
    let page = PageSize::A4;
    for h in [1, 10, 1000, 1413, 1414] {
        let slices = plan_slices(0, 1000, h, page);
        assert_eq!(heights(&slices), vec![h], "height {h}");
    }
}

#[test]
fn exact_multiple_has_no_trailing_page() {
    let page = PageSize::A4;
    for k in 1..=4u32 {
        let slices = plan_slices(0, 210, 297 * k, page);
        assert_eq!(slices.len(), k as usize);
        assert!(slices.iter().all(|s| s.height_px == 297));
        assert_tiles(&slices, 297 * k);
    }
}

#[test]
fn remainder_goes_on_last_page() {
    let page = PageSize::A4;
    for (k, r) in [(1u32, 1u32), (2, 150), (3, 296)] {
        let h = 297 * k + r;
        let slices = plan_slices(0, 210, h, page);
        assert_eq!(slices.len(), k as usize + 1);
        assert_eq!(slices.last().unwrap().height_px, r);
        assert_tiles(&slices, h);
    }
}

#[test]
fn slices_tile_section_for_many_sizes() {
    let page = PageSize::A4;
    for w in [1, 3, 210, 333, 1000, 2480] {
        for h in [1, 2, 499, 1414, 1415, 5000, 12345] {
            let slices = plan_slices(7, w, h, page);
            let per_page = page_height_in_pixels(w, page);
            assert_eq!(slices.len() as u32, h.div_ceil(per_page), "{w}x{h}");
            assert!(slices.iter().all(|s| s.section == 7 && s.width_px == w));
            assert!(slices.iter().enumerate().all(|(i, s)| s.index == i));
            assert_tiles(&slices, h);
        }
    }
}

#[test]
fn zero_height_plans_nothing() {
    assert!(plan_slices(0, 1000, 0, PageSize::A4).is_empty());
}

#[test]
fn tall_thin_raster_keeps_at_least_one_row_per_page() {
    let page = PageSize::new(1000.0, 0.5);
    assert_eq!(page_height_in_pixels(1, page), 1);
    assert_eq!(plan_slices(0, 1, 3, page).len(), 3);
}

#[test]
fn one_section_2500px_spans_two_pages() {
    common::init_logging();
    let sections = [common::section("itinerary", 1000, 2500)];
    let exported =
        roteiro_pdf::export_sections(&common::as_renderables(&sections), &ExportOptions::default())
            .unwrap();

    assert_eq!(exported.page_count, 2);
    let p = &exported.placements;
    assert_eq!((p[0].slice.source_y, p[0].slice.height_px), (0, 1414));
    assert_eq!((p[1].slice.source_y, p[1].slice.height_px), (1414, 1086));

    for placement in p {
        assert_eq!(placement.width, 210.0);
    }
    assert!((p[0].height - 1414.0 * 210.0 / 1000.0).abs() < 1e-3);
    assert!((p[1].height - 1086.0 * 210.0 / 1000.0).abs() < 1e-3);
    assert!(p[0].height <= 297.0);
}

#[test]
fn sections_never_share_a_page() {
    // 500 px wide on a 100x200 mm page: 1000 px per page
    let options = ExportOptions {
        page: PageSize::new(100.0, 200.0),
        ..Default::default()
    };
    let sections = [
        common::section("cover", 500, 500),
        common::section("days", 500, 2000),
    ];
    let exported =
        roteiro_pdf::export_sections(&common::as_renderables(&sections), &options).unwrap();

    assert_eq!(exported.page_count, 3);
    let owners: Vec<usize> = exported.placements.iter().map(|p| p.slice.section).collect();
    assert_eq!(owners, vec![0, 1, 1]);
    assert_eq!(exported.pages_for_section(0).count(), 1);
    assert_eq!(exported.pages_for_section(1).count(), 2);
    assert_eq!(exported.placements[1].page_index, 1);
    assert_eq!(exported.placements[1].slice.source_y, 0);
}

#[test]
fn page_count_is_sum_of_section_counts() {
    let page = PageSize::A4;
    let dims = [(800, 300), (1200, 4000), (600, 849), (600, 850), (2000, 2829)];
    let sections: Vec<_> = dims
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| common::section(&format!("s{i}"), w, h))
        .collect();
    let exported =
        roteiro_pdf::export_sections(&common::as_renderables(&sections), &ExportOptions::default())
            .unwrap();

    let expected: usize = dims
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| plan_slices(i, w, h, page).len())
        .sum();
    assert_eq!(exported.page_count, expected);
    assert_eq!(exported.placements.len(), expected);

    for (i, &(_, h)) in dims.iter().enumerate() {
        let total: u32 = exported.pages_for_section(i).map(|p| p.slice.height_px).sum();
        assert_eq!(total, h, "section {i}");
    }
    for (i, p) in exported.placements.iter().enumerate() {
        assert_eq!(p.page_index, i);
    }
}

#[test]
fn sections_at_different_widths_use_their_own_ratio() {
    let page = PageSize::A4;
    let sections = [common::section("narrow", 210, 297), common::section("wide", 420, 594)];
    let exported =
        roteiro_pdf::export_sections(&common::as_renderables(&sections), &ExportOptions::default())
            .unwrap();

    assert_eq!(exported.page_count, 2);
    for p in &exported.placements {
        assert!((p.height - 297.0).abs() < 1e-3);
        assert!((slice_height_on_page(&p.slice, page) - p.height).abs() < 1e-6);
    }
}
