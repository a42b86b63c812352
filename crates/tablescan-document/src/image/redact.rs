// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Redaction — paint detected tables or cells white so a second recognition
// pass over the page does not read them again as body text.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tablescan_core::geometry::Region;
use tablescan_core::table::{DetectedCell, LocatedTable};
use tracing::debug;

const WHITE: Luma<u8> = Luma([255u8]);

/// Copy of `image` with every region filled white.
///
/// A region covers `[h_pos, h_pos + width] × [v_pos, v_pos + height]`, far
/// edges included, and is clipped to the image.
pub fn hide_regions(image: &GrayImage, regions: &[Region]) -> GrayImage {
    let mut output = image.clone();
    for region in regions {
        if region.width < 0 || region.height < 0 {
            debug!(?region, "Skipping inverted region");
            continue;
        }
        let rect = Rect::at(region.h_pos, region.v_pos)
            .of_size(region.width as u32 + 1, region.height as u32 + 1);
        draw_filled_rect_mut(&mut output, rect, WHITE);
    }
    debug!(regions = regions.len(), "Regions hidden");
    output
}

/// Hide the footprint of every table.
pub fn hide_tables<T>(image: &GrayImage, tables: &[LocatedTable<T>]) -> GrayImage {
    let regions: Vec<Region> = tables.iter().map(LocatedTable::region).collect();
    hide_regions(image, &regions)
}

/// Hide every individual cell.
pub fn hide_cells(image: &GrayImage, cells: &[DetectedCell]) -> GrayImage {
    let regions: Vec<Region> = cells.iter().map(|cell| Region::from(&cell.contour)).collect();
    hide_regions(image, &regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablescan_core::geometry::Contour;
    use tablescan_core::table::Table;

    fn textured(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([((x * 7 + y * 13) % 200) as u8]))
    }

    #[test]
    fn region_is_filled_inclusively() {
        let image = textured(60, 40);
        let region = Region {
            h_pos: 10,
            v_pos: 5,
            width: 20,
            height: 10,
        };
        let hidden = hide_regions(&image, &[region]);

        for (x, y, pixel) in hidden.enumerate_pixels() {
            let inside = (10..=30).contains(&x) && (5..=15).contains(&y);
            if inside {
                assert_eq!(pixel.0[0], 255, "({x}, {y}) should be white");
            } else {
                assert_eq!(pixel, image.get_pixel(x, y), "({x}, {y}) should be untouched");
            }
        }
    }

    #[test]
    fn regions_are_clipped_to_the_image() {
        let image = textured(20, 20);
        let hidden = hide_regions(
            &image,
            &[Region {
                h_pos: -5,
                v_pos: 15,
                width: 100,
                height: 100,
            }],
        );
        assert_eq!(hidden.dimensions(), (20, 20));
        assert_eq!(hidden.get_pixel(0, 19).0[0], 255);
        assert_eq!(hidden.get_pixel(3, 10), image.get_pixel(3, 10));
    }

    #[test]
    fn hide_tables_uses_table_footprint() {
        let image = textured(100, 100);
        let table = LocatedTable {
            table: Table::<String>::new(Vec::new(), Vec::new()),
            h_pos: 20,
            v_pos: 30,
            height: 10,
            width: 40,
        };
        let hidden = hide_tables(&image, &[table]);
        assert_eq!(hidden.get_pixel(60, 40).0[0], 255);
        assert_eq!(hidden.get_pixel(61, 40), image.get_pixel(61, 40));
        assert_eq!(hidden.get_pixel(20, 29), image.get_pixel(20, 29));
    }

    #[test]
    fn hide_cells_covers_each_cell() {
        let image = textured(100, 100);
        let cells = vec![
            DetectedCell::new("a", Contour::new(0, 10, 0, 10).unwrap()),
            DetectedCell::new("b", Contour::new(50, 60, 50, 60).unwrap()),
        ];
        let hidden = hide_cells(&image, &cells);
        assert_eq!(hidden.get_pixel(5, 5).0[0], 255);
        assert_eq!(hidden.get_pixel(55, 55).0[0], 255);
        assert_eq!(hidden.get_pixel(30, 30), image.get_pixel(30, 30));
    }
}
