// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ruling-line contour extraction — isolate the horizontal and vertical
// strokes of ruled tables with morphological opening, then trace the white
// regions they enclose. Also the conversion of raw contours into validated
// cell rectangles.

use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, find_contours};
use imageproc::contrast::otsu_level;
use tablescan_core::config::ExtractionConfig;
use tablescan_core::error::Result;
use tablescan_core::geometry::Contour;
use tracing::{debug, info, instrument};

/// Closed polygon traced around a region, in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub points: Vec<(i32, i32)>,
}

impl Polygon {
    pub fn new(points: Vec<(i32, i32)>) -> Self {
        Self { points }
    }

    /// Enclosed area (shoelace formula).
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area: i64 = 0;
        for i in 0..n {
            let (x_i, y_i) = self.points[i];
            let (x_j, y_j) = self.points[(i + 1) % n];
            twice_area += i64::from(x_i) * i64::from(y_j) - i64::from(x_j) * i64::from(y_i);
        }
        twice_area.abs() as f64 / 2.0
    }

    /// Share of the polygon's bounding box that the polygon fills.
    pub fn rectangularity(&self) -> f64 {
        let Some(bounds) = Contour::bounding(&self.points) else {
            return 0.0;
        };
        // Bounding box through the outermost points, not one past them.
        let box_area = (bounds.width() - 1) as f64 * (bounds.height() - 1) as f64;
        if box_area <= 0.0 {
            return 0.0;
        }
        self.area() / box_area
    }
}

/// Finds candidate cell outlines on a single-channel page image.
pub trait ContourExtractor {
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Polygon>>;
}

/// Turn raw contours into cell rectangles, dropping slivers and the page
/// border.
pub fn contours_to_rectangles(polygons: &[Polygon], image_area: u64, full_page_ratio: f64) -> Vec<Contour> {
    let mut degenerate = 0usize;
    let mut full_page = 0usize;
    let rectangles: Vec<Contour> = polygons
        .iter()
        .filter_map(|polygon| Contour::bounding(&polygon.points))
        .filter(|contour| {
            if contour.is_degenerate() {
                degenerate += 1;
                return false;
            }
            if contour.is_full_page(image_area, full_page_ratio) {
                full_page += 1;
                return false;
            }
            true
        })
        .collect();
    debug!(
        kept = rectangles.len(),
        degenerate,
        full_page,
        "Contours converted to rectangles"
    );
    rectangles
}

/// Contour extractor for ruled tables built on morphological line detection.
#[derive(Debug, Clone)]
pub struct LineGridExtractor {
    binarize_threshold: u8,
    line_kernel_divisor: u32,
    iterations: u32,
    rectangularity: f64,
}

impl Default for LineGridExtractor {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

impl LineGridExtractor {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            binarize_threshold: config.binarize_threshold,
            line_kernel_divisor: config.line_kernel_divisor.max(1),
            iterations: config.morphology_iterations,
            rectangularity: config.rectangularity,
        }
    }

    /// Mask of the page with ruling lines black and everything else white.
    pub fn cell_mask(&self, image: &GrayImage) -> GrayImage {
        let (width, height) = image.dimensions();
        let inverted = invert_threshold(image, self.binarize_threshold);

        let vertical_len = (height / self.line_kernel_divisor).max(1);
        let horizontal_len = (width / self.line_kernel_divisor).max(1);
        let vertical = open_lines(&inverted, Axis::Vertical, vertical_len, self.iterations);
        let horizontal = open_lines(&inverted, Axis::Horizontal, horizontal_len, self.iterations);
        debug!(vertical_len, horizontal_len, "Ruling lines isolated");

        // Average both masks, then flip so cells are bright.
        let combined = GrayImage::from_fn(width, height, |x, y| {
            let v = u16::from(vertical.get_pixel(x, y).0[0]);
            let h = u16::from(horizontal.get_pixel(x, y).0[0]);
            Luma([255 - ((v + h + 1) / 2) as u8])
        });

        // Widen the lines slightly so touching cells separate.
        let mut eroded = combined;
        for _ in 0..2 {
            eroded = erode_corner(&eroded);
        }

        let threshold = otsu_level(&eroded);
        debug!(threshold, "Otsu threshold computed");
        GrayImage::from_fn(width, height, |x, y| {
            Luma([if eroded.get_pixel(x, y).0[0] > threshold { 255 } else { 0 }])
        })
    }
}

impl ContourExtractor for LineGridExtractor {
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Polygon>> {
        let mask = self.cell_mask(image);
        let traced = find_contours::<i32>(&mask);
        let total = traced.len();

        let polygons: Vec<Polygon> = traced
            .into_iter()
            .filter(|contour| matches!(contour.border_type, BorderType::Outer))
            .map(|contour| Polygon::new(contour.points.iter().map(|p| (p.x, p.y)).collect()))
            .filter(|polygon| polygon.rectangularity() >= self.rectangularity)
            .collect();

        info!(traced = total, rectangular = polygons.len(), "Cell contours extracted");
        Ok(polygons)
    }
}

// -- Morphology helpers -------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Dark pixels become 255 and light pixels 0.
fn invert_threshold(image: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([if image.get_pixel(x, y).0[0] > threshold { 0 } else { 255 }])
    })
}

/// Min (erosion) or max (dilation) over a 1-pixel-thick window of `len`
/// pixels along `axis`, anchored at the window centre. Pixels outside the
/// image are ignored.
fn line_filter(image: &GrayImage, axis: Axis, len: u32, erode: bool) -> GrayImage {
    let (width, height) = image.dimensions();
    let before = i64::from(len / 2);
    let after = i64::from(len) - 1 - before;
    GrayImage::from_fn(width, height, |x, y| {
        let mut acc: u8 = if erode { 255 } else { 0 };
        for offset in -before..=after {
            let (sx, sy) = match axis {
                Axis::Horizontal => (i64::from(x) + offset, i64::from(y)),
                Axis::Vertical => (i64::from(x), i64::from(y) + offset),
            };
            if sx < 0 || sy < 0 || sx >= i64::from(width) || sy >= i64::from(height) {
                continue;
            }
            let value = image.get_pixel(sx as u32, sy as u32).0[0];
            acc = if erode { acc.min(value) } else { acc.max(value) };
        }
        Luma([acc])
    })
}

/// Morphological opening: keeps only strokes at least `len` pixels long
/// along `axis`.
fn open_lines(image: &GrayImage, axis: Axis, len: u32, iterations: u32) -> GrayImage {
    let mut current = image.clone();
    for _ in 0..iterations {
        current = line_filter(&current, axis, len, true);
    }
    for _ in 0..iterations {
        current = line_filter(&current, axis, len, false);
    }
    current
}

/// Erosion with a 2×2 kernel anchored at its bottom-right pixel.
fn erode_corner(image: &GrayImage) -> GrayImage {
    let horizontal = line_filter(image, Axis::Horizontal, 2, true);
    line_filter(&horizontal, Axis::Vertical, 2, true)
}
