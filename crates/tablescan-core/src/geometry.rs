// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry primitives — validated axis-aligned rectangles, their border
// segments, and paint-over regions.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TablescanError};

/// Tolerance, in pixels, under which two coordinates are treated as the same
/// grid line.
pub const PROXIMITY_THRESHOLD: i32 = 10;

/// Default share of the page area above which a contour is the page border.
pub const FULL_PAGE_RATIO: f64 = 0.95;

/// Axis-aligned rectangle detected on a page, candidate for a table cell.
///
/// Bounds satisfy `x0 <= x1 + 1` and `y0 <= y1 + 1`; the one-pixel slack
/// absorbs rounding in upstream detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ContourBounds")]
pub struct Contour {
    x0: i32,
    x1: i32,
    y0: i32,
    y1: i32,
}

impl Contour {
    /// Build a contour, rejecting bounds inverted by more than one pixel.
    pub fn new(x0: i32, x1: i32, y0: i32, y1: i32) -> Result<Self> {
        if i64::from(x0) > i64::from(x1) + 1 || i64::from(y0) > i64::from(y1) + 1 {
            return Err(TablescanError::InvalidContour { x0, x1, y0, y1 });
        }
        Ok(Self { x0, x1, y0, y1 })
    }

    /// Bounding rectangle of a polygon, `None` for an empty polygon.
    ///
    /// Matches the usual pixel bounding-rect convention: the far edge sits one
    /// past the last covered pixel.
    pub fn bounding(points: &[(i32, i32)]) -> Option<Self> {
        let (&(first_x, first_y), rest) = points.split_first()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first_x, first_x, first_y, first_y);
        for &(x, y) in rest {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        Some(Self {
            x0: min_x,
            x1: max_x.saturating_add(1),
            y0: min_y,
            y1: max_y.saturating_add(1),
        })
    }

    pub fn x0(&self) -> i32 {
        self.x0
    }

    pub fn x1(&self) -> i32 {
        self.x1
    }

    pub fn y0(&self) -> i32 {
        self.y0
    }

    pub fn y1(&self) -> i32 {
        self.y1
    }

    /// Horizontal extent, widened so that bounds spanning the whole `i32`
    /// range cannot overflow.
    pub fn width(&self) -> i64 {
        i64::from(self.x1) - i64::from(self.x0)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.y1) - i64::from(self.y0)
    }

    /// Signed area; at most slightly negative for one-pixel inversions.
    pub fn area(&self) -> i64 {
        self.width().saturating_mul(self.height())
    }

    /// Too thin on either axis to hold any content.
    pub fn is_degenerate(&self) -> bool {
        let min_side = i64::from(4 * PROXIMITY_THRESHOLD);
        self.width().abs() <= min_side || self.height().abs() <= min_side
    }

    /// Covers at least `ratio` of an image of `image_area` pixels.
    pub fn is_full_page(&self, image_area: u64, ratio: f64) -> bool {
        if image_area == 0 {
            return true;
        }
        self.area() as f64 / image_area as f64 >= ratio
    }

    // -- Border segments ------------------------------------------------------

    pub fn left_border(&self) -> BorderSegment {
        BorderSegment::new(self.y0, self.y1, self.x0)
    }

    pub fn right_border(&self) -> BorderSegment {
        BorderSegment::new(self.y0, self.y1, self.x1)
    }

    pub fn top_border(&self) -> BorderSegment {
        BorderSegment::new(self.x0, self.x1, self.y0)
    }

    pub fn bottom_border(&self) -> BorderSegment {
        BorderSegment::new(self.x0, self.x1, self.y1)
    }
}

/// Unvalidated wire form of a [`Contour`].
#[derive(Deserialize)]
struct ContourBounds {
    x0: i32,
    x1: i32,
    y0: i32,
    y1: i32,
}

impl TryFrom<ContourBounds> for Contour {
    type Error = TablescanError;

    fn try_from(bounds: ContourBounds) -> Result<Self> {
        Self::new(bounds.x0, bounds.x1, bounds.y0, bounds.y1)
    }
}

/// One side of a rectangle: a span along one axis at a fixed position on the
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSegment {
    pub start: i32,
    pub end: i32,
    pub position: i32,
}

impl BorderSegment {
    pub fn new(start: i32, end: i32, position: i32) -> Self {
        Self {
            start,
            end,
            position,
        }
    }

    /// Whether the two spans share at least one unit, with one unit of slack
    /// on either end.
    pub fn overlaps(&self, other: &BorderSegment) -> bool {
        let within = |value: i32, seg: &BorderSegment| {
            let value = i64::from(value);
            i64::from(seg.start) - 1 <= value && value <= i64::from(seg.end) + 1
        };
        within(other.start, self)
            || within(other.end, self)
            || within(self.start, other)
            || within(self.end, other)
    }

    /// Lies on nearly the same line as `other` and overlaps it.
    pub fn touches(&self, other: &BorderSegment) -> bool {
        self.position.abs_diff(other.position) < PROXIMITY_THRESHOLD as u32 && self.overlaps(other)
    }
}

/// Rectangle to paint over, in page pixel coordinates. Sides too long for an
/// `i32` saturate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub h_pos: i32,
    pub v_pos: i32,
    pub width: i32,
    pub height: i32,
}

impl From<&Contour> for Region {
    fn from(contour: &Contour) -> Self {
        Self {
            h_pos: contour.x0,
            v_pos: contour.y0,
            width: saturate(contour.width()),
            height: saturate(contour.height()),
        }
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_pixel_slack() {
        assert!(Contour::new(5, 4, 0, 10).is_ok());
        assert!(Contour::new(0, 10, 5, 4).is_ok());
        assert!(Contour::new(0, 0, 0, 0).is_ok());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let result = Contour::new(12, 10, 0, 10);
        assert!(matches!(
            result,
            Err(TablescanError::InvalidContour { x0: 12, x1: 10, .. })
        ));
        assert!(Contour::new(0, 10, 7, 5).is_err());
    }

    #[test]
    fn area_and_sides() {
        let contour = Contour::new(10, 110, 20, 70).unwrap();
        assert_eq!(contour.width(), 100);
        assert_eq!(contour.height(), 50);
        assert_eq!(contour.area(), 5000);
    }

    #[test]
    fn extreme_bounds_do_not_overflow() {
        let wide = Contour::new(-2_000_000_000, 2_000_000_000, 0, 100).unwrap();
        assert_eq!(wide.width(), 4_000_000_000);
        assert_eq!(wide.area(), 400_000_000_000);
        assert!(!wide.is_degenerate());
        assert_eq!(Region::from(&wide).width, i32::MAX);

        assert!(Contour::new(i32::MAX, i32::MAX, i32::MIN, i32::MIN).is_ok());
        assert!(Contour::new(i32::MAX, i32::MIN, 0, 0).is_err());

        let far = BorderSegment::new(0, 10, i32::MIN);
        assert!(!far.touches(&BorderSegment::new(0, 10, i32::MAX)));
        assert!(!far.overlaps(&BorderSegment::new(i32::MAX - 5, i32::MAX, 0)));
    }

    #[test]
    fn degenerate_when_thinner_than_four_thresholds() {
        assert!(Contour::new(0, 40, 0, 100).unwrap().is_degenerate());
        assert!(Contour::new(0, 100, 0, 40).unwrap().is_degenerate());
        assert!(!Contour::new(0, 41, 0, 41).unwrap().is_degenerate());
    }

    #[test]
    fn full_page_detection() {
        let page_area = 1000 * 1000;
        assert!(Contour::new(0, 1000, 0, 1000).unwrap().is_full_page(page_area, FULL_PAGE_RATIO));
        assert!(Contour::new(0, 980, 0, 980).unwrap().is_full_page(page_area, FULL_PAGE_RATIO));
        assert!(!Contour::new(0, 900, 0, 900).unwrap().is_full_page(page_area, FULL_PAGE_RATIO));
    }

    #[test]
    fn bounding_rect_of_polygon() {
        let points = [(10, 20), (50, 20), (50, 80), (10, 80)];
        let contour = Contour::bounding(&points).unwrap();
        assert_eq!(contour, Contour::new(10, 51, 20, 81).unwrap());
        assert!(Contour::bounding(&[]).is_none());
    }

    #[test]
    fn segments_touch_when_close_and_overlapping() {
        let a = BorderSegment::new(0, 100, 50);
        assert!(a.touches(&BorderSegment::new(100, 200, 55)));
        assert!(a.touches(&BorderSegment::new(101, 200, 50)));
        assert!(!a.touches(&BorderSegment::new(102, 200, 50)));
        assert!(!a.touches(&BorderSegment::new(0, 100, 60)));
        // Containment counts as overlap in both directions.
        assert!(a.touches(&BorderSegment::new(-50, 150, 45)));
    }

    #[test]
    fn deserialization_revalidates_bounds() {
        let ok: Contour = serde_json::from_str(r#"{"x0":1,"x1":2,"y0":3,"y1":4}"#).unwrap();
        assert_eq!(ok, Contour::new(1, 2, 3, 4).unwrap());
        let bad = serde_json::from_str::<Contour>(r#"{"x0":9,"x1":2,"y0":3,"y1":4}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn region_from_contour() {
        let contour = Contour::new(3, 13, 4, 24).unwrap();
        assert_eq!(
            Region::from(&contour),
            Region {
                h_pos: 3,
                v_pos: 4,
                width: 10,
                height: 20
            }
        );
    }
}
