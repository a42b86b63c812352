// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — page rasters, ruling-line contour extraction, and redaction.

pub mod lines;
pub mod page;
pub mod redact;

pub use lines::{ContourExtractor, LineGridExtractor, Polygon, contours_to_rectangles};
pub use page::{crop_cell, open_page, save_gray};
pub use redact::{hide_cells, hide_regions, hide_tables};
