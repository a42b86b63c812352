// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — page inspection and the rasteriser seam that turns PDF pages
// into images for scanning.

pub mod reader;

use std::path::Path;

use image::GrayImage;
use tablescan_core::error::Result;

pub use reader::PdfReader;

/// Renders PDF pages to grayscale rasters.
///
/// Rendering is left to an external engine (poppler, pdfium, mupdf, ...);
/// implementations wrap one of them.
pub trait PageRasterizer {
    /// Raster of page `index` (zero-based).
    fn rasterize_page(&self, path: &Path, index: usize) -> Result<GrayImage>;

    /// Number of pages in the document at `path`.
    fn page_count(&self, path: &Path) -> Result<usize> {
        Ok(PdfReader::open(path)?.page_count())
    }
}

impl<P: PageRasterizer + ?Sized> PageRasterizer for &P {
    fn rasterize_page(&self, path: &Path, index: usize) -> Result<GrayImage> {
        (**self).rasterize_page(path, index)
    }

    fn page_count(&self, path: &Path) -> Result<usize> {
        (**self).page_count(path)
    }
}
