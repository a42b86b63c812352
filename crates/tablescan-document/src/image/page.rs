// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rasters — load a scanned page as grayscale, cut cells out of it, and
// write redacted pages back to disk.

use std::path::Path;

use image::GrayImage;
use tablescan_core::error::{Result, TablescanError};
use tablescan_core::geometry::Contour;
use tracing::{info, instrument};

/// Load an image from disk and convert it to 8-bit grayscale.
///
/// A missing file is reported as [`TablescanError::DocumentNotFound`].
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open_page(path: impl AsRef<Path>) -> Result<GrayImage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TablescanError::DocumentNotFound(path.to_path_buf()));
    }
    let img = image::open(path).map_err(|err| {
        TablescanError::ImageError(format!("failed to open {}: {}", path.display(), err))
    })?;
    let page = img.to_luma8();
    info!(width = page.width(), height = page.height(), "Page image loaded");
    Ok(page)
}

/// Sub-image `[y0, y1) × [x0, x1)` of `image`, clipped to its bounds.
pub fn crop_cell(image: &GrayImage, contour: &Contour) -> GrayImage {
    let clamp_x = |v: i32| v.clamp(0, image.width() as i32) as u32;
    let clamp_y = |v: i32| v.clamp(0, image.height() as i32) as u32;
    let (x0, x1) = (clamp_x(contour.x0()), clamp_x(contour.x1()));
    let (y0, y1) = (clamp_y(contour.y0()), clamp_y(contour.y1()));
    image::imageops::crop_imm(image, x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0)).to_image()
}

/// Write a grayscale raster to disk. The format is inferred from the
/// extension.
pub fn save_gray(image: &GrayImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image.save(path).map_err(|err| {
        TablescanError::ImageError(format!("failed to save image to {}: {}", path.display(), err))
    })
}
