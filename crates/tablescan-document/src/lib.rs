// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tablescan-document — Page and document pipelines for Tablescan.
//
// Finds ruled cells on scanned pages, reads them through a text recogniser,
// rebuilds the tables with tablescan-grid, paints tables or cells out of the
// page, and lays multi-page documents out for rendering.

pub mod document;
pub mod image;
pub mod layout;
pub mod pdf;
pub mod pipeline;
pub mod scan;

// Re-export the primary types so callers can use `tablescan_document::TableExtractor` etc.
pub use document::{DocumentScanner, PageScans};
pub use image::{ContourExtractor, LineGridExtractor, Polygon, open_page};
pub use layout::{Composition, Drawable, JsonRenderer, LayoutRenderer, PageText, compose_pages, render_document};
pub use pdf::{PageRasterizer, PdfReader};
pub use pipeline::{PageScan, TableExtractor};
pub use scan::{NullRecognizer, TextLine, TextRecognizer};

#[cfg(feature = "ocr")]
pub use scan::ocr::{OcrConfig, OcrEngine};
