// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document pipeline — scan every page of a PDF, one page at a time, and
// compose the results into a single layout.

use std::path::{Path, PathBuf};

use tablescan_core::error::{Result, TablescanError};
use tablescan_core::table::DetectedCell;
use tracing::{info, instrument};

use crate::image::ContourExtractor;
use crate::layout::{Composition, PageText, compose_pages};
use crate::pdf::PageRasterizer;
use crate::pipeline::{PageScan, TableExtractor};
use crate::scan::TextRecognizer;

/// Runs the page pipeline over each page of a document.
pub struct DocumentScanner<P, E, R> {
    rasterizer: P,
    extractor: TableExtractor<E, R>,
}

impl<P: PageRasterizer, E: ContourExtractor, R: TextRecognizer> DocumentScanner<P, E, R> {
    pub fn new(rasterizer: P, extractor: TableExtractor<E, R>) -> Self {
        Self {
            rasterizer,
            extractor,
        }
    }

    /// Lazily scan the pages of the document at `path`, in page order.
    ///
    /// Only the page count is read up front; each page is rasterised and
    /// scanned when the iterator reaches it.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn pages(&self, path: impl AsRef<Path>) -> Result<PageScans<'_, P, E, R>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TablescanError::DocumentNotFound(path.to_path_buf()));
        }
        let page_count = self.rasterizer.page_count(path)?;
        info!(page_count, "Document opened");
        Ok(PageScans {
            scanner: self,
            path: path.to_path_buf(),
            next: 0,
            page_count,
        })
    }

    /// Scan the whole document and lay its pages out on one canvas. With
    /// `include_cells`, every detected cell is drawn too.
    pub fn compose(&self, path: impl AsRef<Path>, include_cells: bool) -> Result<Composition> {
        let scans = self.pages(path)?.collect::<Result<Vec<_>>>()?;
        let pages: Vec<PageText> = scans.iter().map(PageText::from).collect();
        let cells: Vec<Vec<DetectedCell>> = scans.into_iter().map(|scan| scan.cells).collect();
        compose_pages(&pages, include_cells.then_some(cells.as_slice()))
    }
}

/// Iterator over the scanned pages of one document.
pub struct PageScans<'a, P, E, R> {
    scanner: &'a DocumentScanner<P, E, R>,
    path: PathBuf,
    next: usize,
    page_count: usize,
}

impl<P: PageRasterizer, E: ContourExtractor, R: TextRecognizer> Iterator for PageScans<'_, P, E, R> {
    type Item = Result<PageScan>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.page_count {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let scan = self
            .scanner
            .rasterizer
            .rasterize_page(&self.path, index)
            .and_then(|image| self.scanner.extractor.scan_page(index, &image));
        Some(scan)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.page_count - self.next;
        (remaining, Some(remaining))
    }
}

impl<P: PageRasterizer, E: ContourExtractor, R: TextRecognizer> ExactSizeIterator for PageScans<'_, P, E, R> {}
