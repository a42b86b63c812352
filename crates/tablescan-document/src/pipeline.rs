// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page pipeline — find cell contours, read each cell, rebuild tables, and
// optionally paint the tables or cells out of the page.

use std::path::Path;

use image::GrayImage;
use serde::{Deserialize, Serialize};
use tablescan_core::config::ExtractionConfig;
use tablescan_core::error::Result;
use tablescan_core::table::{DetectedCell, LocatedTable};
use tablescan_grid::build_tables;
use tracing::{debug, info, instrument};

use crate::image::page::{crop_cell, open_page, save_gray};
use crate::image::{ContourExtractor, LineGridExtractor, contours_to_rectangles, hide_cells, hide_tables};
use crate::scan::{TextLine, TextRecognizer};

/// Everything recognised on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageScan {
    /// Zero-based page number within its document.
    pub index: usize,
    pub width: u32,
    pub height: u32,
    /// Body text, read after the tables were painted out.
    pub lines: Vec<TextLine>,
    pub tables: Vec<LocatedTable<String>>,
    pub cells: Vec<DetectedCell>,
}

/// Table extraction over single page images.
///
/// Cells are found by the contour extractor and read by the recogniser one
/// at a time, in contour order.
pub struct TableExtractor<E = LineGridExtractor, R = crate::scan::NullRecognizer> {
    extractor: E,
    recognizer: R,
    config: ExtractionConfig,
}

impl<R: TextRecognizer> TableExtractor<LineGridExtractor, R> {
    /// Extractor using ruling-line detection tuned by `config`.
    pub fn new(recognizer: R, config: ExtractionConfig) -> Self {
        Self {
            extractor: LineGridExtractor::from_config(&config),
            recognizer,
            config,
        }
    }
}

impl<E: ContourExtractor, R: TextRecognizer> TableExtractor<E, R> {
    pub fn with_extractor(extractor: E, recognizer: R, config: ExtractionConfig) -> Self {
        Self {
            extractor,
            recognizer,
            config,
        }
    }

    // -- In-memory ------------------------------------------------------------

    /// One recognised cell per rectangular contour on the page.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn extract_cells(&self, image: &GrayImage) -> Result<Vec<DetectedCell>> {
        let polygons = self.extractor.extract_contours(image)?;
        let image_area = u64::from(image.width()) * u64::from(image.height());
        let contours = contours_to_rectangles(&polygons, image_area, self.config.full_page_ratio);
        info!(contours = polygons.len(), cells = contours.len(), "Cell contours found");

        let mut cells = Vec::with_capacity(contours.len());
        for contour in contours {
            let crop = crop_cell(image, &contour);
            let lines = self.recognizer.recognize_lines(&crop, &self.config.lang)?;
            let texts: Vec<&str> = lines.iter().map(|line| line.text.as_str()).collect();
            let cell = DetectedCell::from_lines(&texts, contour);
            debug!(?contour, text = %cell.text, "Cell recognised");
            cells.push(cell);
        }
        info!(cells = cells.len(), "Cells recognised");
        Ok(cells)
    }

    /// Tables found on the page, with their positions.
    pub fn extract_tables_from_image(&self, image: &GrayImage) -> Result<Vec<LocatedTable<String>>> {
        let (_, tables, _) = self.extract_cells_and_tables(image, false)?;
        Ok(tables)
    }

    /// Tables found on the page, and a copy of the page with them painted white.
    pub fn extract_and_hide_tables_from_image(
        &self,
        image: &GrayImage,
    ) -> Result<(GrayImage, Vec<LocatedTable<String>>)> {
        let (hidden, tables, _) = self.extract_cells_and_tables(image, true)?;
        Ok((hidden, tables))
    }

    /// Cells, tables, and body text of one page.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn scan_page(&self, index: usize, image: &GrayImage) -> Result<PageScan> {
        let (hidden, tables, cells) = self.extract_cells_and_tables(image, true)?;
        let lines = self.recognizer.recognize_lines(&hidden, &self.config.lang)?;
        info!(
            index,
            tables = tables.len(),
            cells = cells.len(),
            lines = lines.len(),
            "Page scanned"
        );
        Ok(PageScan {
            index,
            width: image.width(),
            height: image.height(),
            lines,
            tables,
            cells,
        })
    }

    fn extract_cells_and_tables(
        &self,
        image: &GrayImage,
        hide: bool,
    ) -> Result<(GrayImage, Vec<LocatedTable<String>>, Vec<DetectedCell>)> {
        let cells = self.extract_cells(image)?;
        let tables = build_tables(cells.clone())?;
        info!(tables = tables.len(), "Tables rebuilt");
        let output = if hide {
            hide_tables(image, &tables)
        } else {
            image.clone()
        };
        Ok((output, tables, cells))
    }

    // -- Files ----------------------------------------------------------------

    pub fn extract_tables(&self, path: impl AsRef<Path>) -> Result<Vec<LocatedTable<String>>> {
        let page = open_page(path)?;
        self.extract_tables_from_image(&page)
    }

    /// Write the page without its tables to `output` and return the tables.
    #[instrument(skip_all, fields(input = %input.as_ref().display(), output = %output.as_ref().display()))]
    pub fn extract_and_hide_tables(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<Vec<LocatedTable<String>>> {
        let page = open_page(input)?;
        let (hidden, tables) = self.extract_and_hide_tables_from_image(&page)?;
        save_gray(&hidden, output)?;
        Ok(tables)
    }

    /// Write the page with every cell painted white to `output` and return
    /// the cells.
    #[instrument(skip_all, fields(input = %input.as_ref().display(), output = %output.as_ref().display()))]
    pub fn extract_and_hide_cells(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<Vec<DetectedCell>> {
        let page = open_page(input)?;
        let cells = self.extract_cells(&page)?;
        save_gray(&hide_cells(&page, &cells), output)?;
        Ok(cells)
    }
}
