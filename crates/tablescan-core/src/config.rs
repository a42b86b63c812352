// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::FULL_PAGE_RATIO;

/// Settings for the contour extraction and recognition stages.
///
/// The grid tolerance itself is [`crate::geometry::PROXIMITY_THRESHOLD`] and
/// is not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Language code forwarded to the text recogniser.
    pub lang: String,
    /// Gray level above which a pixel counts as background (0-255).
    pub binarize_threshold: u8,
    /// Morphology kernel length is the image dimension divided by this.
    pub line_kernel_divisor: u32,
    /// Number of erosion and dilation passes when isolating ruling lines.
    pub morphology_iterations: u32,
    /// Minimum polygon area / bounding box area for a contour to count as a
    /// rectangle.
    pub rectangularity: f64,
    /// Contours covering at least this share of the page are page borders.
    pub full_page_ratio: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            lang: "eng".to_string(),
            binarize_threshold: 200,
            line_kernel_divisor: 300,
            morphology_iterations: 3,
            rectangularity: 0.9,
            full_page_ratio: FULL_PAGE_RATIO,
        }
    }
}

impl ExtractionConfig {
    /// Load a configuration from a JSON file. Missing keys take their default.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Return a copy using another recognition language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}
