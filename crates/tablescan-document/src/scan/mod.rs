// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text recognition — the recogniser seam used for cell contents and body
// text, and the optical character recognition (OCR) engine behind it.

use image::GrayImage;
use serde::{Deserialize, Serialize};
use tablescan_core::error::Result;

#[cfg(feature = "ocr")]
pub mod ocr;

#[cfg(feature = "ocr")]
pub use ocr::OcrEngine;

/// A recognised line of text and its box in the recognised image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLine {
    pub text: String,
    pub h_pos: i32,
    pub v_pos: i32,
    pub width: i32,
    pub height: i32,
}

impl std::fmt::Display for TextLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Reads text from an image region.
///
/// `lang` is a recogniser language code such as `"eng"` or `"fra"`;
/// engines that ship a single model may ignore it.
pub trait TextRecognizer {
    /// Recognised lines with their layout, top to bottom.
    fn recognize_lines(&self, image: &GrayImage, lang: &str) -> Result<Vec<TextLine>>;

    /// All text in the image, one line per output line.
    fn recognize_text(&self, image: &GrayImage, lang: &str) -> Result<String> {
        let lines = self.recognize_lines(image, lang)?;
        Ok(lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

impl<R: TextRecognizer + ?Sized> TextRecognizer for &R {
    fn recognize_lines(&self, image: &GrayImage, lang: &str) -> Result<Vec<TextLine>> {
        (**self).recognize_lines(image, lang)
    }

    fn recognize_text(&self, image: &GrayImage, lang: &str) -> Result<String> {
        (**self).recognize_text(image, lang)
    }
}

/// Recogniser that finds no text. Used when only table geometry is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecognizer;

impl TextRecognizer for NullRecognizer {
    fn recognize_lines(&self, _image: &GrayImage, _lang: &str) -> Result<Vec<TextLine>> {
        Ok(Vec::new())
    }
}
