// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Tablescan.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Tablescan operations.
#[derive(Debug, Error)]
pub enum TablescanError {
    // -- Geometry / grid invariants --
    #[error("invalid contour: x0={x0}, x1={x1}, y0={y0}, y1={y1}")]
    InvalidContour { x0: i32, x1: i32, y0: i32, y1: i32 },

    #[error("no close border was found for candidate {candidate} among {borders:?}")]
    NoMatchingBorder { candidate: i32, borders: Vec<i32> },

    #[error("computed span {0} is negative")]
    NegativeSpan(i64),

    #[error("cannot compute the mean of an empty coordinate cluster")]
    EmptyCluster,

    // -- Page / document preconditions --
    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("input document not found at {}", .0.display())]
    DocumentNotFound(PathBuf),

    // -- Collaborators --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("OCR failed: {0}")]
    OcrError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("rendering failed: {0}")]
    RenderError(String),

    // -- Persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TablescanError>;
