// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tablescan — Core geometry, table types, configuration, and error
// definitions shared across all crates.

pub mod config;
pub mod error;
pub mod geometry;
pub mod table;

pub use config::ExtractionConfig;
pub use error::{Result, TablescanError};
pub use geometry::{BorderSegment, Contour, PROXIMITY_THRESHOLD, Region};
pub use table::{Cell, DetectedCell, LocatedTable, Row, Table};
