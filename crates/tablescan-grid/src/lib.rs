// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tablescan-grid — Geometric table reconstruction for Tablescan.
//
// Clusters detected cells into tables by border adjacency, derives the
// canonical row/column grid lines of each cluster, and assigns every cell a
// grid position and span. Purely synchronous value transformations; no I/O.

pub mod borders;
pub mod grouping;
pub mod reconstruct;

pub use borders::{canonicalize, fuzzy_rank, horizontal_levels, vertical_levels};
pub use grouping::{are_close, are_neighbors, group_by_proximity};
pub use reconstruct::{GridPosition, build_table, build_tables, place_cell};
