// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Border-level detection — collapse near-duplicate cell edge coordinates into
// canonical row and column grid lines, and look coordinates up against them.

use tablescan_core::error::{Result, TablescanError};
use tablescan_core::table::DetectedCell;
use tracing::debug;

use crate::grouping::{are_close, group_by_proximity};

/// Floored mean of a coordinate cluster.
fn floor_mean(values: &[i32]) -> Result<i32> {
    if values.is_empty() {
        return Err(TablescanError::EmptyCluster);
    }
    let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
    let mean = sum.div_euclid(values.len() as i64);
    // The mean of i32 values always fits in i32.
    Ok(mean as i32)
}

/// Cluster coordinates within tolerance and return one level per cluster,
/// sorted ascending.
pub fn canonicalize(values: Vec<i32>) -> Result<Vec<i32>> {
    let mut levels = group_by_proximity(values, |a, b| are_close(*a, *b))
        .iter()
        .map(|group| floor_mean(group))
        .collect::<Result<Vec<i32>>>()?;
    levels.sort_unstable();
    Ok(levels)
}

/// Canonical y positions of the row boundaries shared by `cells`.
pub fn horizontal_levels(cells: &[DetectedCell]) -> Result<Vec<i32>> {
    let raw: Vec<i32> = cells
        .iter()
        .flat_map(|cell| [cell.contour.y0(), cell.contour.y1()])
        .collect();
    let levels = canonicalize(raw)?;
    debug!(cells = cells.len(), levels = levels.len(), "Horizontal border levels");
    Ok(levels)
}

/// Canonical x positions of the column boundaries shared by `cells`.
pub fn vertical_levels(cells: &[DetectedCell]) -> Result<Vec<i32>> {
    let raw: Vec<i32> = cells
        .iter()
        .flat_map(|cell| [cell.contour.x0(), cell.contour.x1()])
        .collect();
    let levels = canonicalize(raw)?;
    debug!(cells = cells.len(), levels = levels.len(), "Vertical border levels");
    Ok(levels)
}

/// Index of the first level within tolerance of `candidate`.
///
/// A miss means the cell and the grid disagree; it is reported rather than
/// snapped to the nearest level.
pub fn fuzzy_rank(candidate: i32, levels: &[i32]) -> Result<usize> {
    levels
        .iter()
        .position(|&level| are_close(level, candidate))
        .ok_or_else(|| TablescanError::NoMatchingBorder {
            candidate,
            borders: levels.to_vec(),
        })
}
