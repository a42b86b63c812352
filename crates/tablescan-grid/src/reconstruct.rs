// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Table reconstruction — place every cell of a cluster on the canonical grid,
// compute its spans, and emit a positioned table.

use std::collections::HashSet;

use tablescan_core::error::{Result, TablescanError};
use tablescan_core::table::{Cell, DetectedCell, LocatedTable, Row, Table};
use tracing::{debug, info, instrument, warn};

use crate::borders::{fuzzy_rank, horizontal_levels, vertical_levels};
use crate::grouping::{are_neighbors, group_by_proximity};

/// Grid placement of a single detected cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
    pub rowspan: u32,
    pub colspan: u32,
}

fn span(start_rank: usize, end_rank: usize) -> Result<u32> {
    let span = end_rank as i64 - start_rank as i64;
    if span < 0 {
        return Err(TablescanError::NegativeSpan(span));
    }
    u32::try_from(span).map_err(|_| TablescanError::NegativeSpan(span))
}

/// Locate `cell` on the grid described by the canonical levels.
pub fn place_cell(cell: &DetectedCell, horizontal: &[i32], vertical: &[i32]) -> Result<GridPosition> {
    let contour = &cell.contour;
    let row = fuzzy_rank(contour.y0(), horizontal)?;
    let col = fuzzy_rank(contour.x0(), vertical)?;
    let rowspan = span(row, fuzzy_rank(contour.y1(), horizontal)?)?;
    let colspan = span(col, fuzzy_rank(contour.x1(), vertical)?)?;
    Ok(GridPosition {
        row,
        col,
        rowspan,
        colspan,
    })
}

/// Distance from the first level to the last, saturating at `i32::MAX`.
fn spread(levels: &[i32]) -> i32 {
    match (levels.first(), levels.last()) {
        (Some(first), Some(last)) => i32::try_from(i64::from(*last) - i64::from(*first)).unwrap_or(i32::MAX),
        _ => 0,
    }
}

/// Rebuild one table from a cluster of adjacent cells.
///
/// Rows are emitted top to bottom, skipping grid rows where no cell starts;
/// cells within a row are ordered by column. No header rows are inferred.
/// When two cells claim the same grid slot, the earlier one in `cells` keeps
/// it and the later one is dropped.
#[instrument(skip_all, fields(cells = cells.len()))]
pub fn build_table(cells: &[DetectedCell]) -> Result<LocatedTable<String>> {
    let horizontal = horizontal_levels(cells)?;
    let vertical = vertical_levels(cells)?;

    let mut slots: Vec<Vec<(usize, Cell<String>)>> = vec![Vec::new(); horizontal.len()];
    let mut taken: HashSet<(usize, usize)> = HashSet::new();
    for cell in cells {
        let position = place_cell(cell, &horizontal, &vertical)?;
        if !taken.insert((position.row, position.col)) {
            warn!(
                row = position.row,
                col = position.col,
                text = %cell.text,
                "Grid slot already taken; dropping overlapping cell"
            );
            continue;
        }
        slots[position.row].push((
            position.col,
            Cell::with_span(cell.text.clone(), position.colspan, position.rowspan),
        ));
    }

    let rows: Vec<Row<String>> = slots
        .into_iter()
        .filter(|slot| !slot.is_empty())
        .map(|mut slot| {
            slot.sort_by_key(|(col, _)| *col);
            Row::new(slot.into_iter().map(|(_, cell)| cell).collect())
        })
        .collect();

    debug!(rows = rows.len(), "Table rebuilt");
    Ok(LocatedTable {
        table: Table::new(Vec::new(), rows),
        h_pos: vertical.first().copied().unwrap_or_default(),
        v_pos: horizontal.first().copied().unwrap_or_default(),
        height: spread(&horizontal),
        width: spread(&vertical),
    })
}

/// Split cells into independent tables and rebuild each one, in the order
/// their first cell was discovered.
#[instrument(skip_all, fields(cells = cells.len()))]
pub fn build_tables(cells: Vec<DetectedCell>) -> Result<Vec<LocatedTable<String>>> {
    let clusters = group_by_proximity(cells, are_neighbors);
    info!(tables = clusters.len(), "Cells clustered into tables");
    clusters.iter().map(|cluster| build_table(cluster)).collect()
}
