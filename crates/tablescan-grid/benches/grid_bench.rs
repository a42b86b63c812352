// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the tablescan-grid crate: cell clustering and
// table reconstruction on a synthetic page holding two ruled tables.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use tablescan_core::{Contour, DetectedCell};
use tablescan_grid::{are_neighbors, build_tables, group_by_proximity};

/// Two 8x6 grids of 120x40 cells, far enough apart to stay separate tables.
fn synthetic_page() -> Vec<DetectedCell> {
    let mut cells = Vec::new();
    for origin_y in [100, 900] {
        for row in 0..8 {
            for col in 0..6 {
                let x0 = 80 + col * 120;
                let y0 = origin_y + row * 60;
                // Jitter edges by a couple of pixels, as a scanner would.
                let jitter = (row + col) % 3;
                let contour = Contour::new(x0 + jitter, x0 + 120 - jitter, y0 + jitter, y0 + 60)
                    .expect("synthetic contour is valid");
                cells.push(DetectedCell::new(format!("r{row}c{col}"), contour));
            }
        }
    }
    cells
}

fn bench_grouping(c: &mut Criterion) {
    let cells = synthetic_page();
    c.bench_function("group_by_proximity (96 cells)", |b| {
        b.iter(|| black_box(group_by_proximity(black_box(cells.clone()), are_neighbors)));
    });
}

fn bench_build_tables(c: &mut Criterion) {
    let cells = synthetic_page();
    c.bench_function("build_tables (96 cells)", |b| {
        b.iter(|| black_box(build_tables(black_box(cells.clone())).expect("grid is consistent")));
    });
}

criterion_group!(benches, bench_grouping, bench_build_tables);
criterion_main!(benches);
