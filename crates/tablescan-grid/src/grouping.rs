// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Proximity grouping — partition arbitrary elements into the connected
// components of a caller-supplied adjacency predicate.

use tablescan_core::geometry::PROXIMITY_THRESHOLD;
use tablescan_core::table::DetectedCell;

/// Partition `elements` into groups of transitively adjacent elements.
///
/// Every element lands in exactly one group. Groups are ordered by the input
/// rank of their first member and keep members in input order. The predicate
/// is assumed symmetric; each element is only compared with the elements
/// before it.
///
/// Quadratic in the number of elements, which suits per-page counts of cells
/// and ruling coordinates.
pub fn group_by_proximity<T>(elements: Vec<T>, are_neighbors: impl Fn(&T, &T) -> bool) -> Vec<Vec<T>> {
    if elements.is_empty() {
        return Vec::new();
    }

    let mut forest = DisjointRanks::new(elements.len());
    for rank in 1..elements.len() {
        for earlier in 0..rank {
            if are_neighbors(&elements[rank], &elements[earlier]) {
                forest.union(earlier, rank);
            }
        }
    }

    // Map each root to its output slot in order of first appearance.
    let mut slot_of_root: Vec<Option<usize>> = vec![None; elements.len()];
    let mut groups: Vec<Vec<T>> = Vec::new();
    for (rank, element) in elements.into_iter().enumerate() {
        let root = forest.find(rank);
        let slot = match slot_of_root[root] {
            Some(slot) => slot,
            None => {
                groups.push(Vec::new());
                slot_of_root[root] = Some(groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].push(element);
    }
    groups
}

/// Union-find over element ranks with path halving.
struct DisjointRanks {
    parent: Vec<usize>,
}

impl DisjointRanks {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut rank: usize) -> usize {
        while self.parent[rank] != rank {
            self.parent[rank] = self.parent[self.parent[rank]];
            rank = self.parent[rank];
        }
        rank
    }

    /// Attach the later rank's root under the earlier rank's root.
    fn union(&mut self, earlier: usize, later: usize) {
        let earlier_root = self.find(earlier);
        let later_root = self.find(later);
        if earlier_root != later_root {
            self.parent[later_root] = earlier_root;
        }
    }
}

/// Scalar adjacency: two coordinates are the same grid line.
pub fn are_close(x: i32, y: i32) -> bool {
    x.abs_diff(y) <= PROXIMITY_THRESHOLD as u32
}

/// Cell adjacency: one cell's border runs along a facing border of the other.
pub fn are_neighbors(cell: &DetectedCell, other: &DetectedCell) -> bool {
    let (a, b) = (&cell.contour, &other.contour);
    a.left_border().touches(&b.right_border())
        || b.left_border().touches(&a.right_border())
        || a.bottom_border().touches(&b.top_border())
        || b.bottom_border().touches(&a.top_border())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablescan_core::geometry::Contour;

    fn cell(x0: i32, x1: i32, y0: i32, y1: i32) -> DetectedCell {
        DetectedCell::new("", Contour::new(x0, x1, y0, y1).unwrap())
    }

    #[test]
    fn empty_input_gives_no_groups() {
        let groups = group_by_proximity(Vec::<i32>::new(), |_, _| true);
        assert!(groups.is_empty());
    }

    #[test]
    fn always_adjacent_gives_one_group() {
        let groups = group_by_proximity(vec![5, 1, 9, 3], |_, _| true);
        assert_eq!(groups, vec![vec![5, 1, 9, 3]]);
    }

    #[test]
    fn never_adjacent_gives_singletons() {
        let groups = group_by_proximity(vec!['a', 'b', 'c'], |_, _| false);
        assert_eq!(groups, vec![vec!['a'], vec!['b'], vec!['c']]);
    }

    #[test]
    fn groups_follow_first_occurrence() {
        let groups = group_by_proximity(vec![100, 300, 104, 305, 500], |a, b| are_close(*a, *b));
        assert_eq!(groups, vec![vec![100, 104], vec![300, 305], vec![500]]);
    }

    #[test]
    fn chains_merge_transitively() {
        // 0 and 18 are not close, but both are close to 9 which arrives last.
        let groups = group_by_proximity(vec![0, 18, 40, 9], |a, b| are_close(*a, *b));
        assert_eq!(groups, vec![vec![0, 18, 9], vec![40]]);
    }

    #[test]
    fn late_bridge_joins_two_existing_groups() {
        let groups = group_by_proximity(vec![1, 2, 30, 31, 16], |a: &i32, b: &i32| (a - b).abs() <= 15);
        assert_eq!(groups, vec![vec![1, 2, 30, 31, 16]]);
    }

    #[test]
    fn permutation_preserves_partition() {
        let close = |a: &i32, b: &i32| are_close(*a, *b);
        let forward = group_by_proximity(vec![0, 8, 50, 200, 16, 58], close);
        let backward = group_by_proximity(vec![58, 16, 200, 50, 8, 0], close);

        let normalise = |groups: Vec<Vec<i32>>| {
            let mut sorted: Vec<Vec<i32>> = groups
                .into_iter()
                .map(|mut group| {
                    group.sort();
                    group
                })
                .collect();
            sorted.sort();
            sorted
        };
        assert_eq!(normalise(forward), normalise(backward));
    }

    #[test]
    fn are_close_is_inclusive() {
        assert!(are_close(100, 110));
        assert!(are_close(110, 100));
        assert!(!are_close(100, 111));
    }

    #[test]
    fn are_close_handles_opposite_extremes() {
        assert!(!are_close(i32::MIN, i32::MAX));
        assert!(!are_close(-2_000_000_000, 2_000_000_000));
        assert!(are_close(i32::MAX, i32::MAX - 10));
    }

    #[test]
    fn side_by_side_cells_are_neighbors() {
        let left = cell(0, 100, 0, 50);
        let right = cell(102, 200, 0, 50);
        assert!(are_neighbors(&left, &right));
        assert!(are_neighbors(&right, &left));
    }

    #[test]
    fn stacked_cells_are_neighbors() {
        let top = cell(0, 100, 0, 50);
        let bottom = cell(0, 100, 53, 100);
        assert!(are_neighbors(&top, &bottom));
        assert!(are_neighbors(&bottom, &top));
    }

    #[test]
    fn distant_or_offset_cells_are_not_neighbors() {
        let a = cell(0, 100, 0, 50);
        // Horizontal gap of exactly the threshold.
        assert!(!are_neighbors(&a, &cell(110, 200, 0, 50)));
        // Aligned edge but no vertical overlap.
        assert!(!are_neighbors(&a, &cell(100, 200, 60, 120)));
        // Diagonal corner contact within slack still counts.
        assert!(are_neighbors(&a, &cell(100, 200, 51, 120)));
    }

    #[test]
    fn cells_split_into_separate_tables() {
        let cells = vec![
            cell(0, 100, 0, 50),
            cell(500, 600, 500, 550),
            cell(100, 200, 0, 50),
            cell(600, 700, 500, 550),
        ];
        let groups = group_by_proximity(cells.clone(), are_neighbors);
        assert_eq!(groups, vec![vec![cells[0].clone(), cells[2].clone()], vec![cells[1].clone(), cells[3].clone()]]);
    }
}
