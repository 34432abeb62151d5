//! Tier 1: the spatial hasher and the broad-phase sweep-and-prune screener.

use crate::pair::{canonical, Pair};
use crate::position::{Position, PositionTable};
use std::collections::{HashMap, HashSet};

pub type CellKey = (i64, i64, i64);

fn cell_key(position: &Position, box_size: f64) -> CellKey {
    (
        (position.x / box_size).floor() as i64,
        (position.y / box_size).floor() as i64,
        (position.z / box_size).floor() as i64,
    )
}

/// Assign every satellite with a present position at `time_index` to a cell.
/// Absent positions are omitted from every cell.
pub fn build_cell_map(
    table: &PositionTable,
    time_index: usize,
    box_size: f64,
) -> HashMap<CellKey, Vec<usize>> {
    let mut cells: HashMap<CellKey, Vec<usize>> = HashMap::new();
    for sat in 0..table.satellite_count() {
        if let Some(position) = table.get(sat, time_index) {
            cells.entry(cell_key(&position, box_size)).or_default().push(sat);
        }
    }
    cells
}

const NEIGHBOR_OFFSETS: [(i64, i64, i64); 7] = [
    (0, 0, 0),
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

fn neighborhood_union(cells: &HashMap<CellKey, Vec<usize>>, key: CellKey) -> Vec<usize> {
    let mut union = Vec::new();
    for (dx, dy, dz) in NEIGHBOR_OFFSETS {
        let neighbor = (key.0 + dx, key.1 + dy, key.2 + dz);
        if let Some(indices) = cells.get(&neighbor) {
            union.extend_from_slice(indices);
        }
    }
    union
}

/// One 1D sweep-and-prune pass: sort `indices` by the given axis, then walk
/// the sorted list emitting pairs whose axis separation is <= `max_dist`.
fn axis_close_pairs(
    indices: &[usize],
    table: &PositionTable,
    time_index: usize,
    axis: usize,
    max_dist: f64,
) -> HashSet<Pair> {
    let mut coords: Vec<(usize, f64)> = indices
        .iter()
        .filter_map(|&i| table.get(i, time_index).map(|p| (i, p[axis])))
        .collect();
    coords.sort_by(|a, b| a.1.partial_cmp(&b.1).expect("position coordinate is finite"));

    let mut pairs = HashSet::new();
    for i in 0..coords.len() {
        for j in (i + 1)..coords.len() {
            if coords[j].1 - coords[i].1 <= max_dist {
                pairs.insert(canonical(coords[i].0, coords[j].0));
            } else {
                break;
            }
        }
    }
    pairs
}

fn euclidean_distance(table: &PositionTable, time_index: usize, pair: Pair) -> Option<f64> {
    let a = table.get(pair.0, time_index)?;
    let b = table.get(pair.1, time_index)?;
    Some((a - b).norm())
}

/// Run the full broad-phase screen for one time index: build the cell map,
/// then for every occupied cell intersect the three per-axis sweep-and-prune
/// sets over that cell's 6-neighbourhood union, deduplicating pairs emitted
/// from multiple cells and dropping exact-zero-distance duplicates.
pub fn broad_phase_screen(
    table: &PositionTable,
    time_index: usize,
    box_size: f64,
    max_dist: f64,
) -> HashSet<Pair> {
    let cells = build_cell_map(table, time_index, box_size);
    let mut candidates = HashSet::new();

    for &key in cells.keys() {
        let union = neighborhood_union(&cells, key);
        if union.len() < 2 {
            continue;
        }

        let px = axis_close_pairs(&union, table, time_index, 0, max_dist);
        let py = axis_close_pairs(&union, table, time_index, 1, max_dist);
        let pz = axis_close_pairs(&union, table, time_index, 2, max_dist);

        for pair in px.intersection(&py).filter(|p| pz.contains(*p)) {
            if euclidean_distance(table, time_index, *pair) != Some(0.0) {
                candidates.insert(*pair);
            }
        }
    }

    candidates
}
