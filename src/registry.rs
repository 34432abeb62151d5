//! Tier 2's sink: a concurrent minimum-keyed map from pair to best-observed
//! approach, plus the top-N extraction used for final output.

use crate::pair::Pair;
use dashmap::DashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinDistanceRecord {
    pub julian_date: f64,
    pub distance_km: f64,
}

/// Sharded concurrent map: `DashMap`'s per-shard locking gives per-key
/// atomicity under the "keep strictly smaller" rule without a single global
/// lock across the whole registry.
pub struct MinDistanceRegistry {
    pairs: DashMap<Pair, MinDistanceRecord>,
}

impl MinDistanceRegistry {
    pub fn new() -> Self {
        Self { pairs: DashMap::new() }
    }

    /// Store `(time, distance)` against `pair` iff no prior record exists or
    /// `distance` is strictly smaller than the prior one. A pair with
    /// observed distance exactly zero (a catalogue duplicate) is never
    /// stored.
    pub fn add(&self, pair: Pair, julian_date: f64, distance_km: f64) {
        if distance_km == 0.0 {
            return;
        }

        self.pairs
            .entry(pair)
            .and_modify(|existing| {
                if distance_km < existing.distance_km {
                    existing.julian_date = julian_date;
                    existing.distance_km = distance_km;
                }
            })
            .or_insert(MinDistanceRecord { julian_date, distance_km });
    }

    /// The `n` records with smallest distance, sorted ascending. Ties are
    /// broken by pair identity so output is stable across equivalent runs.
    pub fn top_n(&self, n: usize) -> Vec<(Pair, MinDistanceRecord)> {
        let mut all: Vec<(Pair, MinDistanceRecord)> =
            self.pairs.iter().map(|entry| (*entry.key(), *entry.value())).collect();

        all.sort_by(|(pair_a, record_a), (pair_b, record_b)| {
            record_a
                .distance_km
                .partial_cmp(&record_b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| pair_a.cmp(pair_b))
        });

        all.truncate(n);
        all
    }
}

impl Default for MinDistanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
