//! Orchestration: wires the time grid, position table, and the two tiers
//! together into a single `run` entry point, returning the sorted top-N
//! closest approaches.

use crate::catalog::Satellite;
use crate::config::Config;
use crate::pair::Pair;
use crate::position::build_position_table;
use crate::refine::refine;
use crate::registry::{MinDistanceRecord, MinDistanceRegistry};
use crate::spatial::broad_phase_screen;
use crate::time::build_time_grid;
use rayon::prelude::*;
use std::collections::HashSet;

/// One finished conjunction, ready for CLI output.
pub struct Conjunction {
    pub object_id_a: String,
    pub object_id_b: String,
    pub julian_date: f64,
    pub distance_km: f64,
}

/// Run the full pipeline against an already-loaded catalogue: build the time
/// grid and position table, screen every time index in parallel (Tier 1),
/// refine every candidate in parallel (Tier 2), and return the top N
/// conjunctions sorted by distance ascending.
pub fn run(satellites: &[Satellite], config: &Config) -> Vec<Conjunction> {
    let times = build_time_grid(config.start, config.intervals, config.time_step_minutes);
    tracing::info!(
        "built time grid of {} samples starting at JD {}",
        times.len(),
        config.start
    );

    let table = build_position_table(satellites, &times);
    tracing::info!(
        "built position table for {} satellites x {} samples",
        table.satellite_count(),
        table.time_count()
    );

    // Tier 1: one work unit per time index, independent of every other index.
    let per_time_candidates: Vec<HashSet<Pair>> = (0..times.len())
        .into_par_iter()
        .map(|t| broad_phase_screen(&table, t, config.box_size, config.max_dist))
        .collect();

    let total_candidates: usize = per_time_candidates.iter().map(|c| c.len()).sum();
    tracing::info!("broad-phase emitted {} candidate (time, pair) entries", total_candidates);

    let registry = MinDistanceRegistry::new();

    // Tier 2: one work unit per time index's candidate list; each candidate
    // pair within it is refined independently and commits into the shared
    // registry, which mediates the concurrency.
    per_time_candidates
        .into_par_iter()
        .enumerate()
        .for_each(|(t, candidates)| {
            let center = times[t];
            for (a, b) in candidates {
                let sat_a = &satellites[a];
                let sat_b = &satellites[b];
                match refine(
                    sat_a,
                    sat_b,
                    center,
                    config.refine_window,
                    config.refine_eps,
                    config.slope_probe,
                ) {
                    Some((time, distance)) => registry.add((a, b), time, distance),
                    None => tracing::debug!(
                        "refinement failed for pair ({}, {}) near JD {}",
                        sat_a.object_id,
                        sat_b.object_id,
                        center
                    ),
                }
            }
        });

    registry
        .top_n(config.top_n)
        .into_iter()
        .map(|(pair, record): (Pair, MinDistanceRecord)| Conjunction {
            object_id_a: satellites[pair.0].object_id.clone(),
            object_id_b: satellites[pair.1].object_id.clone(),
            julian_date: record.julian_date,
            distance_km: record.distance_km,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgp4::{Constants, Elements};

    fn satellite(id: &str, line1: &str, line2: &str) -> Satellite {
        let elements = Elements::from_tle(Some(id.to_string()), line1.as_bytes(), line2.as_bytes())
            .unwrap();
        let constants = Constants::from_elements(&elements).unwrap();
        Satellite {
            object_id: id.to_string(),
            tle_line1: line1.to_string(),
            tle_line2: line2.to_string(),
            elements,
            constants,
            loaded_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn duplicate_catalogue_entry_never_appears_in_top_n() {
        let line1 = "1 84232U 79104    25011.29418726 +.00010894 +00000+0 +10327-1 0  9993";
        let line2 = "2 84232  20.2440 103.5465 6615434  81.8936 342.8433  3.09154996 94164";
        let satellites = vec![
            satellite("A", line1, line2),
            satellite("A_DUP", line1, line2),
        ];

        let mut config = Config::from_env();
        config.intervals = 3;
        config.top_n = 10;

        let results = run(&satellites, &config);
        assert!(results.is_empty());
    }

    #[test]
    fn close_pair_surfaces_in_top_n() {
        let sat_a = satellite(
            "A",
            "1 56700U 23067N   25011.12006866 -.00000852  00000-0 -48043-4 0  9994",
            "2 56700  43.0052  50.6716 0001256 262.8432  97.2268 15.02525502 92091",
        );
        let sat_b = satellite(
            "B",
            "1 58247U 23171T   25011.52048310  .00003171  00000-0  24954-3 0  9991",
            "2 58247  43.0041  59.6580 0001638 274.8194  85.2461 15.02562597 66220",
        );

        let mut config = Config::from_env();
        config.start = 2_460_688.299_389_648 - (2.0 / (24.0 * 60.0));
        config.intervals = 5;
        config.time_step_minutes = 1.0;
        config.top_n = 10;

        let results = run(&[sat_a, sat_b], &config);
        assert_eq!(results.len(), 1);
        assert!((results[0].distance_km - 0.2118).abs() < 1e-1);
    }
}
