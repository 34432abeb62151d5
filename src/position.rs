//! The Position Table: a precomputed S×T grid of satellite positions, built
//! once so Tier 1 and Tier 2 never call the propagator redundantly for the
//! same (satellite, time) pair.

use crate::catalog::Satellite;
use crate::time::julian_to_datetime;
use nalgebra::Vector3;
use rayon::prelude::*;

pub type Position = Vector3<f64>;

/// `table[sat_index][time_index]` is `None` when the propagator failed for
/// that sample; absent entries are excluded from all downstream use.
pub struct PositionTable {
    rows: Vec<Vec<Option<Position>>>,
}

impl PositionTable {
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<Option<Position>>>) -> Self {
        Self { rows }
    }

    pub fn satellite_count(&self) -> usize {
        self.rows.len()
    }

    pub fn time_count(&self) -> usize {
        self.rows.first().map(|row| row.len()).unwrap_or(0)
    }

    pub fn get(&self, satellite: usize, time: usize) -> Option<Position> {
        self.rows[satellite][time]
    }
}

/// Propagate a single satellite to a single Julian date. `None` means the
/// propagator failed for this sample; it is not an error the caller should
/// surface, only a gap in the table (§7, error class 2).
pub fn propagate_one(satellite: &Satellite, julian_date: f64) -> Option<Position> {
    let datetime = julian_to_datetime(julian_date);
    let minutes = satellite
        .elements
        .datetime_to_minutes_since_epoch(&datetime.naive_utc())
        .ok()?;
    let prediction = satellite.constants.propagate(minutes).ok()?;
    Some(Vector3::new(
        prediction.position[0],
        prediction.position[1],
        prediction.position[2],
    ))
}

/// Build the S×T position table. Each satellite's row is independent of
/// every other satellite's row, so rows are computed in parallel across the
/// worker pool; evaluation order never affects the result.
pub fn build_position_table(satellites: &[Satellite], times: &[f64]) -> PositionTable {
    let rows: Vec<Vec<Option<Position>>> = satellites
        .par_iter()
        .map(|satellite| {
            times
                .iter()
                .map(|&t| propagate_one(satellite, t))
                .collect()
        })
        .collect();

    PositionTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Satellite;
    use sgp4::{Constants, Elements};

    fn satellite(line1: &str, line2: &str) -> Satellite {
        let elements = Elements::from_tle(None, line1.as_bytes(), line2.as_bytes()).unwrap();
        let constants = Constants::from_elements(&elements).unwrap();
        Satellite {
            object_id: "TEST".to_string(),
            tle_line1: line1.to_string(),
            tle_line2: line2.to_string(),
            elements,
            constants,
            loaded_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn propagator_agreement_with_known_fixture() {
        let sat = satellite(
            "1 84232U 79104    25011.29418726 +.00010894 +00000+0 +10327-1 0  9993",
            "2 84232  20.2440 103.5465 6615434  81.8936 342.8433  3.09154996 94164",
        );

        let position = propagate_one(&sat, 2_460_687.5).expect("propagation should succeed");

        assert!((position.x - 12705.0228).abs() < 1e-2);
        assert!((position.y - (-13783.2230)).abs() < 1e-2);
        assert!((position.z - (-3409.8463)).abs() < 1e-2);
    }

    #[test]
    fn table_entries_are_finite_or_absent() {
        let sat = satellite(
            "1 84232U 79104    25011.29418726 +.00010894 +00000+0 +10327-1 0  9993",
            "2 84232  20.2440 103.5465 6615434  81.8936 342.8433  3.09154996 94164",
        );
        let satellites = vec![sat];
        let times = crate::time::build_time_grid(2_460_687.5, 10, 4.0);
        let table = build_position_table(&satellites, &times);

        assert_eq!(table.satellite_count(), 1);
        assert_eq!(table.time_count(), 10);

        for t in 0..table.time_count() {
            if let Some(p) = table.get(0, t) {
                assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
            }
        }
    }
}
