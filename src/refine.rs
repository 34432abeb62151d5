//! Tier 2: narrow-phase refinement by gradient-directed interval bisection.

use crate::catalog::Satellite;
use crate::position::propagate_one;
use crate::time::{add_seconds, difference_seconds};

/// Distance between two satellites at a Julian date, or `None` if either
/// propagation fails.
fn distance_at(a: &Satellite, b: &Satellite, julian_date: f64) -> Option<f64> {
    let pa = propagate_one(a, julian_date)?;
    let pb = propagate_one(b, julian_date)?;
    Some((pa - pb).norm())
}

/// Search `[center - window, center + window]` for the local minimum of
/// inter-satellite distance, via gradient-signed bisection. Returns
/// `(time_of_closest_approach, distance_km)`, or `None` if the propagator
/// fails anywhere inside the search (silent skip, per the error design).
pub fn refine(
    sat_a: &Satellite,
    sat_b: &Satellite,
    center: f64,
    window_seconds: f64,
    eps_seconds: f64,
    slope_probe_seconds: f64,
) -> Option<(f64, f64)> {
    let mut left = add_seconds(center, -window_seconds);
    let mut right = add_seconds(center, window_seconds);

    loop {
        let mid = (left + right) / 2.0;

        if difference_seconds(left, right).abs() < eps_seconds {
            let distance = distance_at(sat_a, sat_b, mid)?;
            return Some((mid, distance));
        }

        let probe = add_seconds(mid, -slope_probe_seconds);
        let distance_probe = distance_at(sat_a, sat_b, probe)?;
        let distance_mid = distance_at(sat_a, sat_b, mid)?;

        if distance_probe < distance_mid {
            right = mid;
        } else {
            left = mid;
        }
    }
}
