//! Run configuration: the constants from the external interface table, each
//! overridable via an environment variable of the same name, matching the
//! teacher's `env::var(...).ok().and_then(...).unwrap_or(default)` idiom for
//! `HOST`/`PORT`.

use crate::time::julian_date;

fn env_override<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

pub struct Config {
    pub catalogue_path: String,
    pub workers: Option<usize>,
    pub intervals: usize,
    pub time_step_minutes: f64,
    pub start: f64,
    pub box_size: f64,
    pub max_dist: f64,
    pub refine_window: f64,
    pub refine_eps: f64,
    pub slope_probe: f64,
    pub top_n: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let default_start = julian_date(2025, 1, 12, 0, 0, 0);

        Self {
            catalogue_path: std::env::var("CATALOGUE_PATH")
                .unwrap_or_else(|_| "satellites-api.json".to_string()),
            workers: std::env::var("WORKERS").ok().and_then(|v| v.parse().ok()),
            intervals: env_override("INTERVALS", 360),
            time_step_minutes: env_override("TIME_STEP_MINUTES", 4.0),
            start: env_override("START", default_start),
            box_size: env_override("BOX_SIZE", 1200.0),
            max_dist: env_override("MAX_DIST", 100.0),
            refine_window: env_override("REFINE_WINDOW", 600.0),
            refine_eps: env_override("REFINE_EPS", 0.1),
            slope_probe: env_override("SLOPE_PROBE", 0.05),
            top_n: env_override("TOP_N", 100),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
