pub mod catalog;
pub mod config;
pub mod error;
pub mod pair;
pub mod pipeline;
pub mod position;
pub mod refine;
pub mod registry;
pub mod spatial;
pub mod time;

pub use catalog::{load_catalogue, Satellite};
pub use config::Config;
pub use error::{Result, ScreenError};
pub use pair::{canonical, Pair};
pub use pipeline::{run, Conjunction};
pub use position::{build_position_table, propagate_one, Position, PositionTable};
pub use refine::refine;
pub use registry::{MinDistanceRecord, MinDistanceRegistry};
pub use spatial::broad_phase_screen;
