pub mod game_metrics;

pub use game_metrics::{format_clock, GameMetrics};
