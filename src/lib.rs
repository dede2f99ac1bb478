pub mod config;
pub mod grid;
pub mod heuristic;
pub mod search;

pub use config::Config;
pub use grid::{Cell, CellState, Grid};
pub use heuristic::manhattan;
pub use search::{mark_path, AstarSearch, SearchOutcome, StepResult};
