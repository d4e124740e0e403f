//! Exact travelling-salesman tours over small sets of geographic points.
//!
//! Points are joined by haversine distances, and every tour starting at the
//! first point is enumerated by a backtracking search. Work grows as `(n-1)!`,
//! so this is meant for a dozen or so cities.

mod algo;
mod constants;
mod error;
mod geo;
mod io;
pub mod logging;
mod matrix;
mod progress;
mod tour;

pub(crate) use io::options;

pub use algo::backtrack::{
    SearchConfig, Solution, distinct_tour_count, search, solve, solve_tsp_with_backtracking,
};
pub use error::{Error, Result};
pub use geo::point::GeoPoint;
pub use io::input::{parse_points, read_points_from_path, read_points_from_reader};
pub use io::options::{LogFormat, LogLevel, SolverOptions};
pub use io::output::{format_elapsed, write_report, write_report_to};
pub use io::prompt::prompt_for_points;
pub use matrix::DistanceMatrix;
pub use progress::{ConsoleProgress, NoProgress, ProgressObserver};
pub use tour::{TourMetrics, tour_cost, tour_metrics};
