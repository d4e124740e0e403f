//! Exhaustive depth-first search over all tours that start at city 0.
//!
//! City 0 is fixed as the start, which removes rotations of the same cycle,
//! so `(n-1)!` complete tours are evaluated. There is no pruning: every leaf
//! is costed with [`tour_cost`] and the strictly cheapest one wins, ties going
//! to the tour found first in ascending-index enumeration order.

use std::time::{Duration, Instant};

use crate::{
    DistanceMatrix, Error, GeoPoint, Result,
    constants::{DEFAULT_PROGRESS_INTERVAL_SECS, LONG_RUN_WARN_CITIES},
    progress::{NoProgress, ProgressObserver},
    tour::tour_cost,
};

const START_CITY: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Minimum wall-clock time between two progress notifications.
    pub progress_interval: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_secs_f64(DEFAULT_PROGRESS_INTERVAL_SECS),
        }
    }
}

impl SearchConfig {
    pub fn with_progress_interval(mut self, progress_interval: Duration) -> Self {
        self.progress_interval = progress_interval;
        self
    }
}

/// Best tour found by a search.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// 0-based indices into the input points, starting with 0.
    pub tour: Vec<usize>,
    pub cost_km: f64,
    pub elapsed: Duration,
    pub tours_evaluated: u64,
}

/// Mutable state of one search run, threaded through the recursion.
struct SearchState {
    path: Vec<usize>,
    visited: Vec<bool>,
    best_tour: Option<Vec<usize>>,
    best_cost: f64,
    last_report: Instant,
    tours_evaluated: u64,
}

impl SearchState {
    fn new(n: usize) -> Self {
        let mut path = Vec::with_capacity(n);
        path.push(START_CITY);
        let mut visited = vec![false; n];
        visited[START_CITY] = true;

        Self {
            path,
            visited,
            best_tour: None,
            best_cost: f64::INFINITY,
            last_report: Instant::now(),
            tours_evaluated: 0,
        }
    }
}

struct Backtracker<'a, P: ?Sized> {
    matrix: &'a DistanceMatrix,
    progress_interval: Duration,
    observer: &'a mut P,
}

impl<P: ProgressObserver + ?Sized> Backtracker<'_, P> {
    fn extend(&mut self, state: &mut SearchState) {
        let n = self.matrix.len();
        if state.path.len() == n {
            self.evaluate(state);
            return;
        }

        for city in 0..n {
            if state.visited[city] {
                continue;
            }

            state.path.push(city);
            state.visited[city] = true;
            self.maybe_report(state);

            self.extend(state);

            state.visited[city] = false;
            state.path.pop();
        }
    }

    fn evaluate(&mut self, state: &mut SearchState) {
        let cost = tour_cost(&state.path, self.matrix);
        state.tours_evaluated += 1;

        if cost < state.best_cost {
            state.best_cost = cost;
            state.best_tour = Some(state.path.clone());
            log::debug!(
                "search: improved cost_km={cost:.3} after tours={}",
                state.tours_evaluated
            );
        }
    }

    fn maybe_report(&mut self, state: &mut SearchState) {
        let elapsed = state.last_report.elapsed();
        if elapsed >= self.progress_interval {
            self.observer.on_progress(elapsed);
            state.last_report = Instant::now();
        }
    }
}

/// Runs the search over an already built matrix.
pub fn search<P>(
    matrix: &DistanceMatrix,
    config: SearchConfig,
    observer: &mut P,
) -> Result<Solution>
where
    P: ProgressObserver + ?Sized,
{
    let n = matrix.len();
    if n == 0 {
        return Err(Error::invalid_input("cannot search an empty distance matrix"));
    }

    match distinct_tour_count(n) {
        Some(tours) => log::info!("search: n={n} tours={tours}"),
        None => log::info!("search: n={n} tours=overflow"),
    }
    if n > LONG_RUN_WARN_CITIES {
        log::warn!("search: n={n} > {LONG_RUN_WARN_CITIES}; exhaustive search will take a long time");
    }

    let started = Instant::now();
    let mut state = SearchState::new(n);
    let mut backtracker = Backtracker {
        matrix,
        progress_interval: config.progress_interval,
        observer,
    };
    backtracker.extend(&mut state);

    let tour = state
        .best_tour
        .ok_or_else(|| Error::other("search finished without a finite-cost tour"))?;
    let solution = Solution {
        tour,
        cost_km: state.best_cost,
        elapsed: started.elapsed(),
        tours_evaluated: state.tours_evaluated,
    };

    log::info!(
        "search: done cost_km={:.3} tours={} time={:.2}s",
        solution.cost_km,
        solution.tours_evaluated,
        solution.elapsed.as_secs_f32()
    );
    Ok(solution)
}

/// Builds the distance matrix for `points` and searches it.
///
/// `elapsed` on the returned solution covers both steps.
pub fn solve_tsp_with_backtracking<P>(
    points: &[GeoPoint],
    config: SearchConfig,
    observer: &mut P,
) -> Result<Solution>
where
    P: ProgressObserver + ?Sized,
{
    let started = Instant::now();
    let matrix = DistanceMatrix::from_points(points)?;
    let mut solution = search(&matrix, config, observer)?;
    solution.elapsed = started.elapsed();
    Ok(solution)
}

/// [`solve_tsp_with_backtracking`] with default settings and no progress output.
pub fn solve(points: &[GeoPoint]) -> Result<Solution> {
    solve_tsp_with_backtracking(points, SearchConfig::default(), &mut NoProgress)
}

/// `(n-1)!`, the number of distinct tours with a fixed start city.
pub fn distinct_tour_count(n: usize) -> Option<u128> {
    (1..n as u128).try_fold(1_u128, |acc, k| acc.checked_mul(k))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::{SearchConfig, distinct_tour_count, search, solve, solve_tsp_with_backtracking};
    use crate::{DistanceMatrix, Error, GeoPoint, progress::NoProgress};

    fn direct_cost(tour: &[usize], points: &[GeoPoint]) -> f64 {
        let n = tour.len();
        (0..n)
            .map(|i| points[tour[i]].haversine_km(&points[tour[(i + 1) % n]]))
            .sum()
    }

    /// Minimum over every ordering of cities `1..n` after a fixed 0,
    /// generated with Heap's algorithm and costed without the matrix.
    fn brute_force_min(points: &[GeoPoint]) -> (f64, usize) {
        let mut rest: Vec<usize> = (1..points.len()).collect();
        let mut best = f64::INFINITY;
        let mut count = 0;

        fn heap(
            k: usize,
            rest: &mut [usize],
            points: &[GeoPoint],
            best: &mut f64,
            count: &mut usize,
        ) {
            if k <= 1 {
                let mut tour = vec![0];
                tour.extend_from_slice(rest);
                *best = best.min(direct_cost(&tour, points));
                *count += 1;
                return;
            }
            heap(k - 1, rest, points, best, count);
            for i in 0..k - 1 {
                if k % 2 == 0 {
                    rest.swap(i, k - 1);
                } else {
                    rest.swap(0, k - 1);
                }
                heap(k - 1, rest, points, best, count);
            }
        }

        let k = rest.len();
        heap(k, &mut rest, points, &mut best, &mut count);
        (best, count)
    }

    fn random_points(rng: &mut StdRng, n: usize) -> Vec<GeoPoint> {
        (0..n)
            .map(|_| GeoPoint::new(rng.random_range(-60.0..60.0), rng.random_range(-170.0..170.0)))
            .collect()
    }

    fn assert_is_tour(tour: &[usize], n: usize) {
        assert_eq!(tour.len(), n);
        assert_eq!(tour[0], 0);
        let mut seen = vec![false; n];
        for &city in tour {
            assert!(!seen[city], "city {city} repeated in {tour:?}");
            seen[city] = true;
        }
    }

    #[test]
    fn single_point_returns_trivial_tour() {
        let solution = solve(&[GeoPoint::new(52.0, 4.0)]).expect("solve");
        assert_eq!(solution.tour, vec![0]);
        assert_eq!(solution.cost_km, 0.0);
        assert_eq!(solution.tours_evaluated, 1);
    }

    #[test]
    fn two_points_cost_twice_their_distance() {
        let points = [GeoPoint::new(52.3676, 4.9041), GeoPoint::new(48.8566, 2.3522)];
        let d = points[0].haversine_km(&points[1]);
        let solution = solve(&points).expect("solve");

        assert_eq!(solution.tour, vec![0, 1]);
        assert!((solution.cost_km - 2.0 * d).abs() < 1e-9);
    }

    #[test]
    fn empty_input_is_invalid() {
        let err = solve(&[]).expect_err("empty input should fail");
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn square_corners_find_the_perimeter() {
        // Corners given out of perimeter order; crossing tours are longer.
        let points = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ];
        let solution = solve(&points).expect("solve");
        let (expected, count) = brute_force_min(&points);

        assert_eq!(count, 6);
        assert_eq!(solution.tours_evaluated, 6);
        assert!((solution.cost_km - expected).abs() < 1e-9);
        assert_is_tour(&solution.tour, 4);
        assert!(solution.tour == vec![0, 2, 1, 3] || solution.tour == vec![0, 3, 1, 2]);
    }

    #[test]
    fn matches_brute_force_on_random_instances() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..=7 {
            for _ in 0..3 {
                let points = random_points(&mut rng, n);
                let solution = solve(&points).expect("solve");
                let (expected, count) = brute_force_min(&points);

                assert_is_tour(&solution.tour, n);
                assert_eq!(solution.tours_evaluated, count as u64);
                assert!(
                    (solution.cost_km - expected).abs() < 1e-6,
                    "n={n} got {} expected {expected}",
                    solution.cost_km
                );
                assert!((direct_cost(&solution.tour, &points) - solution.cost_km).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn ties_keep_the_first_tour_in_enumeration_order() {
        let same = GeoPoint::new(10.0, 10.0);
        let solution = solve(&[same; 4]).expect("solve");
        assert_eq!(solution.tour, vec![0, 1, 2, 3]);
        assert_eq!(solution.cost_km, 0.0);
    }

    #[test]
    fn repeated_runs_agree() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = random_points(&mut rng, 6);
        let first = solve(&points).expect("first");
        let second = solve(&points).expect("second");

        assert_eq!(first.cost_km, second.cost_km);
        assert_eq!(first.tour, second.tour);
    }

    #[test]
    fn zero_interval_reports_on_every_push_without_changing_result() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = random_points(&mut rng, 4);
        let mut notifications = 0_usize;
        let mut observer = |_elapsed: Duration| notifications += 1;

        let config = SearchConfig::default().with_progress_interval(Duration::ZERO);
        let observed =
            solve_tsp_with_backtracking(&points, config, &mut observer).expect("observed");
        let quiet = solve(&points).expect("quiet");

        // 3 first moves + 3*2 second moves + 6 final moves.
        assert_eq!(notifications, 15);
        assert_eq!(observed.tour, quiet.tour);
        assert_eq!(observed.cost_km, quiet.cost_km);
    }

    #[test]
    fn default_interval_is_silent_for_fast_searches() {
        let points = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
        ];
        let mut notifications = 0_usize;
        let mut observer = |_elapsed: Duration| notifications += 1;
        solve_tsp_with_backtracking(&points, SearchConfig::default(), &mut observer)
            .expect("solve");
        assert_eq!(notifications, 0);
    }

    #[test]
    fn search_over_prebuilt_matrix_matches_solve() {
        let mut rng = StdRng::seed_from_u64(11);
        let points = random_points(&mut rng, 5);
        let matrix = DistanceMatrix::from_points(&points).expect("matrix");

        let from_matrix =
            search(&matrix, SearchConfig::default(), &mut NoProgress).expect("search");
        let from_points = solve(&points).expect("solve");

        assert_eq!(from_matrix.tour, from_points.tour);
        assert_eq!(from_matrix.cost_km, from_points.cost_km);
    }

    #[test]
    fn distinct_tour_count_is_factorial_of_n_minus_one() {
        assert_eq!(distinct_tour_count(1), Some(1));
        assert_eq!(distinct_tour_count(2), Some(1));
        assert_eq!(distinct_tour_count(4), Some(6));
        assert_eq!(distinct_tour_count(11), Some(3_628_800));
        assert_eq!(distinct_tour_count(60), None);
    }
}
