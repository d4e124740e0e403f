use crate::DistanceMatrix;

/// Length of the closed tour `tour[0] -> ... -> tour[n-1] -> tour[0]`.
///
/// A single city (or an empty tour) has no edges and costs zero.
pub fn tour_cost(tour: &[usize], matrix: &DistanceMatrix) -> f64 {
    let Some((&first, _)) = tour.split_first() else {
        return 0.0;
    };

    let open: f64 = tour.windows(2).map(|w| matrix.get(w[0], w[1])).sum();
    let last = tour[tour.len() - 1];
    open + matrix.get(last, first)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: f64,
    pub longest: f64,
    pub average: f64,
}

/// Edge statistics of a closed tour, logged at info level.
pub fn tour_metrics(tour: &[usize], matrix: &DistanceMatrix) -> TourMetrics {
    let n = tour.len();
    if n < 2 {
        log::info!("metrics: n={n} so there's nothing to report");
        return TourMetrics::default();
    }

    let edges = (0..n).map(|i| matrix.get(tour[i], tour[(i + 1) % n]));
    let (total, longest) = edges.fold((0.0, 0.0_f64), |(sum, max), d| (sum + d, max.max(d)));
    let average = total / n as f64;

    log::info!("metrics: n={n} total_km={total:.3} longest_km={longest:.3} avg_km={average:.3}");

    TourMetrics {
        total,
        longest,
        average,
    }
}
