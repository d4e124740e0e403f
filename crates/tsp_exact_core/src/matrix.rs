use crate::{Error, GeoPoint, Result};

/// Symmetric n×n table of haversine distances in kilometers.
///
/// Stored row-major in one flat buffer. The diagonal is zero and
/// `get(i, j) == get(j, i)` for every pair.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds the matrix, computing each unordered pair once.
    pub fn from_points(points: &[GeoPoint]) -> Result<Self> {
        let n = points.len();
        if n == 0 {
            return Err(Error::invalid_input(
                "at least one point is required to build a distance matrix",
            ));
        }

        let mut cells = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].haversine_km(&points[j]);
                cells[i * n + j] = d;
                cells[j * n + i] = d;
            }
        }

        log::debug!("matrix: n={n} cells={}", cells.len());
        Ok(Self { n, cells })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.cells[from * self.n + to]
    }

    pub fn row(&self, from: usize) -> &[f64] {
        &self.cells[from * self.n..(from + 1) * self.n]
    }
}
