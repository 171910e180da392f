use ndarray::{Array1, ArrayView1};

/// A single observation with its current cluster label
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    values: Array1<f64>,
    /// `None` until the first assignment pass
    pub cluster: Option<usize>,
}

impl Point {
    pub fn new(values: Array1<f64>) -> Self {
        Self {
            values,
            cluster: None,
        }
    }

    pub fn from_slice(values: &[f64]) -> Self {
        Self::new(Array1::from_vec(values.to_vec()))
    }

    #[inline]
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.values.len()
    }
}

/// Representative position of a cluster plus the size of its last membership
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    pub(crate) values: Array1<f64>,
    pub(crate) count: usize,
}

impl Centroid {
    pub fn new(values: Array1<f64>) -> Self {
        Self { values, count: 0 }
    }

    pub fn from_slice(values: &[f64]) -> Self {
        Self::new(Array1::from_vec(values.to_vec()))
    }

    /// Seed a centroid at the position of an existing point.
    pub fn at(point: &Point) -> Self {
        Self::new(point.values().to_owned())
    }

    #[inline]
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    /// Number of points assigned in the most recent pass.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}
