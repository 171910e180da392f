use log::debug;

use crate::error::{Error, Result};
use crate::point::{Centroid, Point};

/// Dataset indices picked by [`evenly_spaced`]: `(i * step) % n` for
/// `i in 0..k`, with `step = max(1, n / k)`.
pub fn evenly_spaced_indices(n: usize, k: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let step = (n / k.max(1)).max(1);
    (0..k).map(|i| (i * step) % n).collect()
}

/// Seed `k` centroids at evenly spaced points of the dataset.
///
/// No randomness is involved. When `k > n` indices wrap around and some
/// centroids start at the same point.
pub fn evenly_spaced(points: &[Point], k: usize) -> Result<Vec<Centroid>> {
    if k == 0 {
        return Err(Error::Config("number of clusters must be positive".into()));
    }
    if points.is_empty() {
        return Err(Error::Config("cannot seed centroids without points".into()));
    }

    let indices = evenly_spaced_indices(points.len(), k);
    debug!("seeding {} centroids from point indices {:?}", k, indices);

    let mut centroids = Vec::new();
    centroids.try_reserve_exact(k)?;
    centroids.extend(indices.into_iter().map(|idx| Centroid::at(&points[idx])));
    Ok(centroids)
}
