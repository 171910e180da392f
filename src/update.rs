use ndarray::Array1;

use crate::point::{Centroid, Point};

/// Move every centroid to the mean of the points assigned to it.
///
/// `count` is rewritten for all centroids. A centroid that lost all of its
/// points keeps its previous position with a count of zero.
pub fn update_centroids(points: &[Point], centroids: &mut [Centroid]) {
    // Step 1: sum up the members of each cluster
    let mut sums: Vec<Array1<f64>> = centroids
        .iter()
        .map(|c| Array1::zeros(c.dimensions()))
        .collect();
    let mut counts = vec![0usize; centroids.len()];

    for point in points {
        // unassigned points don't contribute
        let Some(c) = point.cluster else { continue };
        sums[c] += &point.values();
        counts[c] += 1;
    }

    // Step 2: divide, leaving empty clusters where they were
    for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
        centroid.count = count;
        if count > 0 {
            centroid.values = sum / count as f64;
        }
    }
}
