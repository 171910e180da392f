use crate::distance::distance;
use crate::point::{Centroid, Point};

/// Index of the centroid closest to `point`.
///
/// Centroids are scanned in index order and the best is only replaced on a
/// strict improvement, so ties resolve to the lowest index.
pub fn nearest_centroid(point: &Point, centroids: &[Centroid]) -> usize {
    let mut best_cluster = 0;
    let mut best_dist = f64::MAX;

    for (ci, centroid) in centroids.iter().enumerate() {
        let dist = distance(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_cluster = ci;
        }
    }
    best_cluster
}

/// Assign every point to its nearest centroid.
///
/// Returns how many points ended up with a different label than before. A
/// point that had no label yet always counts as changed.
pub fn assign_points(points: &mut [Point], centroids: &[Centroid]) -> usize {
    debug_assert!(!centroids.is_empty(), "assignment needs at least one centroid");

    let mut changes = 0;
    for point in points.iter_mut() {
        let nearest = nearest_centroid(point, centroids);
        if point.cluster != Some(nearest) {
            point.cluster = Some(nearest);
            changes += 1;
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn points_1d(xs: &[f64]) -> Vec<Point> {
        xs.iter().map(|&x| Point::from_slice(&[x])).collect()
    }

    #[test]
    fn test_first_assignment_counts_every_point() {
        let mut points = points_1d(&[0.0, 1.0, 10.0, 11.0]);
        let centroids = vec![Centroid::from_slice(&[0.0]), Centroid::from_slice(&[10.0])];

        let changes = assign_points(&mut points, &centroids);
        assert_eq!(changes, 4);
        let labels: Vec<_> = points.iter().map(|p| p.cluster).collect();
        assert_eq!(labels, vec![Some(0), Some(0), Some(1), Some(1)]);
    }

    #[test]
    fn test_tie_keeps_lowest_index() {
        let mut points = points_1d(&[5.0]);
        let centroids = vec![
            Centroid::from_slice(&[0.0]),
            Centroid::from_slice(&[10.0]),
            Centroid::from_slice(&[10.0]),
        ];
        assign_points(&mut points, &centroids);
        assert_eq!(points[0].cluster, Some(0));

        // duplicated centroids: the first copy wins
        let mut points = points_1d(&[9.0]);
        assign_points(&mut points, &centroids);
        assert_eq!(points[0].cluster, Some(1));
    }

    #[test]
    fn test_only_moved_points_are_counted() {
        let mut points = points_1d(&[0.0, 4.0, 10.0]);
        let mut centroids = vec![Centroid::from_slice(&[0.0]), Centroid::from_slice(&[10.0])];
        assert_eq!(assign_points(&mut points, &centroids), 3);
        assert_eq!(points[1].cluster, Some(0));

        centroids[1] = Centroid::from_slice(&[5.0]);
        assert_eq!(assign_points(&mut points, &centroids), 1);
        assert_eq!(points[1].cluster, Some(1));
        assert_eq!(points[2].cluster, Some(1));
    }

    #[test]
    fn test_assignment_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut points: Vec<Point> = (0..100)
            .map(|_| Point::from_slice(&[rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)]))
            .collect();
        let centroids: Vec<Centroid> = (0..4)
            .map(|_| Centroid::from_slice(&[rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)]))
            .collect();

        assert_eq!(assign_points(&mut points, &centroids), 100);
        assert_eq!(assign_points(&mut points, &centroids), 0);
        assert!(points.iter().all(|p| matches!(p.cluster, Some(c) if c < 4)));
    }
}
