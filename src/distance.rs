use ndarray::Zip;

use crate::point::{Centroid, Point};

/// Squared Euclidean distance between a point and a centroid
#[inline]
pub fn squared_distance(point: &Point, centroid: &Centroid) -> f64 {
    debug_assert_eq!(
        point.dimensions(),
        centroid.dimensions(),
        "point and centroid dimensions differ"
    );
    Zip::from(point.values())
        .and(centroid.values())
        .fold(0.0, |acc, &p, &c| {
            let diff = p - c;
            acc + diff * diff
        })
}

/// Euclidean distance between a point and a centroid
#[inline]
pub fn distance(point: &Point, centroid: &Centroid) -> f64 {
    squared_distance(point, centroid).sqrt()
}
