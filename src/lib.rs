//! Lloyd's k-means clustering.
//!
//! Points are assigned to their nearest centroid (Euclidean distance), every
//! centroid then moves to the mean of its members, and the two steps repeat
//! until no point changes cluster or an iteration cap is reached. Seeding is
//! deterministic, so identical inputs always give identical results.
//!
//! ```no_run
//! use kmeans_lloyd::{kmeans_seeded, CsvFormat, DataSet, EngineConfig};
//!
//! let ds = DataSet::from_delimited("points.csv", &CsvFormat::default())?;
//! let result = kmeans_seeded(ds.to_points()?, 3, EngineConfig::default())?;
//! println!("{:?} after {} iterations", result.labels(), result.iterations);
//! # Ok::<(), kmeans_lloyd::Error>(())
//! ```

pub mod assign;
pub mod dataset;
pub mod distance;
pub mod engine;
pub mod error;
pub mod point;
pub mod seed;
pub mod update;

pub use assign::{assign_points, nearest_centroid};
pub use dataset::{centroids_path, clusters_path, write_centroids, write_clusters, CsvFormat, DataSet};
pub use distance::{distance, squared_distance};
pub use engine::{
    kmeans, kmeans_seeded, ClusterEngine, Clustering, EngineConfig, EngineState, StopReason,
    DEFAULT_MAX_ITERATIONS,
};
pub use error::{Error, ErrorKind, Result};
pub use point::{Centroid, Point};
pub use seed::{evenly_spaced, evenly_spaced_indices};
pub use update::update_centroids;
