use log::info;

use crate::assign::assign_points;
use crate::distance::squared_distance;
use crate::error::{Error, Result};
use crate::point::{Centroid, Point};
use crate::seed::evenly_spaced;
use crate::update::update_centroids;

/// Default cap on assign/update rounds
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on iterations. At least one iteration always runs, even
    /// when this is zero.
    pub max_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// An assignment pass moved no point.
    Converged,
    /// `max_iterations` was reached while points were still moving.
    IterationLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Stopped(StopReason),
}

/// Drives Lloyd's algorithm over an owned set of points and centroids.
///
/// Every [`step`](ClusterEngine::step) assigns all points to their nearest
/// centroid and then moves each centroid to the mean of its members. The
/// engine stops once a pass reassigns nothing or the iteration cap is hit.
#[derive(Debug, Clone)]
pub struct ClusterEngine {
    points: Vec<Point>,
    centroids: Vec<Centroid>,
    config: EngineConfig,
    iterations: usize,
    changes: Vec<usize>,
    state: EngineState,
}

impl ClusterEngine {
    /// Check the run's shape once so the per-point loops don't have to.
    pub fn new(points: Vec<Point>, centroids: Vec<Centroid>, config: EngineConfig) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::Config("no points to cluster".into()));
        }
        if centroids.is_empty() {
            return Err(Error::Config("number of clusters must be positive".into()));
        }

        let dims = points[0].dimensions();
        let mismatch = points
            .iter()
            .map(Point::dimensions)
            .chain(centroids.iter().map(Centroid::dimensions))
            .find(|&d| d != dims);
        if let Some(found) = mismatch {
            return Err(Error::DimensionMismatch {
                expected: dims,
                found,
            });
        }

        Ok(Self {
            points,
            centroids,
            config,
            iterations: 0,
            changes: Vec::new(),
            state: EngineState::Running,
        })
    }

    /// Seed `k` centroids with [`evenly_spaced`] and build an engine.
    pub fn with_seeding(points: Vec<Point>, k: usize, config: EngineConfig) -> Result<Self> {
        let centroids = evenly_spaced(&points, k)?;
        Self::new(points, centroids, config)
    }

    /// Run one assign/update round and return how many points moved.
    ///
    /// Returns `None` without touching anything once the engine has stopped.
    pub fn step(&mut self) -> Option<usize> {
        if self.state != EngineState::Running {
            return None;
        }

        let changes = assign_points(&mut self.points, &self.centroids);
        update_centroids(&self.points, &mut self.centroids);
        self.iterations += 1;
        self.changes.push(changes);

        info!(
            "Iteration {}: {} points changed clusters",
            self.iterations, changes
        );

        if changes == 0 {
            self.state = EngineState::Stopped(StopReason::Converged);
        } else if self.iterations >= self.config.max_iterations {
            self.state = EngineState::Stopped(StopReason::IterationLimit);
        }
        Some(changes)
    }

    /// Step until stopped and hand back the final state.
    pub fn run(mut self) -> Clustering {
        while self.step().is_some() {}
        info!(
            "K-means clustering completed after {} iterations",
            self.iterations
        );
        self.finish()
    }

    fn finish(self) -> Clustering {
        let stop_reason = match self.state {
            EngineState::Stopped(reason) => reason,
            EngineState::Running => StopReason::IterationLimit,
        };
        Clustering {
            points: self.points,
            centroids: self.centroids,
            iterations: self.iterations,
            changes: self.changes,
            stop_reason,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    pub fn k(&self) -> usize {
        self.centroids.len()
    }
}

/// Output of a finished run
#[derive(Debug, Clone)]
pub struct Clustering {
    /// Input points, each carrying its final label
    pub points: Vec<Point>,
    pub centroids: Vec<Centroid>,
    /// Iterations executed, including the final stable one
    pub iterations: usize,
    /// Points reassigned in each iteration, in order
    pub changes: Vec<usize>,
    pub stop_reason: StopReason,
}

impl Clustering {
    /// Final cluster index of every point, in input order.
    pub fn labels(&self) -> Vec<usize> {
        // every point is labelled after the first iteration
        self.points.iter().filter_map(|p| p.cluster).collect()
    }

    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::Converged
    }

    /// Within-cluster sum of squared distances.
    pub fn inertia(&self) -> f64 {
        self.points
            .iter()
            .filter_map(|p| p.cluster.map(|c| squared_distance(p, &self.centroids[c])))
            .sum()
    }
}

/// Cluster `points` starting from the given centroids.
pub fn kmeans(points: Vec<Point>, centroids: Vec<Centroid>, config: EngineConfig) -> Result<Clustering> {
    Ok(ClusterEngine::new(points, centroids, config)?.run())
}

/// Cluster `points` into `k` groups using evenly spaced seeding.
pub fn kmeans_seeded(points: Vec<Point>, k: usize, config: EngineConfig) -> Result<Clustering> {
    Ok(ClusterEngine::with_seeding(points, k, config)?.run())
}
