//! DBSCAN over linfa's transformer.
//!
//! DBSCAN has no model object: the estimator is a transformer that assigns
//! each sample either a cluster id or noise, so the fitted state is just the
//! assignment vector.

use linfa::traits::Transformer;
use linfa_clustering::Dbscan;
use linfa_nn::distance::{L1Dist, L2Dist, LInfDist, LpDist};
use linfa_nn::CommonNearestNeighbour;
use ndarray::{Array1, Array2};

use crate::errors::{to_estimator_error, Result};

/// Distance used for neighborhood queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DistanceMetric {
    Euclidean,
    Manhattan,
    Chebyshev,
    /// Minkowski distance with the given power.
    Minkowski(f64),
}

/// Spatial index used to find neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighbourSearch {
    KdTree,
    BallTree,
    LinearSearch,
}

/// Hyperparameters forwarded into the wrapped DBSCAN transformer.
#[derive(Clone, Debug)]
pub struct DbscanParams {
    /// Neighborhood radius (the `eps` of the classic formulation).
    pub tolerance: f64,
    /// Minimum neighborhood size for a core point.
    pub min_points: usize,
    pub metric: DistanceMetric,
    pub nn_algorithm: NeighbourSearch,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            tolerance: 0.5,
            min_points: 5,
            metric: DistanceMetric::Euclidean,
            nn_algorithm: NeighbourSearch::KdTree,
        }
    }
}

impl DbscanParams {
    pub fn new(min_points: usize) -> Self {
        Self {
            min_points,
            ..Self::default()
        }
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn nn_algorithm(mut self, nn_algorithm: NeighbourSearch) -> Self {
        self.nn_algorithm = nn_algorithm;
        self
    }
}

/// Runs the transformer; `None` marks a noise sample.
pub(crate) fn fit(
    params: &DbscanParams,
    records: &Array2<f64>,
) -> Result<Array1<Option<usize>>> {
    let nn = match params.nn_algorithm {
        NeighbourSearch::KdTree => CommonNearestNeighbour::KdTree,
        NeighbourSearch::BallTree => CommonNearestNeighbour::BallTree,
        NeighbourSearch::LinearSearch => CommonNearestNeighbour::LinearSearch,
    };

    let assignments = match params.metric {
        DistanceMetric::Euclidean => to_estimator_error(
            Dbscan::params_with(params.min_points, L2Dist, nn)
                .tolerance(params.tolerance)
                .transform(records),
        )?,
        DistanceMetric::Manhattan => to_estimator_error(
            Dbscan::params_with(params.min_points, L1Dist, nn)
                .tolerance(params.tolerance)
                .transform(records),
        )?,
        DistanceMetric::Chebyshev => to_estimator_error(
            Dbscan::params_with(params.min_points, LInfDist, nn)
                .tolerance(params.tolerance)
                .transform(records),
        )?,
        DistanceMetric::Minkowski(p) => to_estimator_error(
            Dbscan::params_with(params.min_points, LpDist::new(p), nn)
                .tolerance(params.tolerance)
                .transform(records),
        )?,
    };
    Ok(assignments)
}
