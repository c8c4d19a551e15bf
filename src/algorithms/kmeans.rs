//! K-means over linfa's estimator.

use linfa::metrics::SilhouetteScore;
use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::{KMeans, KMeansInit};
use linfa_nn::distance::L2Dist;
use ndarray::{Array1, Array2};
use rand::{rngs::StdRng, SeedableRng};

use crate::errors::{to_estimator_error, ClusterLabError, Result};
use crate::metrics;

/// Seed used when no `random_state` is supplied, so repeated runs of the
/// same pipeline stay comparable.
const DEFAULT_SEED: u64 = 42;

/// Hyperparameters forwarded into the wrapped k-means estimator.
#[derive(Clone, Debug)]
pub struct KMeansParams {
    /// Number of clusters to form (and centroids to generate).
    pub n_clusters: usize,
    /// Centroid initialization strategy.
    pub init: KMeansInit<f64>,
    /// Number of independent runs; the best inertia wins.
    pub n_runs: usize,
    /// Iteration cap for a single run.
    pub max_n_iterations: u64,
    /// Convergence tolerance on centroid movement.
    pub tolerance: f64,
    /// Raises this layer's score reporting from debug to info.
    pub verbose: bool,
    /// Seed for centroid initialization.
    pub random_state: Option<u64>,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            n_clusters: 8,
            init: KMeansInit::KMeansPlusPlus,
            n_runs: 10,
            max_n_iterations: 300,
            tolerance: 1e-4,
            verbose: false,
            random_state: None,
        }
    }
}

impl KMeansParams {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..Self::default()
        }
    }

    pub fn init(mut self, init: KMeansInit<f64>) -> Self {
        self.init = init;
        self
    }

    pub fn n_runs(mut self, n_runs: usize) -> Self {
        self.n_runs = n_runs;
        self
    }

    pub fn max_n_iterations(mut self, max_n_iterations: u64) -> Self {
        self.max_n_iterations = max_n_iterations;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }
}

/// Scores reported for a fitted k-means model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KMeansScores {
    /// Within-cluster sum of squared distances, as reported by the estimator.
    pub inertia: f64,
    pub calinski_harabasz: f64,
    pub silhouette: f64,
}

/// Fits the estimator and assigns every sample to its nearest centroid.
pub(crate) fn fit_predict(
    params: &KMeansParams,
    records: &Array2<f64>,
) -> Result<(KMeans<f64, L2Dist>, Array1<usize>)> {
    let seed = params.random_state.unwrap_or(DEFAULT_SEED);
    let rng = StdRng::seed_from_u64(seed);
    let model = to_estimator_error(
        KMeans::params_with(params.n_clusters, rng, L2Dist)
            .n_runs(params.n_runs)
            .max_n_iterations(params.max_n_iterations)
            .tolerance(params.tolerance)
            .init_method(params.init.clone())
            .fit(&DatasetBase::from(records.view())),
    )?;
    let labels: Array1<usize> = model.predict(records);
    Ok((model, labels))
}

/// Inertia plus the two external cluster-quality metrics, all computed
/// against the original observation matrix and the fitted labels.
pub(crate) fn scores(
    model: &KMeans<f64, L2Dist>,
    records: &Array2<f64>,
    labels: &Array1<usize>,
) -> Result<KMeansScores> {
    let calinski_harabasz = metrics::calinski_harabasz_score(records, labels)?;
    let silhouette = DatasetBase::new(records.view(), labels.clone())
        .silhouette_score()
        .map_err(|e| ClusterLabError::Metric {
            metric: "silhouette",
            message: e.to_string(),
        })?;
    Ok(KMeansScores {
        inertia: model.inertia(),
        calinski_harabasz,
        silhouette,
    })
}
