//! Affinity propagation over the `affinityprop` estimator.
//!
//! The backend fixes the similarity to negative Euclidean distance and
//! derives the preference (self-similarity) from the median similarity
//! internally; it is also deterministic and silent. The corresponding knobs
//! from the classic estimator surface are therefore accepted but inert, and
//! a regression test pins that they never reach the backend.

use affinityprop::{AffinityPropagation, NegEuclidean, Preference};
use log::warn;
use ndarray::{Array1, Array2};

use crate::errors::{ClusterLabError, Result};

/// Hyperparameters for the wrapped affinity-propagation estimator.
#[derive(Clone, Debug)]
pub struct AffinityPropagationParams {
    /// Message damping factor in `(0, 1)`.
    pub damping: f64,
    /// Iteration cap for message passing.
    pub max_iterations: usize,
    /// Number of stable iterations required to declare convergence.
    pub convergence_iter: usize,
    /// Worker threads used by the backend.
    pub threads: usize,
    /// Inert: the backend derives the preference from the median similarity.
    pub preference: Option<f64>,
    /// Inert: the backend has no verbosity switch.
    pub verbose: bool,
    /// Inert: the backend is deterministic.
    pub random_state: Option<u64>,
}

impl Default for AffinityPropagationParams {
    fn default() -> Self {
        Self {
            damping: 0.5,
            max_iterations: 200,
            convergence_iter: 15,
            threads: 1,
            preference: None,
            verbose: false,
            random_state: None,
        }
    }
}

impl AffinityPropagationParams {
    pub fn damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn convergence_iter(mut self, convergence_iter: usize) -> Self {
        self.convergence_iter = convergence_iter;
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn preference(mut self, preference: f64) -> Self {
        self.preference = Some(preference);
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

/// Fitted affinity-propagation state derived from the backend's
/// exemplar-to-members map.
#[derive(Clone, Debug)]
pub struct FittedAffinityPropagation {
    /// Row indices of the exemplar samples, ascending; cluster ids follow
    /// this order.
    pub exemplars: Vec<usize>,
    /// One cluster id per sample.
    pub labels: Array1<usize>,
    /// Exemplar rows copied out of the observation matrix, `(k, n_features)`.
    pub centers: Array2<f64>,
    pub converged: bool,
}

pub(crate) fn fit(
    params: &AffinityPropagationParams,
    records: &Array2<f64>,
) -> Result<FittedAffinityPropagation> {
    let estimator: AffinityPropagation<f64> = AffinityPropagation::new(
        params.damping,
        params.threads,
        params.convergence_iter,
        params.max_iterations,
    );
    let (converged, clusters) = estimator.predict(records, NegEuclidean::default(), Preference::Median);
    if !converged {
        warn!(
            "affinity propagation did not converge within {} iterations",
            params.max_iterations
        );
    }
    if clusters.is_empty() {
        return Err(ClusterLabError::Estimator(
            "affinity propagation produced no exemplars".to_string(),
        ));
    }

    let mut exemplars: Vec<usize> = clusters.keys().copied().collect();
    exemplars.sort_unstable();

    let mut labels = Array1::<usize>::zeros(records.nrows());
    for (cluster_id, exemplar) in exemplars.iter().enumerate() {
        for &member in &clusters[exemplar] {
            labels[member] = cluster_id;
        }
        labels[*exemplar] = cluster_id;
    }

    let mut centers = Array2::<f64>::zeros((exemplars.len(), records.ncols()));
    for (row, &exemplar) in exemplars.iter().enumerate() {
        centers.row_mut(row).assign(&records.row(exemplar));
    }

    Ok(FittedAffinityPropagation {
        exemplars,
        labels,
        centers,
        converged,
    })
}
