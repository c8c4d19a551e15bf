//! Clustering algorithms and their hyperparameter sets.
//!
//! The set of algorithms is closed: every variant this crate will ever drive
//! is listed in [`Algorithm`]. Three of them are wired to estimators; the
//! rest are declared for the outer pipeline's menus and fail at fit time.

use std::fmt;

pub mod affinity;
pub mod dbscan;
pub mod kmeans;

/// Every clustering algorithm this crate knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    KMeans,
    Dbscan,
    AffinityPropagation,
    MeanShift,
    Spectral,
    WardHierarchical,
    Agglomerative,
    Optics,
    GaussianMixtures,
    Birch,
    BisectingKMeans,
}

impl Algorithm {
    /// Display name, also used to derive persisted dataset names.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::KMeans => "KMeans",
            Algorithm::Dbscan => "DBSCAN",
            Algorithm::AffinityPropagation => "AffinityPropagation",
            Algorithm::MeanShift => "MeanShift",
            Algorithm::Spectral => "Spectral",
            Algorithm::WardHierarchical => "WardHierarchical",
            Algorithm::Agglomerative => "Agglomerative",
            Algorithm::Optics => "OPTICS",
            Algorithm::GaussianMixtures => "GaussianMixtures",
            Algorithm::Birch => "BIRCHClustering",
            Algorithm::BisectingKMeans => "BisectingKMeans",
        }
    }

    /// Whether the fitted estimator exposes cluster centers.
    pub fn supports_centers(&self) -> bool {
        matches!(self, Algorithm::KMeans | Algorithm::AffinityPropagation)
    }

    /// Whether the algorithm produces density-based diagnostics.
    pub fn density_diagnostics(&self) -> bool {
        matches!(self, Algorithm::Dbscan)
    }

    /// Whether an estimator is wired up for this algorithm.
    pub fn implemented(&self) -> bool {
        matches!(
            self,
            Algorithm::KMeans | Algorithm::Dbscan | Algorithm::AffinityPropagation
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
