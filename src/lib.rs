//! Clustering workflows over the linfa ecosystem.
//!
//! This crate wraps a small set of clustering estimators behind one uniform
//! surface: build a [`ClusterParams`], hand a polars `DataFrame` of numeric
//! features to a [`ClusteringWorkflow`], then pull labels, centers, and
//! diagnostics out of the fitted state. All numerics live in the wrapped
//! estimators (`linfa-clustering`, `affinityprop`); this layer forwards
//! hyperparameters, converts tables to observation matrices, and drives
//! persistence and figure rendering through the [`DatasetSink`] and
//! [`FigureRenderer`] seams.

pub mod algorithms;
pub mod config;
pub mod convert;
pub mod errors;
pub mod metrics;
pub mod persist;
pub mod plot;
pub mod workflow;

pub use algorithms::affinity::{AffinityPropagationParams, FittedAffinityPropagation};
pub use algorithms::dbscan::{DbscanParams, DistanceMetric, NeighbourSearch};
pub use algorithms::kmeans::{KMeansParams, KMeansScores};
pub use algorithms::Algorithm;
pub use config::OutputConfig;
pub use convert::RESULT_COLUMN;
pub use errors::{ClusterLabError, Result};
pub use persist::{CsvSink, DatasetSink};
pub use plot::{FigureRenderer, LogRenderer};
pub use workflow::{ClusterParams, ClusteringWorkflow, FittedEstimator};

// Re-exported so callers can pick an initialization strategy without
// depending on linfa-clustering directly.
pub use linfa_clustering::KMeansInit;
