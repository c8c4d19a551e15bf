//! The clustering workflow: fit, report assignments, render diagnostics.

use linfa_clustering::KMeans;
use linfa_nn::distance::L2Dist;
use log::{debug, info};
use ndarray::{Array1, Array2};
use polars::prelude::DataFrame;

use crate::algorithms::affinity::{self, AffinityPropagationParams, FittedAffinityPropagation};
use crate::algorithms::dbscan::{self, DbscanParams};
use crate::algorithms::kmeans::{self, KMeansParams, KMeansScores};
use crate::algorithms::Algorithm;
use crate::config::OutputConfig;
use crate::convert;
use crate::errors::{ClusterLabError, Result};
use crate::persist::DatasetSink;
use crate::plot::FigureRenderer;

/// Hyperparameters for every algorithm the workflow can drive, one variant
/// per algorithm.
///
/// The last eight variants have no estimator wired up; constructing a
/// workflow with one of them is allowed (the outer pipeline lists them in
/// its menus) but fitting it fails with
/// [`ClusterLabError::NoEstimator`].
#[derive(Clone, Debug)]
pub enum ClusterParams {
    KMeans(KMeansParams),
    Dbscan(DbscanParams),
    AffinityPropagation(AffinityPropagationParams),
    MeanShift,
    Spectral,
    WardHierarchical,
    Agglomerative,
    Optics,
    GaussianMixtures,
    Birch,
    BisectingKMeans,
}

impl ClusterParams {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            ClusterParams::KMeans(_) => Algorithm::KMeans,
            ClusterParams::Dbscan(_) => Algorithm::Dbscan,
            ClusterParams::AffinityPropagation(_) => Algorithm::AffinityPropagation,
            ClusterParams::MeanShift => Algorithm::MeanShift,
            ClusterParams::Spectral => Algorithm::Spectral,
            ClusterParams::WardHierarchical => Algorithm::WardHierarchical,
            ClusterParams::Agglomerative => Algorithm::Agglomerative,
            ClusterParams::Optics => Algorithm::Optics,
            ClusterParams::GaussianMixtures => Algorithm::GaussianMixtures,
            ClusterParams::Birch => Algorithm::Birch,
            ClusterParams::BisectingKMeans => Algorithm::BisectingKMeans,
        }
    }
}

/// Fitted estimator state, one variant per wired-up algorithm.
#[derive(Clone, Debug)]
pub enum FittedEstimator {
    KMeans(KMeans<f64, L2Dist>),
    /// DBSCAN assignments; `None` marks noise.
    Dbscan(Array1<Option<usize>>),
    AffinityPropagation(FittedAffinityPropagation),
}

/// Drives one clustering algorithm through fit, label reporting, and
/// algorithm-specific diagnostics.
///
/// A workflow owns its feature table and estimator exclusively; nothing is
/// shared across instances. Reconfiguring means constructing a new workflow.
pub struct ClusteringWorkflow {
    params: ClusterParams,
    data: Option<DataFrame>,
    records: Option<Array2<f64>>,
    fitted: Option<FittedEstimator>,
    labels: Option<Array1<i64>>,
}

impl ClusteringWorkflow {
    pub fn new(params: ClusterParams) -> Self {
        Self {
            params,
            data: None,
            records: None,
            fitted: None,
            labels: None,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.params.algorithm()
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    /// Stores the feature table and delegates fitting to the wrapped
    /// estimator. Estimator failures propagate unchanged.
    pub fn fit(&mut self, data: DataFrame) -> Result<()> {
        let records = convert::dataframe_to_array(&data)?;
        debug!(
            "fitting {} on {} samples x {} features",
            self.algorithm(),
            records.nrows(),
            records.ncols()
        );

        let (fitted, labels) = match &self.params {
            ClusterParams::KMeans(params) => {
                let (model, assignments) = kmeans::fit_predict(params, &records)?;
                let labels = assignments.mapv(|l| l as i64);
                (FittedEstimator::KMeans(model), labels)
            }
            ClusterParams::Dbscan(params) => {
                let assignments = dbscan::fit(params, &records)?;
                let labels = assignments.mapv(|a| a.map(|c| c as i64).unwrap_or(-1));
                (FittedEstimator::Dbscan(assignments), labels)
            }
            ClusterParams::AffinityPropagation(params) => {
                let model = affinity::fit(params, &records)?;
                let labels = model.labels.mapv(|l| l as i64);
                (FittedEstimator::AffinityPropagation(model), labels)
            }
            _ => return Err(ClusterLabError::NoEstimator(self.algorithm())),
        };

        self.data = Some(data);
        self.records = Some(records);
        self.fitted = Some(fitted);
        self.labels = Some(labels);
        Ok(())
    }

    /// Cluster centers of the fitted estimator.
    ///
    /// `None` for density-based algorithms and before `fit`; whether an
    /// algorithm can ever return `Some` is
    /// [`Algorithm::supports_centers`].
    pub fn cluster_centers(&self) -> Option<&Array2<f64>> {
        match self.fitted.as_ref()? {
            FittedEstimator::KMeans(model) => Some(model.centroids()),
            FittedEstimator::Dbscan(_) => None,
            FittedEstimator::AffinityPropagation(model) => Some(&model.centers),
        }
    }

    /// One label per sample; DBSCAN noise is `-1`.
    pub fn labels(&self) -> Result<&Array1<i64>> {
        self.labels
            .as_ref()
            .ok_or(ClusterLabError::NotFitted("cluster labels"))
    }

    /// Appends the `"clustering result"` column to the stored feature table
    /// and persists the augmented table under this algorithm's name.
    pub fn label_report(
        &mut self,
        sink: &dyn DatasetSink,
        config: &OutputConfig,
    ) -> Result<&DataFrame> {
        let labels = self
            .labels
            .as_ref()
            .ok_or(ClusterLabError::NotFitted("cluster labels"))?;
        let data = self
            .data
            .as_mut()
            .ok_or(ClusterLabError::NotFitted("feature table"))?;

        convert::append_labels(data, labels)?;
        info!(
            "clustering labels: {}, {} samples",
            self.params.algorithm(),
            labels.len()
        );
        sink.save_data(data, self.params.algorithm().name(), &config.dataset_dir)?;
        Ok(data)
    }

    /// K-means quality scores; `Ok(None)` for algorithms without scoring.
    pub fn scores(&self) -> Result<Option<KMeansScores>> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or(ClusterLabError::NotFitted("estimator"))?;
        let model = match fitted {
            FittedEstimator::KMeans(model) => model,
            _ => return Ok(None),
        };
        let records = self
            .records
            .as_ref()
            .ok_or(ClusterLabError::NotFitted("observation matrix"))?;
        let labels = self
            .labels
            .as_ref()
            .ok_or(ClusterLabError::NotFitted("cluster labels"))?;
        let assignments = labels.mapv(|l| l as usize);
        kmeans::scores(model, records, &assignments).map(Some)
    }

    /// Algorithm-specific diagnostics.
    ///
    /// K-means logs its scores, renders a silhouette diagram, and renders a
    /// scatter plot chosen by `components_num`: `2` gives a bi-plot, `3` or
    /// more a tri-plot, anything else no scatter at all. DBSCAN renders its
    /// 2D result plot unconditionally. Other algorithms define none.
    pub fn special_components(
        &self,
        components_num: usize,
        renderer: &dyn FigureRenderer,
        config: &OutputConfig,
    ) -> Result<()> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or(ClusterLabError::NotFitted("estimator"))?;
        let data = self
            .data
            .as_ref()
            .ok_or(ClusterLabError::NotFitted("feature table"))?;
        let labels = self
            .labels
            .as_ref()
            .ok_or(ClusterLabError::NotFitted("cluster labels"))?;
        let algorithm = self.params.algorithm();

        match (&self.params, fitted) {
            (ClusterParams::KMeans(params), FittedEstimator::KMeans(model)) => {
                let scores = self
                    .scores()?
                    .ok_or(ClusterLabError::NotFitted("scores"))?;
                if params.verbose {
                    info!(
                        "{algorithm} scores: inertia={}, calinski_harabasz={}, silhouette={}",
                        scores.inertia, scores.calinski_harabasz, scores.silhouette
                    );
                } else {
                    debug!(
                        "{algorithm} scores: inertia={}, calinski_harabasz={}, silhouette={}",
                        scores.inertia, scores.calinski_harabasz, scores.silhouette
                    );
                }

                renderer.silhouette_diagram(
                    data,
                    labels,
                    model.centroids(),
                    params.n_clusters,
                    algorithm,
                );
                renderer.save_figure(
                    &format!("Silhouette Diagram - {algorithm}"),
                    &config.figure_dir,
                )?;

                if components_num >= 3 {
                    // The tri-plot is displayed by the renderer but not
                    // persisted; any component count above 3 draws the same
                    // figure.
                    renderer.scatter_3d(data, labels, algorithm);
                } else if components_num == 2 {
                    renderer.scatter_2d(data, labels, algorithm);
                    renderer
                        .save_figure(&format!("Bi-plot - {algorithm}"), &config.figure_dir)?;
                }
            }
            (ClusterParams::Dbscan(_), FittedEstimator::Dbscan(_)) => {
                renderer.dbscan_result(data, labels, algorithm);
                renderer.save_figure(
                    &format!("Plot - {algorithm} - 2D"),
                    &config.figure_dir,
                )?;
            }
            _ => {
                debug!("no special components for {algorithm}");
            }
        }
        Ok(())
    }
}
