//! Rendering collaborators.
//!
//! Plot rendering is external to this layer: workflows drive a renderer
//! through [`FigureRenderer`] and never consume what it produces. The
//! [`LogRenderer`] implementation only records render and save events
//! through `log`, which is enough for headless pipelines and for tests.

use std::path::Path;

use log::info;
use ndarray::{Array1, Array2};
use polars::prelude::DataFrame;

use crate::algorithms::Algorithm;
use crate::errors::Result;

/// Renders diagnostic figures for a fitted workflow.
pub trait FigureRenderer {
    /// Silhouette diagram for a centroid-based clustering.
    fn silhouette_diagram(
        &self,
        data: &DataFrame,
        labels: &Array1<i64>,
        centers: &Array2<f64>,
        n_clusters: usize,
        algorithm: Algorithm,
    );

    /// 2D scatter of the samples colored by cluster.
    fn scatter_2d(&self, data: &DataFrame, labels: &Array1<i64>, algorithm: Algorithm);

    /// 3D scatter of the samples colored by cluster.
    fn scatter_3d(&self, data: &DataFrame, labels: &Array1<i64>, algorithm: Algorithm);

    /// DBSCAN result plot (clusters plus noise) in two dimensions.
    fn dbscan_result(&self, data: &DataFrame, labels: &Array1<i64>, algorithm: Algorithm);

    /// Persists the most recently rendered figure under the given title.
    fn save_figure(&self, title: &str, dir: &Path) -> Result<()>;
}

/// Renderer that logs what a graphical backend would draw.
pub struct LogRenderer;

impl FigureRenderer for LogRenderer {
    fn silhouette_diagram(
        &self,
        data: &DataFrame,
        _labels: &Array1<i64>,
        _centers: &Array2<f64>,
        n_clusters: usize,
        algorithm: Algorithm,
    ) {
        info!(
            "silhouette diagram: {algorithm}, {} samples, {n_clusters} clusters",
            data.height()
        );
    }

    fn scatter_2d(&self, data: &DataFrame, _labels: &Array1<i64>, algorithm: Algorithm) {
        info!("bi-plot: {algorithm}, {} samples", data.height());
    }

    fn scatter_3d(&self, data: &DataFrame, _labels: &Array1<i64>, algorithm: Algorithm) {
        info!("tri-plot: {algorithm}, {} samples", data.height());
    }

    fn dbscan_result(&self, data: &DataFrame, labels: &Array1<i64>, algorithm: Algorithm) {
        let noise = labels.iter().filter(|&&l| l < 0).count();
        info!(
            "density result plot: {algorithm}, {} samples, {noise} noise",
            data.height()
        );
    }

    fn save_figure(&self, title: &str, dir: &Path) -> Result<()> {
        info!("figure `{title}` saved under {}", dir.display());
        Ok(())
    }
}
