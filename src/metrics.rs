//! Cluster-quality metrics that no wrapped estimator crate provides.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2, Axis};

use crate::errors::{ClusterLabError, Result};

/// Calinski-Harabasz score (variance-ratio criterion).
///
/// Ratio of between-cluster to within-cluster dispersion, scaled by the
/// degrees of freedom. Higher is better. Undefined for fewer than two
/// clusters or when every sample is its own cluster.
pub fn calinski_harabasz_score(records: &Array2<f64>, labels: &Array1<usize>) -> Result<f64> {
    let n_samples = records.nrows();
    if labels.len() != n_samples {
        return Err(ClusterLabError::Shape(format!(
            "{} labels for {} samples",
            labels.len(),
            n_samples
        )));
    }

    let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (row, &label) in labels.iter().enumerate() {
        clusters.entry(label).or_default().push(row);
    }
    let n_clusters = clusters.len();
    if n_clusters < 2 || n_clusters >= n_samples {
        return Err(ClusterLabError::Metric {
            metric: "calinski_harabasz",
            message: format!(
                "defined for 2..n_samples clusters, got {} clusters over {} samples",
                n_clusters, n_samples
            ),
        });
    }

    let overall = records
        .mean_axis(Axis(0))
        .ok_or_else(|| ClusterLabError::Metric {
            metric: "calinski_harabasz",
            message: "empty observation matrix".to_string(),
        })?;

    let mut between = 0.0;
    let mut within = 0.0;
    for members in clusters.values() {
        let mut centroid = Array1::<f64>::zeros(records.ncols());
        for &row in members {
            centroid += &records.row(row);
        }
        centroid /= members.len() as f64;

        let spread = &centroid - &overall;
        between += members.len() as f64 * spread.dot(&spread);
        for &row in members {
            let offset = &records.row(row) - &centroid;
            within += offset.dot(&offset);
        }
    }

    if within == 0.0 {
        return Ok(1.0);
    }
    Ok(between * (n_samples - n_clusters) as f64 / (within * (n_clusters - 1) as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn separated_blobs_score_high() {
        let records = array![
            [0.0, 0.0],
            [0.1, 0.2],
            [0.2, 0.1],
            [10.0, 10.0],
            [10.1, 10.2],
            [10.2, 10.1]
        ];
        let labels = array![0usize, 0, 0, 1, 1, 1];

        let score = calinski_harabasz_score(&records, &labels).unwrap();
        assert!(score > 100.0, "expected a high score, got {score}");
    }

    #[test]
    fn single_cluster_is_undefined() {
        let records = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        let labels = array![0usize, 0, 0];

        let err = calinski_harabasz_score(&records, &labels).unwrap_err();
        assert!(matches!(err, ClusterLabError::Metric { .. }));
    }

    #[test]
    fn zero_within_dispersion_saturates() {
        let records = array![[0.0, 0.0], [0.0, 0.0], [5.0, 5.0], [5.0, 5.0]];
        let labels = array![0usize, 0, 1, 1];

        let score = calinski_harabasz_score(&records, &labels).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn label_count_must_match_samples() {
        let records = array![[0.0, 0.0], [1.0, 1.0]];
        let labels = array![0usize];

        let err = calinski_harabasz_score(&records, &labels).unwrap_err();
        assert!(matches!(err, ClusterLabError::Shape(_)));
    }
}
