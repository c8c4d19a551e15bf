use std::path::PathBuf;

use clusterlab::{
    Algorithm, ClusterParams, ClusteringWorkflow, CsvSink, DbscanParams, KMeansParams,
    LogRenderer, OutputConfig, RESULT_COLUMN,
};
use polars::df;
use polars::prelude::{CsvReader, DataFrame, NamedFrom, SerReader};

fn init() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("clusterlab-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn feature_table() -> DataFrame {
    df!(
        "SiO2" => &[45.1, 45.4, 45.2, 44.9, 52.0, 52.3, 51.8, 52.1, 60.0, 60.4, 59.8, 60.2],
        "MgO" => &[8.0, 8.2, 7.9, 8.1, 4.0, 4.2, 3.9, 4.1, 1.0, 1.2, 0.9, 1.1],
        "CaO" => &[11.0, 11.2, 10.9, 11.1, 8.0, 8.2, 7.9, 8.1, 3.0, 3.2, 2.9, 3.1]
    )
    .unwrap()
}

#[test]
fn kmeans_end_to_end_persists_labeled_dataset() {
    init();
    let base = scratch_dir("kmeans");
    let config = OutputConfig::new(base.join("datasets"), base.join("figures"));

    let params = KMeansParams::new(3).random_state(42).verbose(true);
    let mut workflow = ClusteringWorkflow::new(ClusterParams::KMeans(params));
    workflow.fit(feature_table()).unwrap();

    assert_eq!(workflow.algorithm(), Algorithm::KMeans);
    assert_eq!(workflow.cluster_centers().unwrap().shape(), &[3, 3]);

    let report = workflow.label_report(&CsvSink, &config).unwrap();
    assert_eq!(report.shape(), (12, 4));

    workflow
        .special_components(3, &LogRenderer, &config)
        .unwrap();

    let path = config.dataset_dir.join("KMeans.csv");
    let roundtrip = CsvReader::from_path(&path).unwrap().finish().unwrap();
    assert_eq!(roundtrip.shape(), (12, 4));

    let labels = roundtrip.column(RESULT_COLUMN).unwrap();
    let expected = workflow.labels().unwrap();
    let restored: Vec<i64> = labels.i64().unwrap().into_no_null_iter().collect();
    assert_eq!(restored, expected.to_vec());

    std::fs::remove_dir_all(&base).unwrap();
}

#[test]
fn dbscan_end_to_end_keeps_noise_in_report() {
    init();
    let base = scratch_dir("dbscan");
    let config = OutputConfig::new(base.join("datasets"), base.join("figures"));

    let frame = df!(
        "x" => &[0.0, 0.1, 0.2, 0.0, 0.1, 8.0, 8.1, 8.2, 8.0, 8.1, 100.0],
        "y" => &[0.0, 0.1, 0.0, 0.2, 0.2, 8.0, 8.1, 8.0, 8.2, 8.2, 100.0]
    )
    .unwrap();

    let mut workflow =
        ClusteringWorkflow::new(ClusterParams::Dbscan(DbscanParams::new(3).tolerance(1.0)));
    workflow.fit(frame).unwrap();
    workflow.label_report(&CsvSink, &config).unwrap();
    workflow
        .special_components(2, &LogRenderer, &config)
        .unwrap();

    let path = config.dataset_dir.join("DBSCAN.csv");
    let roundtrip = CsvReader::from_path(&path).unwrap().finish().unwrap();
    let labels: Vec<i64> = roundtrip
        .column(RESULT_COLUMN)
        .unwrap()
        .i64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(labels[10], -1);

    std::fs::remove_dir_all(&base).unwrap();
}

#[test]
fn refit_replaces_labels_instead_of_stacking_columns() {
    init();
    let base = scratch_dir("refit");
    let config = OutputConfig::new(base.join("datasets"), base.join("figures"));

    let mut workflow = ClusteringWorkflow::new(ClusterParams::KMeans(
        KMeansParams::new(2).random_state(7),
    ));
    workflow.fit(feature_table()).unwrap();

    // Reporting twice must not grow the table.
    let first = workflow.label_report(&CsvSink, &config).unwrap().shape();
    let second = workflow.label_report(&CsvSink, &config).unwrap().shape();
    assert_eq!(first, (12, 4));
    assert_eq!(second, (12, 4));

    std::fs::remove_dir_all(&base).unwrap();
}
