//! Conversions between polars feature tables and ndarray observation
//! matrices.
//!
//! Estimators consume `Array2<f64>`; every numeric column is cast to `f64`
//! first since it can represent all the types a feature table carries.

use ndarray::{Array1, Array2, Dim, Shape, ShapeBuilder};
use polars::prelude::{DataFrame, DataType, NamedFrom};
use polars::series::Series;

use crate::errors::{ClusterLabError, Result};

/// Name of the label column appended to a fitted feature table.
pub const RESULT_COLUMN: &str = "clustering result";

/// Converts a feature table into a `(n_samples, n_features)` observation
/// matrix.
///
/// Columns are cast to `f64` and concatenated column-major, then reshaped
/// with column strides and rewritten to standard layout. A null anywhere in
/// the table is an error; estimators have no notion of missing values.
pub fn dataframe_to_array(df: &DataFrame) -> Result<Array2<f64>> {
    let (height, width) = df.shape();
    let mut data = Vec::with_capacity(height * width);
    for series in df.get_columns() {
        let cast = series.cast(&DataType::Float64)?;
        let values = cast.f64()?;
        for value in values.into_iter() {
            data.push(value.ok_or_else(|| ClusterLabError::MissingValue {
                column: series.name().to_string(),
            })?);
        }
    }

    let shape = Shape::from(Dim([height, width])).strides(Dim([1, height]));
    let array =
        Array2::from_shape_vec(shape, data).map_err(|e| ClusterLabError::Shape(e.to_string()))?;
    Ok(array.as_standard_layout().to_owned())
}

/// Appends (or replaces) the [`RESULT_COLUMN`] label column in place.
///
/// Row count is never changed; exactly one column is added.
pub fn append_labels(df: &mut DataFrame, labels: &Array1<i64>) -> Result<()> {
    let series = Series::new(RESULT_COLUMN, labels.to_vec());
    df.with_column(series)?;
    Ok(())
}
