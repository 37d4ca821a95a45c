use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use crate::error::{PipelineError, Result};
use crate::events::{EventSink, PipelineEvent};
use crate::extract::DescriptorRow;

/// Feature column order fed to the scaler and the model. Artifacts are
/// trained against exactly this layout.
pub const FEATURE_COLUMNS: [&str; 6] = [
    "mol_wt",
    "log_p",
    "rotatable_bonds",
    "h_donors",
    "h_acceptors",
    "aromatic_proportion",
];

pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// Descriptor records that survived missing-value filtering, keyed by their
/// original input index. Invariants: `indices` is strictly ascending, the
/// frame holds no nulls, and frame row `i` belongs to input row
/// `indices[i]`.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    indices: Vec<usize>,
    frame: DataFrame,
}

impl FeatureTable {
    /// Drops every record with a missing field, reports the drop count, and
    /// assembles the rest into a dense frame. Errors when nothing survives.
    pub fn from_rows(rows: Vec<DescriptorRow>, sink: &dyn EventSink) -> Result<Self> {
        let total = rows.len();
        let mut kept: Vec<DescriptorRow> =
            rows.into_iter().filter(DescriptorRow::is_complete).collect();
        kept.sort_by_key(|row| row.index);

        sink.emit(PipelineEvent::MissingValuesDropped {
            dropped: total - kept.len(),
            remaining: kept.len(),
        });

        if kept.is_empty() {
            return Err(PipelineError::NoValidInput(
                "no usable descriptor records after removing missing values".to_string(),
            ));
        }

        let indices: Vec<usize> = kept.iter().map(|row| row.index).collect();

        let columns: Vec<Column> = vec![
            Series::new(
                FEATURE_COLUMNS[0].into(),
                kept.iter().map(|r| r.mol_wt).collect::<Vec<f64>>(),
            )
            .into(),
            Series::new(
                FEATURE_COLUMNS[1].into(),
                kept.iter().map(|r| r.log_p).collect::<Vec<f64>>(),
            )
            .into(),
            Series::new(
                FEATURE_COLUMNS[2].into(),
                kept.iter().map(|r| r.rotatable_bonds).collect::<Vec<f64>>(),
            )
            .into(),
            Series::new(
                FEATURE_COLUMNS[3].into(),
                kept.iter().map(|r| r.h_donors).collect::<Vec<f64>>(),
            )
            .into(),
            Series::new(
                FEATURE_COLUMNS[4].into(),
                kept.iter().map(|r| r.h_acceptors).collect::<Vec<f64>>(),
            )
            .into(),
            Series::new(
                FEATURE_COLUMNS[5].into(),
                kept.iter()
                    .map(|r| r.aromatic_proportion.unwrap_or_default())
                    .collect::<Vec<f64>>(),
            )
            .into(),
        ];

        Ok(Self {
            indices,
            frame: DataFrame::new(columns)?,
        })
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Surviving original-input indices, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// The dense numeric matrix, one row per surviving index, columns in
    /// [`FEATURE_COLUMNS`] order.
    pub fn matrix(&self) -> Result<Vec<[f64; FEATURE_COUNT]>> {
        let mut columns = Vec::with_capacity(FEATURE_COUNT);
        for name in FEATURE_COLUMNS {
            columns.push(self.frame.column(name)?.f64()?);
        }

        let mut matrix = Vec::with_capacity(self.frame.height());
        for row in 0..self.frame.height() {
            let mut values = [0.0; FEATURE_COUNT];
            for (column_index, column) in columns.iter().enumerate() {
                values[column_index] = column.get(row).ok_or_else(|| {
                    PipelineError::Prediction(format!(
                        "missing value in feature column '{}' at row {row}",
                        FEATURE_COLUMNS[column_index]
                    ))
                })?;
            }
            matrix.push(values);
        }
        Ok(matrix)
    }
}
