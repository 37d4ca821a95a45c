use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::features::FEATURE_COUNT;

pub const SCALER_FILE: &str = "scaler.json";
pub const MODEL_FILE: &str = "random_forest_model.json";

/// Capability seam for the feature-scaling artifact: the pipeline only ever
/// sees `transform`.
pub trait FeatureScaler {
    fn transform(&self, matrix: Vec<[f64; FEATURE_COUNT]>) -> Result<Vec<[f64; FEATURE_COUNT]>>;
}

/// Capability seam for the predictive artifact.
pub trait Regressor {
    fn predict(&self, matrix: &[[f64; FEATURE_COUNT]]) -> Result<Vec<f64>>;
}

/// Column-wise standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, mut matrix: Vec<[f64; FEATURE_COUNT]>) -> Result<Vec<[f64; FEATURE_COUNT]>> {
        for row in &mut matrix {
            for (column, value) in row.iter_mut().enumerate() {
                *value = (*value - self.mean[column]) / self.scale[column];
            }
        }
        Ok(matrix)
    }
}

/// One regression tree in the flattened node-array form the training side
/// exports: node `i` splits on `feature[i]` at `threshold[i]` unless
/// `children_left[i]` is -1, in which case `value[i]` is the leaf output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.value.len()
    }

    fn predict_row(&self, row: &[f64; FEATURE_COUNT]) -> Result<f64> {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left < 0 {
                return Ok(self.value[node]);
            }

            let feature = self.feature[node];
            let column = usize::try_from(feature).ok().filter(|&f| f < FEATURE_COUNT);
            let column = column.ok_or_else(|| {
                PipelineError::Prediction(format!(
                    "tree node {node} references feature index {feature} out of range"
                ))
            })?;

            let next = if row[column] <= self.threshold[node] {
                left
            } else {
                self.children_right[node]
            };
            node = usize::try_from(next)
                .ok()
                .filter(|&n| n < self.node_count())
                .ok_or_else(|| {
                    PipelineError::Prediction(format!(
                        "tree node {node} references child {next} out of range"
                    ))
                })?;
        }
    }
}

/// Random-forest regressor: the mean over its trees' outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl Regressor for RandomForest {
    fn predict(&self, matrix: &[[f64; FEATURE_COUNT]]) -> Result<Vec<f64>> {
        let mut predictions = Vec::with_capacity(matrix.len());
        for row in matrix {
            let mut sum = 0.0;
            for tree in &self.trees {
                sum += tree.predict_row(row)?;
            }
            predictions.push(sum / self.trees.len() as f64);
        }
        Ok(predictions)
    }
}

/// Loads and validates both model artifacts from a directory. Absence and
/// deserialization failures are distinct fatal errors.
pub fn load_artifacts(dir: &Path) -> Result<(StandardScaler, RandomForest)> {
    let scaler: StandardScaler = read_artifact(&dir.join(SCALER_FILE))?;
    validate_scaler(&scaler)?;

    let forest: RandomForest = read_artifact(&dir.join(MODEL_FILE))?;
    validate_forest(&forest)?;

    Ok((scaler, forest))
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(PipelineError::ArtifactNotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|err| PipelineError::ArtifactLoad {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

fn validate_scaler(scaler: &StandardScaler) -> Result<()> {
    if scaler.mean.len() != FEATURE_COUNT || scaler.scale.len() != FEATURE_COUNT {
        return Err(PipelineError::ArtifactLoad {
            path: SCALER_FILE.to_string(),
            message: format!(
                "expected {FEATURE_COUNT} feature columns, found mean={} scale={}",
                scaler.mean.len(),
                scaler.scale.len()
            ),
        });
    }
    if scaler.scale.iter().any(|&s| s == 0.0 || !s.is_finite()) {
        return Err(PipelineError::ArtifactLoad {
            path: SCALER_FILE.to_string(),
            message: "scale entries must be finite and non-zero".to_string(),
        });
    }
    Ok(())
}

fn validate_forest(forest: &RandomForest) -> Result<()> {
    if forest.trees.is_empty() {
        return Err(PipelineError::ArtifactLoad {
            path: MODEL_FILE.to_string(),
            message: "forest contains no trees".to_string(),
        });
    }
    for (index, tree) in forest.trees.iter().enumerate() {
        let nodes = tree.node_count();
        if nodes == 0 {
            return Err(PipelineError::ArtifactLoad {
                path: MODEL_FILE.to_string(),
                message: format!("tree {index} has no nodes"),
            });
        }
        if tree.children_left.len() != nodes
            || tree.children_right.len() != nodes
            || tree.feature.len() != nodes
            || tree.threshold.len() != nodes
        {
            return Err(PipelineError::ArtifactLoad {
                path: MODEL_FILE.to_string(),
                message: format!("tree {index} has inconsistent node arrays"),
            });
        }
    }
    Ok(())
}
