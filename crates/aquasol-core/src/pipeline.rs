use std::path::Path;

use serde_json::Value;

use crate::artifacts::{load_artifacts, FeatureScaler, Regressor};
use crate::assemble::assemble_results;
use crate::error::{PipelineError, Result};
use crate::events::{EventSink, PipelineEvent};
use crate::extract::extract_descriptors;
use crate::features::FeatureTable;
use crate::input::InputTable;

/// Runs one batch: read and validate the input table, extract descriptors,
/// assemble the feature table, apply scaler and model, and join the
/// predictions back onto the surviving input rows.
///
/// Every fatal condition surfaces as a single typed error; the caller turns
/// it into the terminal envelope.
pub fn run(input_path: &Path, model_dir: &Path, sink: &dyn EventSink) -> Result<Vec<Value>> {
    let table = InputTable::read(input_path)?;
    sink.emit(PipelineEvent::InputLoaded { rows: table.len() });

    let records = extract_descriptors(&table, sink)?;
    let features = FeatureTable::from_rows(records, sink)?;

    let (scaler, forest) = load_artifacts(model_dir)?;
    let matrix = features.matrix()?;
    let scaled = scaler.transform(matrix)?;
    let predictions = forest.predict(&scaled)?;

    if predictions.len() != features.len() {
        return Err(PipelineError::Prediction(format!(
            "model returned {} predictions for {} rows",
            predictions.len(),
            features.len()
        )));
    }

    let results = assemble_results(&table, features.indices(), &predictions)?;
    sink.emit(PipelineEvent::PredictionsProduced {
        rows: results.len(),
    });
    Ok(results)
}
