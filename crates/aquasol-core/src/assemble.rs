use serde_json::{Map, Number, Value};

use crate::error::{PipelineError, Result};
use crate::input::InputTable;

/// Field name the prediction is published under.
pub const PREDICTION_COLUMN: &str = "Predicted_log_solubility_mol_per_L";

/// Joins predictions back onto the original input rows. Each output object
/// carries every input column verbatim plus the prediction; only surviving
/// indices appear, in ascending order.
pub fn assemble_results(
    table: &InputTable,
    indices: &[usize],
    predictions: &[f64],
) -> Result<Vec<Value>> {
    if indices.len() != predictions.len() {
        return Err(PipelineError::Prediction(format!(
            "{} predictions for {} surviving rows",
            predictions.len(),
            indices.len()
        )));
    }

    let mut results = Vec::with_capacity(indices.len());
    for (&index, &prediction) in indices.iter().zip(predictions) {
        let record = table.row(index);
        let mut object = Map::new();
        for (header, field) in table.headers().iter().zip(record.iter()) {
            object.insert(header.clone(), Value::String(field.to_string()));
        }
        object.insert(PREDICTION_COLUMN.to_string(), render_prediction(prediction)?);
        results.push(Value::Object(object));
    }
    Ok(results)
}

/// Renders a prediction as a JSON number with six fractional digits of
/// precision.
fn render_prediction(value: f64) -> Result<Value> {
    if !value.is_finite() {
        return Err(PipelineError::Prediction(
            "model produced a non-finite prediction".to_string(),
        ));
    }
    let rounded = format!("{value:.6}");
    let number: Number = serde_json::from_str(&rounded).map_err(|err| {
        PipelineError::Prediction(format!("failed to render prediction '{rounded}': {err}"))
    })?;
    Ok(Value::Number(number))
}
