use std::io::Cursor;

use aquasol_core::assemble::{assemble_results, PREDICTION_COLUMN};
use aquasol_core::input::InputTable;
use aquasol_core::PipelineError;
use serde_json::json;

fn table() -> InputTable {
    let csv = "Name,SMILES\nethanol,CCO\nblank,\nbenzene,c1ccccc1\n";
    InputTable::from_reader(Cursor::new(csv)).expect("fixture table read failed")
}

#[test]
fn restricts_output_to_surviving_indices() {
    let results = assemble_results(&table(), &[0, 2], &[-0.5, 1.25]).expect("assemble failed");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["Name"], json!("ethanol"));
    assert_eq!(results[0]["SMILES"], json!("CCO"));
    assert_eq!(results[0][PREDICTION_COLUMN], json!(-0.5));
    assert_eq!(results[1]["Name"], json!("benzene"));
    assert_eq!(results[1][PREDICTION_COLUMN], json!(1.25));
}

#[test]
fn predictions_are_rounded_to_six_fractional_digits() {
    let results =
        assemble_results(&table(), &[0], &[-0.774_099_912_34]).expect("assemble failed");
    assert_eq!(results[0][PREDICTION_COLUMN], json!(-0.7741));

    let results = assemble_results(&table(), &[0], &[1.0 / 3.0]).expect("assemble failed");
    assert_eq!(results[0][PREDICTION_COLUMN], json!(0.333333));
}

#[test]
fn count_mismatch_is_a_prediction_error() {
    let err = assemble_results(&table(), &[0, 2], &[1.0]).unwrap_err();
    assert!(matches!(err, PipelineError::Prediction(_)));
    assert_eq!(err.kind(), "PredictionError");
}

#[test]
fn non_finite_prediction_is_rejected() {
    let err = assemble_results(&table(), &[0], &[f64::NAN]).unwrap_err();
    assert_eq!(err.kind(), "PredictionError");
}
