use std::io::Cursor;

use aquasol_core::input::{InputTable, SMILES_COLUMN};
use aquasol_core::PipelineError;

#[test]
fn reads_table_with_passthrough_columns() {
    let csv = "Name,SMILES,Batch\nethanol,CCO,b1\nbenzene,c1ccccc1,b2\n";
    let table = InputTable::from_reader(Cursor::new(csv)).expect("read failed");

    assert_eq!(table.len(), 2);
    assert_eq!(table.headers(), ["Name", "SMILES", "Batch"]);
    assert_eq!(table.smiles(0), "CCO");
    assert_eq!(table.smiles(1), "c1ccccc1");
    assert_eq!(table.row(1).get(2), Some("b2"));
}

#[test]
fn rejects_table_without_smiles_column() {
    let csv = "Name,Structure\nethanol,CCO\n";
    let err = InputTable::from_reader(Cursor::new(csv)).unwrap_err();
    assert!(matches!(err, PipelineError::Validation(_)));
    assert_eq!(err.kind(), "ValidationError");
    assert!(err.to_string().contains(SMILES_COLUMN));
}

#[test]
fn rejects_header_only_table() {
    let csv = "SMILES,Name\n";
    let err = InputTable::from_reader(Cursor::new(csv)).unwrap_err();
    assert!(matches!(err, PipelineError::Validation(_)));
    assert_eq!(err.kind(), "ValidationError");
}

#[test]
fn rejects_empty_input() {
    let err = InputTable::from_reader(Cursor::new("")).unwrap_err();
    assert_eq!(err.kind(), "ValidationError");
}

#[test]
fn ragged_rows_are_a_validation_failure() {
    let csv = "SMILES,Name\nCCO,ethanol,extra,fields\n";
    let err = InputTable::from_reader(Cursor::new(csv)).unwrap_err();
    assert!(matches!(err, PipelineError::Csv(_)));
    assert_eq!(err.kind(), "ValidationError");
}

#[test]
fn missing_file_reports_its_path() {
    let err = InputTable::read(std::path::Path::new("/no/such/input.csv")).unwrap_err();
    assert!(matches!(err, PipelineError::InputNotFound(_)));
    assert_eq!(err.kind(), "FileNotFoundError");
    assert!(err.to_string().contains("input.csv"));
}
