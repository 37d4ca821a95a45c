use aquasol_chem::{descriptors, parse_smiles};

use crate::error::{PipelineError, Result};
use crate::events::{EventSink, PipelineEvent, RowSkip};
use crate::input::InputTable;

/// One row's descriptor record, tagged with the original input index so the
/// alignment between inputs and predictions stays explicit through every
/// later stage.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorRow {
    pub index: usize,
    pub mol_wt: f64,
    pub log_p: f64,
    pub rotatable_bonds: f64,
    pub h_donors: f64,
    pub h_acceptors: f64,
    pub aromatic_proportion: Option<f64>,
}

impl DescriptorRow {
    /// True when every field holds a usable (finite) value.
    pub fn is_complete(&self) -> bool {
        self.mol_wt.is_finite()
            && self.log_p.is_finite()
            && self.rotatable_bonds.is_finite()
            && self.h_donors.is_finite()
            && self.h_acceptors.is_finite()
            && self.aromatic_proportion.is_some_and(f64::is_finite)
    }
}

/// Computes a descriptor record per input row. Rows that are empty or fail
/// to parse are skipped with a diagnostic event; a failed field computation
/// leaves the field missing without dropping the row here. Errors only when
/// no row at all survives.
pub fn extract_descriptors(
    table: &InputTable,
    sink: &dyn EventSink,
) -> Result<Vec<DescriptorRow>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, raw) in table.smiles_iter().enumerate() {
        let smiles = raw.trim();
        if smiles.is_empty() {
            skipped += 1;
            sink.emit(PipelineEvent::RowSkipped {
                index,
                reason: RowSkip::EmptyStructure,
            });
            continue;
        }

        let molecule = match parse_smiles(smiles) {
            Ok(molecule) => molecule,
            Err(err) => {
                skipped += 1;
                sink.emit(PipelineEvent::RowSkipped {
                    index,
                    reason: RowSkip::ParseFailure {
                        message: err.to_string(),
                    },
                });
                continue;
            }
        };

        let values = descriptors(&molecule);
        records.push(DescriptorRow {
            index,
            mol_wt: values.mol_wt,
            log_p: values.log_p,
            rotatable_bonds: values.rotatable_bonds,
            h_donors: values.h_donors,
            h_acceptors: values.h_acceptors,
            aromatic_proportion: values.aromatic_proportion,
        });
    }

    if records.is_empty() {
        return Err(PipelineError::NoValidInput(
            "no valid SMILES strings found in input".to_string(),
        ));
    }

    sink.emit(PipelineEvent::ExtractionFinished {
        kept: records.len(),
        skipped,
    });

    Ok(records)
}
