use std::sync::Mutex;

use tracing::{info, warn};

/// Why a row was skipped during descriptor extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSkip {
    EmptyStructure,
    ParseFailure { message: String },
}

/// Diagnostics emitted while a batch runs. None of these affect control
/// flow; they exist so operators can tell "bad structure" drops apart from
/// "bad descriptor value" drops.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    InputLoaded { rows: usize },
    RowSkipped { index: usize, reason: RowSkip },
    ExtractionFinished { kept: usize, skipped: usize },
    MissingValuesDropped { dropped: usize, remaining: usize },
    PredictionsProduced { rows: usize },
}

/// Sink for pipeline diagnostics, injected so tests can observe events
/// without capturing global logger output.
pub trait EventSink {
    fn emit(&self, event: PipelineEvent);
}

/// Default sink: forwards events to `tracing`.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::InputLoaded { rows } => info!(rows, "loaded input table"),
            PipelineEvent::RowSkipped {
                index,
                reason: RowSkip::EmptyStructure,
            } => warn!(index, "empty SMILES, row skipped"),
            PipelineEvent::RowSkipped {
                index,
                reason: RowSkip::ParseFailure { message },
            } => warn!(index, %message, "invalid SMILES, row skipped"),
            PipelineEvent::ExtractionFinished { kept, skipped } => {
                info!(kept, skipped, "computed molecular descriptors")
            }
            PipelineEvent::MissingValuesDropped { dropped, remaining } => {
                if dropped > 0 {
                    info!(dropped, remaining, "removed rows with missing descriptor values")
                }
            }
            PipelineEvent::PredictionsProduced { rows } => {
                info!(rows, "assembled predictions")
            }
        }
    }
}

/// Test sink that records every event it sees.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().expect("event lock poisoned").clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: PipelineEvent) {
        self.events.lock().expect("event lock poisoned").push(event);
    }
}
