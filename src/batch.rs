//! CSV batch input and parallel evaluation of assessment records.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::Path;

use crate::engine::{evaluate, Assessment, AssessmentResult, EngineError};

/// Reads assessment records from a CSV file with one record per row and a
/// header row naming the input fields.
pub fn read_assessments_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Assessment>> {
    let mut reader = csv::Reader::from_path(&path)
        .with_context(|| format!("failed to open batch file {}", path.as_ref().display()))?;
    let mut cases = Vec::new();
    for (row, record) in reader.deserialize().enumerate() {
        let case: Assessment =
            record.with_context(|| format!("failed to parse batch record {}", row))?;
        cases.push(case);
    }
    Ok(cases)
}

/// Evaluates every record independently.
///
/// Evaluations share no state, so the batch runs in parallel; a failing
/// record stays a per-row failure and never aborts the rest of the batch.
pub fn evaluate_batch(cases: &[Assessment]) -> Vec<Result<AssessmentResult, EngineError>> {
    cases.par_iter().map(evaluate).collect()
}
