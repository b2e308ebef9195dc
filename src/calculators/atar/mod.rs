//! Score scaling, aggregation, and rank conversion.
//!
//! Raw subject marks are scaled through per-subject empirical curves, the
//! best-scaled subjects are aggregated up to a fixed credit budget, and the
//! aggregate is converted to a final rank through a second curve. Both curves
//! are piecewise-linear lookups over read-only tables supplied by the caller.

mod scaling;
mod tables;

pub use tables::{ConversionRow, ConversionTable, ScalingRow, ScalingTable, TableError};

use serde::{Deserialize, Serialize};

/// Credit-weight budget the aggregate draws on. The best-scoring subjects
/// fill it first; the last subject counted may be taken partially.
pub const AGGREGATE_UNIT_BUDGET: f64 = 10.0;

/// One completed subject with its raw portal-scale mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectScore {
    pub code: String,
    pub name: String,
    pub units: u8,
    pub raw_mark: f64,
}

/// Rejection of a malformed score list.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("raw mark for subject '{code}' must be a finite number")]
    NonFiniteMark { code: String },
}

/// A subject after scaling, with the credit actually counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledSubject {
    pub code: String,
    pub name: String,
    pub scaled_mark: f64,
    pub units_taken: f64,
}

/// Scaled marks for every supplied subject plus the credit-bounded aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateOutcome {
    pub aggregate: f64,
    pub subjects: Vec<ScaledSubject>,
}

/// Scale every subject and aggregate the best of them under the unit budget.
///
/// A subject with no rows in the scaling table scales to 0: missing reference
/// data degrades that subject, it does not fail the whole computation. Ties
/// in scaled mark keep the caller's input order.
pub fn scale_and_aggregate(
    entries: &[SubjectScore],
    table: &ScalingTable,
) -> Result<AggregateOutcome, ScoreError> {
    for entry in entries {
        if !entry.raw_mark.is_finite() {
            return Err(ScoreError::NonFiniteMark {
                code: entry.code.clone(),
            });
        }
    }

    let mut subjects: Vec<ScaledSubject> = entries
        .iter()
        .map(|entry| ScaledSubject {
            code: entry.code.clone(),
            name: entry.name.clone(),
            scaled_mark: scale_subject(entry, table),
            units_taken: 0.0,
        })
        .collect();

    let mut order: Vec<usize> = (0..subjects.len()).collect();
    order.sort_by(|&a, &b| subjects[b].scaled_mark.total_cmp(&subjects[a].scaled_mark));

    let mut remaining = AGGREGATE_UNIT_BUDGET;
    let mut aggregate = 0.0;
    for index in order {
        if remaining <= 0.0 {
            break;
        }
        let units = f64::from(entries[index].units);
        let taken = units.min(remaining);
        subjects[index].units_taken = taken;
        aggregate += subjects[index].scaled_mark * taken;
        remaining -= taken;
    }

    // Present subjects best-first, matching the consumption order.
    subjects.sort_by(|a, b| b.scaled_mark.total_cmp(&a.scaled_mark));

    Ok(AggregateOutcome {
        aggregate,
        subjects,
    })
}

fn scale_subject(entry: &SubjectScore, table: &ScalingTable) -> f64 {
    match table.rows_for(&entry.code) {
        Some(rows) if !rows.is_empty() => {
            let points: Vec<(f64, f64)> = rows
                .iter()
                .map(|row| (row.percentile, row.scaled_mark))
                .collect();
            scaling::piecewise_linear(&points, entry.raw_mark)
        }
        _ => 0.0,
    }
}

/// Convert an aggregate to the final rank, rounded to one decimal place.
pub fn convert_to_rank(aggregate: f64, table: &ConversionTable) -> f64 {
    let points: Vec<(f64, f64)> = table
        .rows()
        .iter()
        .map(|row| (row.aggregate, row.rank))
        .collect();
    let rank = scaling::piecewise_linear(&points, aggregate);
    (rank * 10.0).round() / 10.0
}
