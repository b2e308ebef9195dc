//! Reference tables for the score pipeline, validated at construction so the
//! interpolator can assume strictly increasing, finite rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One empirical (raw percentile, scaled mark) point for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingRow {
    pub percentile: f64,
    pub scaled_mark: f64,
}

/// One (aggregate, rank) point of the final conversion curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRow {
    pub aggregate: f64,
    pub rank: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("scaling rows for subject '{subject}' contain a non-finite value")]
    NonFiniteScalingRow { subject: String },
    #[error("scaling rows for subject '{subject}' must be strictly increasing by percentile")]
    UnsortedScalingRows { subject: String },
    #[error("conversion rows contain a non-finite value")]
    NonFiniteConversionRow,
    #[error("conversion rows must be strictly increasing by aggregate")]
    UnsortedConversionRows,
}

#[derive(Debug, Clone, Deserialize)]
struct ScalingTableData {
    subjects: BTreeMap<String, Vec<ScalingRow>>,
}

/// Per-subject scaling curves for one scoring year. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalingTableData")]
pub struct ScalingTable {
    subjects: BTreeMap<String, Vec<ScalingRow>>,
}

impl ScalingTable {
    pub fn new(subjects: BTreeMap<String, Vec<ScalingRow>>) -> Result<Self, TableError> {
        for (subject, rows) in &subjects {
            let mut previous: Option<f64> = None;
            for row in rows {
                if !row.percentile.is_finite() || !row.scaled_mark.is_finite() {
                    return Err(TableError::NonFiniteScalingRow {
                        subject: subject.clone(),
                    });
                }
                if previous.is_some_and(|p| row.percentile <= p) {
                    return Err(TableError::UnsortedScalingRows {
                        subject: subject.clone(),
                    });
                }
                previous = Some(row.percentile);
            }
        }
        Ok(Self { subjects })
    }

    /// Scaling curve for a subject; `None` when the subject has no data.
    pub fn rows_for(&self, subject_code: &str) -> Option<&[ScalingRow]> {
        self.subjects.get(subject_code).map(Vec::as_slice)
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }
}

impl TryFrom<ScalingTableData> for ScalingTable {
    type Error = TableError;

    fn try_from(data: ScalingTableData) -> Result<Self, Self::Error> {
        Self::new(data.subjects)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ConversionTableData {
    rows: Vec<ConversionRow>,
}

/// Aggregate-to-rank conversion curve. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConversionTableData")]
pub struct ConversionTable {
    rows: Vec<ConversionRow>,
}

impl ConversionTable {
    pub fn new(rows: Vec<ConversionRow>) -> Result<Self, TableError> {
        let mut previous: Option<f64> = None;
        for row in &rows {
            if !row.aggregate.is_finite() || !row.rank.is_finite() {
                return Err(TableError::NonFiniteConversionRow);
            }
            if previous.is_some_and(|p| row.aggregate <= p) {
                return Err(TableError::UnsortedConversionRows);
            }
            previous = Some(row.aggregate);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ConversionRow] {
        &self.rows
    }
}

impl TryFrom<ConversionTableData> for ConversionTable {
    type Error = TableError;

    fn try_from(data: ConversionTableData) -> Result<Self, Self::Error> {
        Self::new(data.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(points: &[(f64, f64)]) -> Vec<ScalingRow> {
        points
            .iter()
            .map(|&(percentile, scaled_mark)| ScalingRow {
                percentile,
                scaled_mark,
            })
            .collect()
    }

    #[test]
    fn sorted_scaling_rows_are_accepted() {
        let mut subjects = BTreeMap::new();
        subjects.insert("MATH".to_string(), rows(&[(40.0, 30.0), (60.0, 40.0)]));

        let table = ScalingTable::new(subjects).expect("valid table");
        assert_eq!(table.subject_count(), 1);
        assert_eq!(table.rows_for("MATH").map(<[_]>::len), Some(2));
        assert!(table.rows_for("CHEM").is_none());
    }

    #[test]
    fn duplicate_percentiles_are_rejected() {
        let mut subjects = BTreeMap::new();
        subjects.insert("MATH".to_string(), rows(&[(40.0, 30.0), (40.0, 35.0)]));

        assert!(matches!(
            ScalingTable::new(subjects),
            Err(TableError::UnsortedScalingRows { .. })
        ));
    }

    #[test]
    fn descending_percentiles_are_rejected() {
        let mut subjects = BTreeMap::new();
        subjects.insert("MATH".to_string(), rows(&[(60.0, 40.0), (40.0, 30.0)]));

        assert!(matches!(
            ScalingTable::new(subjects),
            Err(TableError::UnsortedScalingRows { .. })
        ));
    }

    #[test]
    fn non_finite_scaling_values_are_rejected() {
        let mut subjects = BTreeMap::new();
        subjects.insert("MATH".to_string(), rows(&[(40.0, f64::NAN)]));

        assert!(matches!(
            ScalingTable::new(subjects),
            Err(TableError::NonFiniteScalingRow { .. })
        ));
    }

    #[test]
    fn conversion_rows_must_increase() {
        let rows = vec![
            ConversionRow {
                aggregate: 100.0,
                rank: 50.0,
            },
            ConversionRow {
                aggregate: 90.0,
                rank: 40.0,
            },
        ];

        assert!(matches!(
            ConversionTable::new(rows),
            Err(TableError::UnsortedConversionRows)
        ));
    }

    #[test]
    fn malformed_json_table_is_rejected_at_deserialization() {
        let raw = r#"{"subjects":{"MATH":[
            {"percentile":60.0,"scaled_mark":40.0},
            {"percentile":40.0,"scaled_mark":30.0}
        ]}}"#;

        let result: Result<ScalingTable, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }
}
