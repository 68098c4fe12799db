use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// StudentRecord – one row of the input file
// ---------------------------------------------------------------------------

/// A single student (one element of the input JSON array).
///
/// Keys not listed here (persona descriptions and the like) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: u64,
    pub name: String,
    /// Class label ("A", "B", "C").
    pub class: String,
    /// Target variable for every correlation.
    pub assessment_score: f64,
    pub comprehension: f64,
    pub attention: f64,
    pub focus: f64,
    pub retention: f64,
    pub engagement_time: f64,
}

// ---------------------------------------------------------------------------
// NumericField – typed accessor for numeric columns
// ---------------------------------------------------------------------------

/// Every numeric column of a [`StudentRecord`], usable as a sort key or as a
/// correlation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericField {
    StudentId,
    AssessmentScore,
    Comprehension,
    Attention,
    Focus,
    Retention,
    EngagementTime,
}

impl NumericField {
    /// Predictor attributes in their canonical display order.
    pub const PREDICTORS: [NumericField; 5] = [
        NumericField::Comprehension,
        NumericField::Attention,
        NumericField::Focus,
        NumericField::Retention,
        NumericField::EngagementTime,
    ];

    /// The variable every predictor is correlated against.
    pub const TARGET: NumericField = NumericField::AssessmentScore;

    /// Extract this column's value from a record.
    pub fn value(self, record: &StudentRecord) -> f64 {
        match self {
            NumericField::StudentId => record.student_id as f64,
            NumericField::AssessmentScore => record.assessment_score,
            NumericField::Comprehension => record.comprehension,
            NumericField::Attention => record.attention,
            NumericField::Focus => record.focus,
            NumericField::Retention => record.retention,
            NumericField::EngagementTime => record.engagement_time,
        }
    }

    /// The JSON key of the column.
    pub fn key(self) -> &'static str {
        match self {
            NumericField::StudentId => "student_id",
            NumericField::AssessmentScore => "assessment_score",
            NumericField::Comprehension => "comprehension",
            NumericField::Attention => "attention",
            NumericField::Focus => "focus",
            NumericField::Retention => "retention",
            NumericField::EngagementTime => "engagement_time",
        }
    }

    /// Human-readable label for headers and chart axes.
    pub fn label(self) -> &'static str {
        match self {
            NumericField::StudentId => "ID",
            NumericField::AssessmentScore => "Score",
            NumericField::Comprehension => "Comprehension",
            NumericField::Attention => "Attention",
            NumericField::Focus => "Focus",
            NumericField::Retention => "Retention",
            NumericField::EngagementTime => "Engagement time",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// CategoryField – typed accessor for categorical columns
// ---------------------------------------------------------------------------

/// Categorical columns usable as a grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryField {
    Class,
}

impl CategoryField {
    pub fn value(self, record: &StudentRecord) -> &str {
        match self {
            CategoryField::Class => &record.class,
        }
    }
}

// ---------------------------------------------------------------------------
// StudentDataset – the complete loaded record set
// ---------------------------------------------------------------------------

/// The full loaded record set. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct StudentDataset {
    records: Vec<StudentRecord>,
}

impl StudentDataset {
    /// Wrap loaded records, rejecting duplicate `student_id`s.
    pub fn from_records(records: Vec<StudentRecord>) -> Result<Self, DataLoadError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.student_id) {
                return Err(DataLoadError::DuplicateId(record.student_id));
            }
        }
        Ok(StudentDataset { records })
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
