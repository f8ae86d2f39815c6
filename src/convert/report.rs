//! Conversion report with per-shape statistics.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::ProblemShape;

/// Outcome of a course conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Chapter output directory
    pub output_dir: PathBuf,

    /// Assessment title (chapter display name)
    pub title: String,

    /// Problems written, in conversion order
    pub converted: Vec<ConvertedProblem>,

    /// Problems left out, with reasons
    pub skipped: Vec<SkippedProblem>,

    /// Aggregate counts
    pub stats: ConversionStats,
}

/// A problem that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedProblem {
    /// Question id, `chapter_<n>/<folder>`
    pub id: String,
    /// Source problem file
    pub source: PathBuf,
    pub shape: ProblemShape,
}

/// A problem that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedProblem {
    /// Source problem file
    pub source: PathBuf,
    /// Error message
    pub reason: String,
}

impl ConversionReport {
    /// Create an empty report for an output directory.
    pub fn new(output_dir: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Record a written problem.
    pub fn add_converted(&mut self, id: String, source: PathBuf, shape: ProblemShape) {
        self.stats.add_shape(shape);
        self.converted.push(ConvertedProblem { id, source, shape });
    }

    /// Record a skipped problem.
    pub fn add_skipped(&mut self, source: PathBuf, reason: String) {
        self.stats.skipped += 1;
        self.skipped.push(SkippedProblem { source, reason });
    }

    /// Whether every problem was converted.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Statistics collected during a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Single/multi choice problems
    pub multiple_choice: u32,

    /// Checkbox problems
    pub checkbox: u32,

    /// Single numeric problems
    pub single_numeric: u32,

    /// Multi-numeric problems with one list per input
    pub numeric_with_lists: u32,

    /// Multi-numeric problems with interleaved prompts
    pub numeric_freeform: u32,

    /// Problems not converted
    pub skipped: u32,

    /// Zones written to the manifest
    pub zones: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one converted problem of the given shape.
    pub fn add_shape(&mut self, shape: ProblemShape) {
        match shape {
            ProblemShape::SingleOrMultiChoice => self.multiple_choice += 1,
            ProblemShape::Checkbox => self.checkbox += 1,
            ProblemShape::SingleNumeric => self.single_numeric += 1,
            ProblemShape::MultiNumericWithLists => self.numeric_with_lists += 1,
            ProblemShape::MultiNumericFreeform => self.numeric_freeform += 1,
            ProblemShape::Unrecognized => self.skipped += 1,
        }
    }

    /// Number of problems written.
    pub fn converted(&self) -> u32 {
        self.multiple_choice
            + self.checkbox
            + self.single_numeric
            + self.numeric_with_lists
            + self.numeric_freeform
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ConversionStats) {
        self.multiple_choice += other.multiple_choice;
        self.checkbox += other.checkbox;
        self.single_numeric += other.single_numeric;
        self.numeric_with_lists += other.numeric_with_lists;
        self.numeric_freeform += other.numeric_freeform;
        self.skipped += other.skipped;
        self.zones += other.zones;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_add_shape() {
        let mut stats = ConversionStats::new();
        stats.add_shape(ProblemShape::Checkbox);
        stats.add_shape(ProblemShape::Checkbox);
        stats.add_shape(ProblemShape::MultiNumericFreeform);

        assert_eq!(stats.checkbox, 2);
        assert_eq!(stats.numeric_freeform, 1);
        assert_eq!(stats.converted(), 3);
    }

    #[test]
    fn test_stats_merge() {
        let mut stats1 = ConversionStats {
            single_numeric: 5,
            zones: 2,
            ..Default::default()
        };
        let stats2 = ConversionStats {
            single_numeric: 3,
            skipped: 1,
            zones: 1,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.single_numeric, 8);
        assert_eq!(stats1.skipped, 1);
        assert_eq!(stats1.zones, 3);
    }

    #[test]
    fn test_report_records_outcomes() {
        let mut report = ConversionReport::new("out/chapter_1", "Chapter 1");
        report.add_converted(
            "chapter_1/a".into(),
            "problem/a.xml".into(),
            ProblemShape::SingleNumeric,
        );
        assert!(report.is_clean());

        report.add_skipped("problem/b.xml".into(), "Ambiguous problem shape".into());
        assert!(!report.is_clean());
        assert_eq!(report.stats.converted(), 1);
        assert_eq!(report.stats.skipped, 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["converted"][0]["shape"], "single-numeric");
        assert_eq!(json["skipped"][0]["source"], "problem/b.xml");
    }
}
