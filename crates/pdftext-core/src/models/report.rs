//! Batch report returned by the converter.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A PDF that was converted and written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Source PDF.
    pub source: PathBuf,
    /// Written text file.
    pub output: PathBuf,
    /// Number of page texts merged into the output.
    pub pages: usize,
    /// Size of the written text in bytes.
    pub bytes_written: usize,
}

/// Stage at which a skipped file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Read,
    Extract,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureStage::Read => write!(f, "read"),
            FailureStage::Extract => write!(f, "extract"),
        }
    }
}

/// A PDF that was skipped under the skip-and-report policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// Source PDF.
    pub source: PathBuf,
    /// Where it failed.
    pub stage: FailureStage,
    /// Human-readable reason.
    pub message: String,
}

/// Result of one conversion batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Converted files, in discovery order.
    pub converted: Vec<FileOutcome>,
    /// Skipped files, in discovery order.
    pub failed: Vec<FileFailure>,
    /// Wall-clock duration of the batch.
    pub elapsed: Duration,
}

impl BatchReport {
    /// Number of PDFs the batch looked at.
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    /// True when no file was skipped.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_success() {
        let report = BatchReport::default();
        assert_eq!(report.total(), 0);
        assert!(report.is_success());
    }

    #[test]
    fn test_report_with_failure() {
        let report = BatchReport {
            converted: vec![FileOutcome {
                source: PathBuf::from("in/a.pdf"),
                output: PathBuf::from("out/a.txt"),
                pages: 2,
                bytes_written: 10,
            }],
            failed: vec![FileFailure {
                source: PathBuf::from("in/b.pdf"),
                stage: FailureStage::Extract,
                message: "PDF is encrypted".to_string(),
            }],
            elapsed: Duration::from_millis(5),
        };

        assert_eq!(report.total(), 2);
        assert!(!report.is_success());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failed"][0]["stage"], "extract");
    }
}
