//! Data validation utilities.
//!
//! Validation keeps going after a bad file so one run reports every
//! problem in the directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use catalog_core::classify::Classifier;
use catalog_core::error::{json_kind, Result};
use serde::Serialize;
use serde_json::Value;

use crate::loader::{data_files, load_units_file};

/// Units found in one data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// File path.
    pub path: PathBuf,
    /// Number of unit records in the file.
    pub units: usize,
}

/// Outcome of validating a data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Files that loaded.
    pub files: Vec<FileReport>,
    /// Human-readable problems, in discovery order.
    pub problems: Vec<String>,
}

impl ValidationReport {
    /// Whether no problems were found.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }

    /// Total units across loaded files.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.files.iter().map(|f| f.units).sum()
    }

    fn problem(&mut self, message: String) {
        tracing::warn!("{message}");
        self.problems.push(message);
    }
}

/// Validate all unit data files in a directory.
///
/// Reports unparseable files, non-mapping records and ids defined in more
/// than one place.
///
/// # Errors
///
/// Returns an error only if the directory itself cannot be listed.
pub fn validate_data_directory(path: &Path) -> Result<ValidationReport> {
    let classifier = Classifier::default();
    let mut report = ValidationReport::default();
    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();

    for file in data_files(path)? {
        let raw = match load_units_file(&file) {
            Ok(raw) => raw,
            Err(e) => {
                report.problem(e.to_string());
                continue;
            }
        };
        let Value::Object(records) = &raw else {
            report.problem(format!(
                "{}: expected a mapping of unit ids, found {}",
                file.display(),
                json_kind(&raw)
            ));
            continue;
        };

        for (id, record) in records {
            if let Err(e) = classifier.classify(id, record) {
                report.problem(format!("{}: {e}", file.display()));
            }
            if let Some(first) = seen.get(id) {
                report.problem(format!(
                    "{}: unit '{id}' already defined in {}",
                    file.display(),
                    first.display()
                ));
            } else {
                seen.insert(id.clone(), file.clone());
            }
        }

        tracing::debug!(file = %file.display(), units = records.len(), "validated");
        report.files.push(FileReport {
            path: file,
            units: records.len(),
        });
    }

    Ok(report)
}
