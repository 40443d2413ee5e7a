//! Error types for taxonomy loading and lookups.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::TaxonomyFamily;

/// Errors raised while parsing or validating a taxonomy or location table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    /// The table file could not be read.
    #[error("failed to read taxonomy file at '{path}': {message}")]
    Io {
        /// Path to the table file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The JSON is malformed or missing required fields.
    #[error("invalid taxonomy JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// The table version is not supported.
    #[error("unsupported taxonomy version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the table.
        actual: u32,
    },

    /// The table declares no categories.
    #[error("taxonomy contains no categories")]
    EmptyCategories,

    /// A category has a blank name.
    #[error("category at index {index} has an empty name")]
    EmptyCategoryName {
        /// Index of the offending category.
        index: usize,
    },

    /// Two categories share a name (compared case-insensitively).
    #[error("duplicate category '{name}'")]
    DuplicateCategory {
        /// The repeated category name.
        name: String,
    },

    /// Two states share a name (compared case-insensitively).
    #[error("duplicate state '{name}'")]
    DuplicateState {
        /// The repeated state name.
        name: String,
    },

    /// An exam-subject mapping names an exam the category does not list.
    #[error("category '{category}' maps subjects for undeclared exam '{exam}'")]
    UnknownMappedExam {
        /// Category holding the mapping.
        category: String,
        /// Exam named by the mapping.
        exam: String,
    },

    /// A category maps the same exam twice (compared case-insensitively).
    #[error("category '{category}' maps subjects for exam '{exam}' more than once")]
    DuplicateMappedExam {
        /// Category holding the mapping.
        category: String,
        /// Exam named by the repeated entry.
        exam: String,
    },

    /// A table was loaded for one family but declares another.
    #[error("expected a {expected} taxonomy, found {actual}")]
    FamilyMismatch {
        /// Family the caller asked for.
        expected: TaxonomyFamily,
        /// Family declared by the table.
        actual: TaxonomyFamily,
    },

    /// The taxonomy family name is not recognised.
    #[error("unknown taxonomy family '{value}'")]
    UnknownFamily {
        /// The unrecognised value.
        value: String,
    },
}
