//! Category, exam and subject taxonomy for the education marketplace.
//!
//! Registration forms and the vacancy filter drive their dependent dropdowns
//! from two static tables: one for individual teachers and one for coaching
//! institutes. Each table maps a category to the exams it prepares for and,
//! per exam, the subjects taught for it. This crate owns those tables, the
//! bundled location directory, and the pure selection rules that keep a
//! category/exam/subject choice consistent.
//!
//! The crate has no knowledge of the backend's domain types so it can be
//! reused by tooling and tests without pulling in the web stack.
//!
//! # Example
//!
//! ```
//! use taxonomy::{Selection, SelectionAction, Taxonomy, TaxonomyFamily};
//!
//! let taxonomy = Taxonomy::builtin(TaxonomyFamily::Teaching);
//! let selection = Selection::default()
//!     .apply(taxonomy, SelectionAction::SelectCategory("Science".to_owned()))
//!     .apply(taxonomy, SelectionAction::SelectExam("NEET".to_owned()))
//!     .apply(taxonomy, SelectionAction::SelectSubject("Biology".to_owned()));
//!
//! assert_eq!(selection.subjects, vec!["Biology".to_owned()]);
//!
//! let cleared = selection.apply(taxonomy, SelectionAction::DeselectExam("NEET".to_owned()));
//! assert!(cleared.subjects.is_empty());
//! ```

mod cascade;
mod catalog;
mod error;
mod locations;

pub use cascade::{CascadeView, Selection, SelectionAction};
pub use catalog::{Category, ExamSubjects, Taxonomy, TaxonomyFamily};
pub use error::TaxonomyError;
pub use locations::{LocationDirectory, StateCities};
