//! Searchable facets of a listing and the filter evaluated against them.

use serde::{Deserialize, Serialize};

use crate::domain::{Owner, Principal};

/// The parts of a listing that list endpoints filter on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    /// Categories the listing belongs to.
    pub categories: Vec<String>,
    /// Exams taught, prepared for, or required.
    pub exams: Vec<String>,
    /// Subjects taught or wanted.
    pub subjects: Vec<String>,
    /// State, if given.
    pub state: Option<String>,
    /// City, if given.
    pub city: Option<String>,
}

/// Criteria for list queries. Unset criteria match everything.
///
/// # Examples
/// ```
/// use marketplace::domain::{Facets, ListingFilter};
///
/// let facets = Facets {
///     subjects: vec!["Physics".to_owned()],
///     ..Facets::default()
/// };
/// let filter = ListingFilter {
///     subject: Some("physics".to_owned()),
///     ..ListingFilter::default()
/// };
/// assert!(filter.matches_facets(&facets));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Required category.
    pub category: Option<String>,
    /// Required exam.
    pub exam: Option<String>,
    /// Required subject.
    pub subject: Option<String>,
    /// Required state.
    pub state: Option<String>,
    /// Required city.
    pub city: Option<String>,
    /// Only listings this principal may edit as owner.
    pub owned_by: Option<Principal>,
}

fn wanted(criterion: Option<&String>) -> Option<&str> {
    criterion.map(|value| value.trim()).filter(|value| !value.is_empty())
}

fn list_has(values: &[String], criterion: Option<&String>) -> bool {
    wanted(criterion).is_none_or(|needle| {
        values
            .iter()
            .any(|value| value.eq_ignore_ascii_case(needle))
    })
}

fn field_is(value: Option<&String>, criterion: Option<&String>) -> bool {
    wanted(criterion).is_none_or(|needle| {
        value.is_some_and(|actual| actual.trim().eq_ignore_ascii_case(needle))
    })
}

impl ListingFilter {
    /// Whether no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate the facet criteria only.
    #[must_use]
    pub fn matches_facets(&self, facets: &Facets) -> bool {
        list_has(&facets.categories, self.category.as_ref())
            && list_has(&facets.exams, self.exam.as_ref())
            && list_has(&facets.subjects, self.subject.as_ref())
            && field_is(facets.state.as_ref(), self.state.as_ref())
            && field_is(facets.city.as_ref(), self.city.as_ref())
    }

    /// Evaluate every criterion.
    #[must_use]
    pub fn matches(&self, facets: &Facets, owner: &Owner) -> bool {
        self.owned_by
            .as_ref()
            .is_none_or(|principal| owner.is_held_by(principal))
            && self.matches_facets(facets)
    }
}
