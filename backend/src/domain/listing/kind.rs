//! The seven listing kinds and their URL/storage spellings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::facets::Facets;
use super::profiles::{
    CoachingProfile, NonTeacherProfile, NormalizedBody, ParentProfile, SchoolProfile,
    StudentProfile, TeacherProfile, VacancyProfile, facets_of, normalize_as,
};
use crate::domain::Error;

/// What a listing describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    /// An individual teacher or tutor.
    Teacher,
    /// A coaching institute.
    Coaching,
    /// A school.
    School,
    /// Non-teaching staff looking for work.
    NonTeacher,
    /// A parent looking for a tutor.
    Parent,
    /// A student looking for classes.
    Student,
    /// A job vacancy.
    Vacancy,
}

impl ListingKind {
    /// Every kind, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Teacher,
        Self::Coaching,
        Self::School,
        Self::NonTeacher,
        Self::Parent,
        Self::Student,
        Self::Vacancy,
    ];

    /// Identifier stored in the `kind` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Coaching => "coaching",
            Self::School => "school",
            Self::NonTeacher => "non_teacher",
            Self::Parent => "parent",
            Self::Student => "student",
            Self::Vacancy => "vacancy",
        }
    }

    /// Collection segment under `/api/v1`.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Teacher => "teachers",
            Self::Coaching => "coachings",
            Self::School => "schools",
            Self::NonTeacher => "non-teachers",
            Self::Parent => "parents",
            Self::Student => "students",
            Self::Vacancy => "vacancies",
        }
    }

    /// Resolve a collection segment such as `non-teachers`.
    #[must_use]
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.path_segment() == segment)
    }

    /// Validate and normalise a request body for this kind.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` when the body does not match the kind's
    /// profile or a field fails validation.
    pub fn normalize_body(self, body: Value) -> Result<NormalizedBody, Error> {
        match self {
            Self::Teacher => normalize_as::<TeacherProfile>(self, body),
            Self::Coaching => normalize_as::<CoachingProfile>(self, body),
            Self::School => normalize_as::<SchoolProfile>(self, body),
            Self::NonTeacher => normalize_as::<NonTeacherProfile>(self, body),
            Self::Parent => normalize_as::<ParentProfile>(self, body),
            Self::Student => normalize_as::<StudentProfile>(self, body),
            Self::Vacancy => normalize_as::<VacancyProfile>(self, body),
        }
    }

    /// Filterable facets of a stored body; empty when the body does not parse.
    #[must_use]
    pub fn facets(self, body: &Value) -> Facets {
        match self {
            Self::Teacher => facets_of::<TeacherProfile>(body),
            Self::Coaching => facets_of::<CoachingProfile>(body),
            Self::School => facets_of::<SchoolProfile>(body),
            Self::NonTeacher => facets_of::<NonTeacherProfile>(body),
            Self::Parent => facets_of::<ParentProfile>(body),
            Self::Student => facets_of::<StudentProfile>(body),
            Self::Vacancy => facets_of::<VacancyProfile>(body),
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored kind string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown listing kind: {0}")]
pub struct UnknownListingKind(pub String);

impl FromStr for ListingKind {
    type Err = UnknownListingKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownListingKind(s.to_owned()))
    }
}
