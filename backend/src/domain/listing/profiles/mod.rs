//! Typed request bodies for each listing kind.
//!
//! Bodies are stored as JSON documents, but every write passes through one of
//! these profiles first so stored documents are always normalised: trimmed
//! text, ten digit phones, lowercased emails, canonical taxonomy spellings.

mod institutions;
mod people;
mod vacancy;

pub use institutions::{CoachingProfile, SchoolProfile};
pub use people::{NonTeacherProfile, ParentProfile, StudentProfile, TeacherProfile};
pub use vacancy::VacancyProfile;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use taxonomy::{Category, LocationDirectory, Taxonomy, TaxonomyFamily};

use super::facets::Facets;
use super::kind::ListingKind;
use crate::domain::fields::{FieldError, StringList, optional_text};
use crate::domain::{Email, Error};

/// Behaviour shared by every listing profile.
pub trait ListingProfile: Serialize + DeserializeOwned {
    /// Validate and canonicalise every field.
    fn normalize(self) -> Result<Self, FieldError>;

    /// Human-readable name used to derive the slug.
    fn display_name(&self) -> &str;

    /// Filterable facets.
    fn facets(&self) -> Facets;
}

/// A validated body ready for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBody {
    /// Canonical JSON document.
    pub body: Value,
    /// Slug source.
    pub display_name: String,
    /// Filterable facets of `body`.
    pub facets: Facets,
}

pub(super) fn normalize_as<P: ListingProfile>(
    kind: ListingKind,
    body: Value,
) -> Result<NormalizedBody, Error> {
    let profile: P = serde_json::from_value(body).map_err(|err| {
        Error::invalid_request(format!("invalid {kind} body: {err}"))
            .with_details(json!({ "code": "invalid_body" }))
    })?;
    let normalized = profile.normalize()?;
    let display_name = normalized.display_name().to_owned();
    let facets = normalized.facets();
    let canonical = serde_json::to_value(&normalized)
        .map_err(|err| Error::internal(format!("failed to encode {kind} body: {err}")))?;
    Ok(NormalizedBody {
        body: canonical,
        display_name,
        facets,
    })
}

pub(super) fn facets_of<P: ListingProfile>(body: &Value) -> Facets {
    P::deserialize(body)
        .map(|profile| profile.facets())
        .unwrap_or_default()
}

/// Validate an optional email, storing its normalised form.
fn optional_email(field: &str, value: Option<String>) -> Result<Option<String>, FieldError> {
    optional_text(value)
        .map(|raw| {
            Email::new(&raw)
                .map(String::from)
                .map_err(|err| FieldError::new(field, "invalid_email", format!("{field}: {err}")))
        })
        .transpose()
}

/// Validate an optional six digit postal code.
fn optional_pincode(field: &str, value: Option<String>) -> Result<Option<String>, FieldError> {
    optional_text(value)
        .map(|raw| {
            if raw.len() == 6 && raw.chars().all(|ch| ch.is_ascii_digit()) {
                Ok(raw)
            } else {
                Err(FieldError::new(
                    field,
                    "invalid_pincode",
                    format!("{field} must be a 6 digit postal code"),
                ))
            }
        })
        .transpose()
}

/// Canonical state and city.
///
/// A city is checked only when its state appears in the bundled directory;
/// unknown states are stored as typed.
fn validate_location(
    state: Option<String>,
    city: Option<String>,
) -> Result<(Option<String>, Option<String>), FieldError> {
    let directory = LocationDirectory::builtin();
    let state_text = optional_text(state);
    let city_text = optional_text(city);
    let Some(known) = state_text
        .as_deref()
        .and_then(|name| directory.find_state(name))
    else {
        return Ok((state_text, city_text));
    };

    let canonical_city = match city_text {
        Some(name) => Some(
            directory
                .find_city(&known.name, &name)
                .map(str::to_owned)
                .ok_or_else(|| {
                    FieldError::new(
                        "city",
                        "unknown_city",
                        format!("{name} is not a listed city in {}", known.name),
                    )
                })?,
        ),
        None => None,
    };
    Ok((Some(known.name.clone()), canonical_city))
}

/// Category, exam and subject choice after taxonomy validation.
#[derive(Debug, Default)]
struct CascadeChoice {
    categories: Vec<String>,
    exams: StringList,
    subjects: StringList,
}

/// Check a category/exam/subject choice against a taxonomy family.
///
/// Without a category the lists are free text. Otherwise every exam must be
/// offered by one of the categories and every subject must be on offer for
/// the chosen exams.
fn validate_cascade(
    family: TaxonomyFamily,
    category_field: &str,
    categories: &[String],
    exams: &StringList,
    subjects: &StringList,
) -> Result<CascadeChoice, FieldError> {
    if categories.is_empty() {
        return Ok(CascadeChoice {
            categories: Vec::new(),
            exams: exams.clone(),
            subjects: subjects.clone(),
        });
    }

    let taxonomy = Taxonomy::builtin(family);
    let resolved = categories
        .iter()
        .map(|name| {
            taxonomy.category(name).ok_or_else(|| {
                FieldError::new(
                    category_field,
                    "unknown_category",
                    format!("{name} is not a {family} category"),
                )
            })
        })
        .collect::<Result<Vec<&Category>, FieldError>>()?;

    let canonical_exams = exams
        .as_slice()
        .iter()
        .map(|exam| {
            resolved
                .iter()
                .find_map(|category| category.find_exam(exam))
                .map(str::to_owned)
                .ok_or_else(|| {
                    FieldError::new(
                        "exams",
                        "unknown_exam",
                        format!("{exam} is not offered by the selected category"),
                    )
                })
        })
        .collect::<Result<Vec<String>, FieldError>>()?;

    let on_offer: Vec<String> = resolved
        .iter()
        .flat_map(|category| {
            let picked: Vec<&String> = canonical_exams
                .iter()
                .filter(|exam| category.find_exam(exam).is_some())
                .collect();
            category.available_subjects(&picked)
        })
        .collect();

    let canonical_subjects = subjects
        .as_slice()
        .iter()
        .map(|subject| {
            on_offer
                .iter()
                .find(|offered| offered.eq_ignore_ascii_case(subject))
                .cloned()
                .ok_or_else(|| {
                    FieldError::new(
                        "subjects",
                        "unavailable_subject",
                        format!("{subject} is not offered for the selected exams"),
                    )
                })
        })
        .collect::<Result<Vec<String>, FieldError>>()?;

    Ok(CascadeChoice {
        categories: resolved
            .iter()
            .map(|category| category.name().to_owned())
            .collect(),
        exams: StringList::from_items(canonical_exams),
        subjects: StringList::from_items(canonical_subjects),
    })
}
