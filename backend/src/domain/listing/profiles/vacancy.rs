//! Job vacancies posted by schools and institutes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taxonomy::TaxonomyFamily;
use utoipa::ToSchema;

use super::{ListingProfile, optional_email, validate_cascade, validate_location};
use crate::domain::Facets;
use crate::domain::fields::{FieldError, PhoneNumber, StringList, optional_text, required_text};

const fn open_by_default() -> bool {
    true
}

/// A job vacancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VacancyProfile {
    /// Job title.
    pub title: String,
    /// Hiring organisation.
    pub organization: String,
    /// Category from the teaching taxonomy.
    pub category: Option<String>,
    /// Exams the role prepares students for.
    #[serde(default)]
    pub exams: StringList,
    /// Subjects to be taught.
    #[serde(default)]
    pub subjects: StringList,
    /// Full-time, part-time, contract.
    pub employment_type: Option<String>,
    /// Lower bound of the monthly salary in rupees.
    pub salary_min: Option<u32>,
    /// Upper bound of the monthly salary in rupees.
    pub salary_max: Option<u32>,
    /// Experience asked for, as entered.
    pub experience_required: Option<String>,
    /// State.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Job description.
    pub description: Option<String>,
    /// Email to apply to.
    pub contact_email: Option<String>,
    /// Phone to apply to.
    pub contact_phone: Option<String>,
    /// Whether applications are still accepted.
    #[serde(default = "open_by_default")]
    pub is_open: bool,
    /// Closing date.
    #[schema(value_type = Option<String>, format = Date)]
    pub last_date: Option<NaiveDate>,
}

impl ListingProfile for VacancyProfile {
    fn normalize(self) -> Result<Self, FieldError> {
        if matches!((self.salary_min, self.salary_max), (Some(min), Some(max)) if min > max) {
            return Err(FieldError::new(
                "salaryMin",
                "invalid_range",
                "salaryMin must not exceed salaryMax",
            ));
        }
        let category: Vec<String> = optional_text(self.category).into_iter().collect();
        let cascade = validate_cascade(
            TaxonomyFamily::Teaching,
            "category",
            &category,
            &self.exams,
            &self.subjects,
        )?;
        let (state, city) = validate_location(self.state, self.city)?;
        let contact_phone = optional_text(self.contact_phone)
            .map(|raw| PhoneNumber::parse("contactPhone", &raw).map(String::from))
            .transpose()?;
        Ok(Self {
            title: required_text("title", &self.title)?,
            organization: required_text("organization", &self.organization)?,
            category: cascade.categories.into_iter().next(),
            exams: cascade.exams,
            subjects: cascade.subjects,
            employment_type: optional_text(self.employment_type),
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            experience_required: optional_text(self.experience_required),
            state,
            city,
            description: optional_text(self.description),
            contact_email: optional_email("contactEmail", self.contact_email)?,
            contact_phone,
            is_open: self.is_open,
            last_date: self.last_date,
        })
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn facets(&self) -> Facets {
        Facets {
            categories: self.category.iter().cloned().collect(),
            exams: self.exams.as_slice().to_vec(),
            subjects: self.subjects.as_slice().to_vec(),
            state: self.state.clone(),
            city: self.city.clone(),
        }
    }
}
