//! Profiles posted by individuals: teachers, staff, parents, students.

use serde::{Deserialize, Serialize};
use taxonomy::TaxonomyFamily;
use utoipa::ToSchema;

use super::{
    ListingProfile, optional_email, optional_pincode, validate_cascade, validate_location,
};
use crate::domain::Facets;
use crate::domain::fields::{FieldError, PhoneNumber, StringList, optional_text, required_text};

/// A teacher or private tutor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TeacherProfile {
    /// Full name.
    pub name: String,
    /// Ten digit mobile number.
    pub phone: String,
    /// Contact email.
    pub email: Option<String>,
    /// Gender as entered.
    pub gender: Option<String>,
    /// Highest qualification.
    pub qualification: Option<String>,
    /// Years of teaching experience.
    pub experience_years: Option<u32>,
    /// Category from the teaching taxonomy.
    pub teaching_category: Option<String>,
    /// Exams prepared for.
    #[serde(default)]
    pub exams: StringList,
    /// Subjects taught.
    #[serde(default)]
    pub subjects: StringList,
    /// Class levels taught.
    #[serde(default)]
    pub preferred_classes: StringList,
    /// State.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Postal code.
    pub pincode: Option<String>,
    /// Online, offline, or both.
    pub teaching_mode: Option<String>,
    /// Expected monthly salary in rupees.
    pub expected_salary: Option<u32>,
    /// Free-form introduction.
    pub about: Option<String>,
    /// Whether the teacher is taking new students.
    pub is_available: Option<bool>,
}

impl ListingProfile for TeacherProfile {
    fn normalize(self) -> Result<Self, FieldError> {
        let category: Vec<String> = optional_text(self.teaching_category).into_iter().collect();
        let cascade = validate_cascade(
            TaxonomyFamily::Teaching,
            "teachingCategory",
            &category,
            &self.exams,
            &self.subjects,
        )?;
        let (state, city) = validate_location(self.state, self.city)?;
        Ok(Self {
            name: required_text("name", &self.name)?,
            phone: PhoneNumber::parse("phone", &self.phone)?.into(),
            email: optional_email("email", self.email)?,
            gender: optional_text(self.gender),
            qualification: optional_text(self.qualification),
            experience_years: self.experience_years,
            teaching_category: cascade.categories.into_iter().next(),
            exams: cascade.exams,
            subjects: cascade.subjects,
            preferred_classes: self.preferred_classes,
            state,
            city,
            pincode: optional_pincode("pincode", self.pincode)?,
            teaching_mode: optional_text(self.teaching_mode),
            expected_salary: self.expected_salary,
            about: optional_text(self.about),
            is_available: self.is_available,
        })
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn facets(&self) -> Facets {
        Facets {
            categories: self.teaching_category.iter().cloned().collect(),
            exams: self.exams.as_slice().to_vec(),
            subjects: self.subjects.as_slice().to_vec(),
            state: self.state.clone(),
            city: self.city.clone(),
        }
    }
}

/// Non-teaching staff: accountants, lab assistants, drivers, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NonTeacherProfile {
    /// Full name.
    pub name: String,
    /// Ten digit mobile number.
    pub phone: String,
    /// Contact email.
    pub email: Option<String>,
    /// Role sought, e.g. "Lab Assistant".
    pub role: String,
    /// Years of experience.
    pub experience_years: Option<u32>,
    /// Highest qualification.
    pub qualification: Option<String>,
    /// State.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Expected monthly salary in rupees.
    pub expected_salary: Option<u32>,
    /// Free-form introduction.
    pub about: Option<String>,
}

impl ListingProfile for NonTeacherProfile {
    fn normalize(self) -> Result<Self, FieldError> {
        let (state, city) = validate_location(self.state, self.city)?;
        Ok(Self {
            name: required_text("name", &self.name)?,
            phone: PhoneNumber::parse("phone", &self.phone)?.into(),
            email: optional_email("email", self.email)?,
            role: required_text("role", &self.role)?,
            experience_years: self.experience_years,
            qualification: optional_text(self.qualification),
            state,
            city,
            expected_salary: self.expected_salary,
            about: optional_text(self.about),
        })
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn facets(&self) -> Facets {
        Facets {
            categories: vec![self.role.clone()],
            state: self.state.clone(),
            city: self.city.clone(),
            ..Facets::default()
        }
    }
}

/// A parent looking for a tutor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParentProfile {
    /// Parent's name.
    pub name: String,
    /// Ten digit mobile number.
    pub phone: String,
    /// Contact email.
    pub email: Option<String>,
    /// Child's name.
    pub child_name: Option<String>,
    /// Child's class.
    pub child_class: Option<String>,
    /// Subjects tuition is wanted for.
    #[serde(default)]
    pub subjects: StringList,
    /// Online, home tuition, and so on.
    pub preferred_mode: Option<String>,
    /// State.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Monthly budget in rupees.
    pub budget: Option<u32>,
}

impl ListingProfile for ParentProfile {
    fn normalize(self) -> Result<Self, FieldError> {
        let (state, city) = validate_location(self.state, self.city)?;
        Ok(Self {
            name: required_text("name", &self.name)?,
            phone: PhoneNumber::parse("phone", &self.phone)?.into(),
            email: optional_email("email", self.email)?,
            child_name: optional_text(self.child_name),
            child_class: optional_text(self.child_class),
            subjects: self.subjects,
            preferred_mode: optional_text(self.preferred_mode),
            state,
            city,
            budget: self.budget,
        })
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn facets(&self) -> Facets {
        Facets {
            subjects: self.subjects.as_slice().to_vec(),
            state: self.state.clone(),
            city: self.city.clone(),
            ..Facets::default()
        }
    }
}

/// A student looking for classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StudentProfile {
    /// Student's name.
    pub name: String,
    /// Ten digit mobile number.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Current class.
    pub class_level: Option<String>,
    /// Board, e.g. CBSE.
    pub board: Option<String>,
    /// Exams being prepared for.
    #[serde(default)]
    pub target_exams: StringList,
    /// Subjects help is wanted in.
    #[serde(default)]
    pub subjects: StringList,
    /// State.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
}

impl ListingProfile for StudentProfile {
    fn normalize(self) -> Result<Self, FieldError> {
        let (state, city) = validate_location(self.state, self.city)?;
        let phone = optional_text(self.phone)
            .map(|raw| PhoneNumber::parse("phone", &raw).map(String::from))
            .transpose()?;
        Ok(Self {
            name: required_text("name", &self.name)?,
            phone,
            email: optional_email("email", self.email)?,
            class_level: optional_text(self.class_level),
            board: optional_text(self.board),
            target_exams: self.target_exams,
            subjects: self.subjects,
            state,
            city,
        })
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn facets(&self) -> Facets {
        Facets {
            exams: self.target_exams.as_slice().to_vec(),
            subjects: self.subjects.as_slice().to_vec(),
            state: self.state.clone(),
            city: self.city.clone(),
            ..Facets::default()
        }
    }
}
