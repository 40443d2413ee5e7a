//! OpenAPI schema definitions for types owned by other crates.
//!
//! The `taxonomy` crate stays free of `utoipa`, so the shapes it serialises
//! are described here instead. These types only feed the generated
//! document; handlers never construct them.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    CoachingProfile, NonTeacherProfile, ParentProfile, SchoolProfile, StudentProfile,
    TeacherProfile, VacancyProfile,
};

/// OpenAPI schema for `taxonomy::ExamSubjects`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct ExamSubjectsSchema {
    /// Exam name.
    #[schema(example = "NEET")]
    exam_name: String,
    /// Subjects taught for the exam.
    subjects: Vec<String>,
}

/// OpenAPI schema for `taxonomy::Category`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct CategorySchema {
    /// Category name.
    #[schema(example = "Science")]
    name: String,
    /// Exams the category prepares for.
    exams: Vec<String>,
    /// Subjects offered when no exam drives the choice.
    subjects: Vec<String>,
    /// Subjects per exam.
    exam_subject_map: Vec<ExamSubjectsSchema>,
}

/// OpenAPI schema for `taxonomy::Selection`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct SelectionSchema {
    /// Chosen category.
    category: Option<String>,
    /// Chosen exams.
    exams: Vec<String>,
    /// Chosen subjects.
    subjects: Vec<String>,
}

/// Discriminator of `taxonomy::SelectionAction`.
#[derive(ToSchema)]
pub enum SelectionActionTypeSchema {
    #[schema(rename = "selectCategory")]
    SelectCategory,
    #[schema(rename = "clearCategory")]
    ClearCategory,
    #[schema(rename = "selectExam")]
    SelectExam,
    #[schema(rename = "deselectExam")]
    DeselectExam,
    #[schema(rename = "toggleExam")]
    ToggleExam,
    #[schema(rename = "selectSubject")]
    SelectSubject,
    #[schema(rename = "deselectSubject")]
    DeselectSubject,
    #[schema(rename = "toggleSubject")]
    ToggleSubject,
}

/// OpenAPI schema for `taxonomy::SelectionAction`.
///
/// `value` names the category, exam or subject; `clearCategory` has none.
#[derive(ToSchema)]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct SelectionActionSchema {
    /// What the user did.
    r#type: SelectionActionTypeSchema,
    /// Target of the action.
    #[schema(example = "NEET")]
    value: Option<String>,
}

/// OpenAPI schema for `taxonomy::CascadeView`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct CascadeViewSchema {
    /// Resolved category name.
    category: Option<String>,
    /// Exams on offer.
    exams: Vec<String>,
    /// Subjects on offer for the chosen exams.
    available_subjects: Vec<String>,
    /// Whether subjects follow the exam choice.
    exam_driven: bool,
}

/// OpenAPI schema for `taxonomy::StateCities`.
#[derive(ToSchema)]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct StateCitiesSchema {
    /// State name.
    #[schema(example = "Rajasthan")]
    name: String,
    /// Cities in the state.
    cities: Vec<String>,
}

/// Any listing profile; which one applies depends on the collection.
#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum ListingBodySchema {
    Teacher(TeacherProfile),
    Coaching(CoachingProfile),
    School(SchoolProfile),
    NonTeacher(NonTeacherProfile),
    Parent(ParentProfile),
    Student(StudentProfile),
    Vacancy(VacancyProfile),
}
