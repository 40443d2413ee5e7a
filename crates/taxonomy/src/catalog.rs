//! Taxonomy tables and category lookups.
//!
//! A taxonomy is a versioned JSON document listing categories. Each category
//! declares the exams it covers, a category-level subject list, and an
//! optional exam-to-subject map. Categories with a non-empty map are
//! *exam-driven*: the subjects on offer depend on which exams are chosen.
//! Categories without a map (hobby and arts categories) offer their
//! category-level subjects directly.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;

const SUPPORTED_VERSION: u32 = 1;

const TEACHING_JSON: &str = include_str!("../data/teaching.json");
const COACHING_JSON: &str = include_str!("../data/coaching.json");

static TEACHING: OnceLock<Taxonomy> = OnceLock::new();
static COACHING: OnceLock<Taxonomy> = OnceLock::new();

/// Which registration flow a taxonomy drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyFamily {
    /// Individual teachers and tutors.
    Teaching,
    /// Coaching institutes.
    Coaching,
}

impl TaxonomyFamily {
    /// Stable lowercase identifier used in URLs and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Teaching => "teaching",
            Self::Coaching => "coaching",
        }
    }
}

impl fmt::Display for TaxonomyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxonomyFamily {
    type Err = TaxonomyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "teaching" => Ok(Self::Teaching),
            "coaching" => Ok(Self::Coaching),
            _ => Err(TaxonomyError::UnknownFamily {
                value: value.to_owned(),
            }),
        }
    }
}

/// Subjects taught for one exam within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSubjects {
    /// Exam the subjects belong to.
    pub exam_name: String,
    /// Subjects taught for the exam.
    pub subjects: Vec<String>,
}

/// A validated category entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    name: String,
    exams: Vec<String>,
    subjects: Vec<String>,
    exam_subject_map: Vec<ExamSubjects>,
}

impl Category {
    /// Display name of the category.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exams declared for the category, in table order.
    #[must_use]
    pub fn exams(&self) -> &[String] {
        &self.exams
    }

    /// Category-level subjects.
    #[must_use]
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Exam-to-subject mapping entries.
    #[must_use]
    pub fn exam_subject_map(&self) -> &[ExamSubjects] {
        &self.exam_subject_map
    }

    /// Whether subject availability depends on the chosen exams.
    #[must_use]
    pub fn is_exam_driven(&self) -> bool {
        !self.exam_subject_map.is_empty()
    }

    /// Resolve an exam name case-insensitively to its canonical spelling.
    #[must_use]
    pub fn find_exam(&self, exam: &str) -> Option<&str> {
        find_ignore_case(&self.exams, exam)
    }

    /// Subjects mapped to one exam; empty when the exam has no mapping.
    #[must_use]
    pub fn subjects_for_exam(&self, exam: &str) -> &[String] {
        self.exam_subject_map
            .iter()
            .find(|entry| entry.exam_name.eq_ignore_ascii_case(exam.trim()))
            .map(|entry| entry.subjects.as_slice())
            .unwrap_or_default()
    }

    /// Ordered union of the subjects mapped to `exams`, without duplicates.
    #[must_use]
    pub fn subjects_for_exams<S: AsRef<str>>(&self, exams: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        exams
            .iter()
            .flat_map(|exam| self.subjects_for_exam(exam.as_ref()))
            .filter(|subject| seen.insert(subject.to_ascii_lowercase()))
            .cloned()
            .collect()
    }

    /// Subjects a user may pick given the currently selected exams.
    ///
    /// Exam-driven categories offer the union of the mapped subjects for the
    /// selected exams; other categories offer their category-level list.
    #[must_use]
    pub fn available_subjects<S: AsRef<str>>(&self, selected_exams: &[S]) -> Vec<String> {
        if self.is_exam_driven() {
            self.subjects_for_exams(selected_exams)
        } else {
            self.subjects.clone()
        }
    }

    /// Every subject the category can ever offer.
    #[must_use]
    pub fn all_subjects(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.subjects
            .iter()
            .chain(self.exam_subject_map.iter().flat_map(|entry| &entry.subjects))
            .filter(|subject| seen.insert(subject.to_ascii_lowercase()))
            .cloned()
            .collect()
    }
}

pub(crate) fn find_ignore_case<'a>(values: &'a [String], wanted: &str) -> Option<&'a str> {
    let trimmed = wanted.trim();
    values
        .iter()
        .find(|value| value.eq_ignore_ascii_case(trimmed))
        .map(String::as_str)
}

/// A validated taxonomy table.
///
/// # Example
///
/// ```
/// use taxonomy::{Taxonomy, TaxonomyFamily};
///
/// let json = r#"{
///     "version": 1,
///     "family": "coaching",
///     "categories": [{
///         "name": "Banking",
///         "exams": ["IBPS PO"],
///         "subjects": ["Reasoning"],
///         "examSubjectMap": [{"examName": "IBPS PO", "subjects": ["Reasoning", "English"]}]
///     }]
/// }"#;
///
/// let taxonomy = Taxonomy::from_json(json).expect("valid taxonomy");
/// assert_eq!(taxonomy.family(), TaxonomyFamily::Coaching);
/// let banking = taxonomy.category("banking").expect("category exists");
/// assert_eq!(banking.subjects_for_exam("IBPS PO").len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    version: u32,
    family: TaxonomyFamily,
    categories: Vec<Category>,
}

impl Taxonomy {
    /// Parse a taxonomy from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError`] when the JSON is malformed, the version is
    /// unsupported, or the categories violate the table invariants.
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let raw: RawTaxonomy = serde_json::from_str(json).map_err(|e| TaxonomyError::Parse {
            message: e.to_string(),
        })?;
        Self::from_raw(raw)
    }

    /// Load a taxonomy from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError`] when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, TaxonomyError> {
        let contents = fs::read_to_string(path).map_err(|e| TaxonomyError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&contents)
    }

    /// Return the table bundled with the crate for `family`.
    ///
    /// # Panics
    ///
    /// Panics if the bundled JSON fails validation, which the crate's own
    /// tests rule out.
    #[must_use]
    pub fn builtin(family: TaxonomyFamily) -> &'static Self {
        let (cell, json) = match family {
            TaxonomyFamily::Teaching => (&TEACHING, TEACHING_JSON),
            TaxonomyFamily::Coaching => (&COACHING, COACHING_JSON),
        };
        cell.get_or_init(|| {
            Self::from_json(json)
                .and_then(|taxonomy| taxonomy.expect_family(family))
                .unwrap_or_else(|error| panic!("bundled {family} taxonomy is invalid: {error}"))
        })
    }

    /// Keep the table only when it declares `family`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::FamilyMismatch`] when the table belongs to
    /// the other flow.
    pub fn expect_family(self, family: TaxonomyFamily) -> Result<Self, TaxonomyError> {
        if self.family == family {
            Ok(self)
        } else {
            Err(TaxonomyError::FamilyMismatch {
                expected: family,
                actual: self.family,
            })
        }
    }

    /// Table format version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Which flow the table drives.
    #[must_use]
    pub const fn family(&self) -> TaxonomyFamily {
        self.family
    }

    /// All categories in table order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in table order.
    #[must_use]
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(Category::name).collect()
    }

    /// Look up a category by name, ignoring ASCII case and surrounding space.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        let wanted = name.trim();
        self.categories
            .iter()
            .find(|category| category.name.eq_ignore_ascii_case(wanted))
    }

    fn from_raw(raw: RawTaxonomy) -> Result<Self, TaxonomyError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(TaxonomyError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }
        if raw.categories.is_empty() {
            return Err(TaxonomyError::EmptyCategories);
        }

        let mut names = HashSet::new();
        let categories = raw
            .categories
            .into_iter()
            .enumerate()
            .map(|(index, category)| {
                let name = category.name.trim().to_owned();
                if name.is_empty() {
                    return Err(TaxonomyError::EmptyCategoryName { index });
                }
                if !names.insert(name.to_ascii_lowercase()) {
                    return Err(TaxonomyError::DuplicateCategory { name });
                }
                if let Some(unknown) = category
                    .exam_subject_map
                    .iter()
                    .find(|entry| find_ignore_case(&category.exams, &entry.exam_name).is_none())
                {
                    return Err(TaxonomyError::UnknownMappedExam {
                        category: name,
                        exam: unknown.exam_name.clone(),
                    });
                }
                let mut mapped = HashSet::new();
                if let Some(repeated) = category
                    .exam_subject_map
                    .iter()
                    .find(|entry| !mapped.insert(entry.exam_name.trim().to_ascii_lowercase()))
                {
                    return Err(TaxonomyError::DuplicateMappedExam {
                        category: name,
                        exam: repeated.exam_name.clone(),
                    });
                }
                Ok(Category {
                    name,
                    exams: category.exams,
                    subjects: category.subjects,
                    exam_subject_map: category.exam_subject_map,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version: raw.version,
            family: raw.family,
            categories,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTaxonomy {
    version: u32,
    family: TaxonomyFamily,
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCategory {
    name: String,
    #[serde(default)]
    exams: Vec<String>,
    #[serde(default)]
    subjects: Vec<String>,
    #[serde(default)]
    exam_subject_map: Vec<ExamSubjects>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TaxonomyFamily::Teaching)]
    #[case(TaxonomyFamily::Coaching)]
    fn bundled_tables_load(#[case] family: TaxonomyFamily) {
        let taxonomy = Taxonomy::builtin(family);
        assert_eq!(taxonomy.family(), family);
        assert!(!taxonomy.categories().is_empty());
    }

    #[rstest]
    #[case("teaching", TaxonomyFamily::Teaching)]
    #[case(" Coaching ", TaxonomyFamily::Coaching)]
    fn family_parses_case_insensitively(#[case] raw: &str, #[case] expected: TaxonomyFamily) {
        assert_eq!(raw.parse::<TaxonomyFamily>(), Ok(expected));
    }

    #[rstest]
    fn family_rejects_unknown_values() {
        assert!(matches!(
            "schools".parse::<TaxonomyFamily>(),
            Err(TaxonomyError::UnknownFamily { .. })
        ));
    }

    #[rstest]
    fn union_preserves_order_and_drops_duplicates() {
        let taxonomy = Taxonomy::builtin(TaxonomyFamily::Teaching);
        let science = taxonomy.category("science").expect("science category");

        let subjects = science.subjects_for_exams(&["NEET", "JEE Main"]);
        assert_eq!(subjects, vec!["Physics", "Chemistry", "Biology", "Mathematics"]);
    }

    #[rstest]
    fn unmapped_exam_has_no_subjects() {
        let taxonomy = Taxonomy::builtin(TaxonomyFamily::Teaching);
        let science = taxonomy.category("Science").expect("science category");

        assert!(science.subjects_for_exam("GATE").is_empty());
    }

    #[rstest]
    fn categories_without_map_offer_category_subjects() {
        let taxonomy = Taxonomy::builtin(TaxonomyFamily::Teaching);
        let music = taxonomy.category("Music").expect("music category");

        assert!(!music.is_exam_driven());
        assert_eq!(music.available_subjects::<String>(&[]), music.subjects().to_vec());
    }

    #[rstest]
    fn missing_category_is_none() {
        let taxonomy = Taxonomy::builtin(TaxonomyFamily::Coaching);
        assert!(taxonomy.category("Astrology").is_none());
    }
}
