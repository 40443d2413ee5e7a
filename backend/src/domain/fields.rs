//! Field-level normalisation shared by every listing profile.
//!
//! Registration forms submit list fields either as JSON arrays or as a single
//! comma-separated string, and phone numbers in whatever shape the user typed.
//! These helpers accept both and store one canonical form.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;

/// A field that failed validation, with a stable machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    field: String,
    code: &'static str,
    message: String,
}

impl FieldError {
    /// Describe a failure on `field`.
    pub fn new(field: impl Into<String>, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    /// A required field was blank or absent.
    pub fn missing(field: &str) -> Self {
        Self::new(field, "missing_field", format!("{field} is required"))
    }

    /// Offending field name in camelCase wire form.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Stable failure code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        Self::invalid_request(value.message).with_details(json!({
            "field": value.field,
            "code": value.code,
        }))
    }
}

/// Trim `value` and reject it when nothing remains.
pub fn required_text(field: &str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FieldError::missing(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Trim `value`, collapsing blank input to `None`.
#[must_use]
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}

/// A list of short strings accepted as an array or comma-separated text.
///
/// Entries are trimmed, blanks dropped, and case-insensitive duplicates removed
/// keeping the first spelling. Always serialised as a JSON array.
///
/// # Examples
/// ```
/// use marketplace::domain::StringList;
///
/// let list: StringList = serde_json::from_str(r#"" Physics, chemistry ,,physics""#)
///     .expect("csv form");
/// assert_eq!(list.as_slice(), ["Physics", "chemistry"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "RawStringList", into = "Vec<String>")]
#[schema(value_type = Vec<String>)]
pub struct StringList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStringList {
    Items(Vec<String>),
    Csv(String),
}

impl From<RawStringList> for StringList {
    fn from(value: RawStringList) -> Self {
        match value {
            RawStringList::Items(items) => Self::from_items(items),
            RawStringList::Csv(text) => Self::from_items(text.split(',')),
        }
    }
}

impl From<StringList> for Vec<String> {
    fn from(value: StringList) -> Self {
        value.0
    }
}

impl StringList {
    /// Normalise arbitrary items.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for item in items {
            let trimmed = item.as_ref().trim();
            if trimmed.is_empty() || out.iter().any(|seen| seen.eq_ignore_ascii_case(trimmed)) {
                continue;
            }
            out.push(trimmed.to_owned());
        }
        Self(out)
    }

    /// Entries in order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any entry equals `wanted`, ignoring ASCII case.
    #[must_use]
    pub fn contains_ignore_case(&self, wanted: &str) -> bool {
        self.0.iter().any(|item| item.eq_ignore_ascii_case(wanted.trim()))
    }
}

/// Indian mobile number stored as exactly ten digits.
///
/// Spaces and dashes are ignored, as is a leading `+91` or `0`.
///
/// # Examples
/// ```
/// use marketplace::domain::PhoneNumber;
///
/// let phone = PhoneNumber::parse("phone", "+91 98765-43210").expect("valid");
/// assert_eq!(phone.as_ref(), "9876543210");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "9876543210")]
pub struct PhoneNumber(String);

const PHONE_DIGITS: usize = 10;

impl PhoneNumber {
    /// Validate `raw`, attributing failures to `field`.
    pub fn parse(field: &str, raw: &str) -> Result<Self, FieldError> {
        let compact: String = raw
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != '-')
            .collect();
        if compact.is_empty() {
            return Err(FieldError::missing(field));
        }
        let national = compact
            .strip_prefix("+91")
            .or_else(|| compact.strip_prefix('0'))
            .unwrap_or(compact.as_str());
        if national.len() == PHONE_DIGITS && national.chars().all(|ch| ch.is_ascii_digit()) {
            Ok(Self(national.to_owned()))
        } else {
            Err(FieldError::new(
                field,
                "invalid_phone",
                format!("{field} must be a 10 digit mobile number"),
            ))
        }
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse("phone", &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(json!(["Physics", " Chemistry ", "", "physics"]), &["Physics", "Chemistry"][..])]
    #[case(json!("Physics, Chemistry,, Maths "), &["Physics", "Chemistry", "Maths"][..])]
    #[case(json!(""), &[][..])]
    #[case(json!([]), &[][..])]
    fn string_list_accepts_arrays_and_csv(#[case] input: Value, #[case] expected: &[&str]) {
        let list: StringList = serde_json::from_value(input).expect("list decodes");
        assert_eq!(list.as_slice(), expected);
    }

    #[rstest]
    fn string_list_serialises_as_array() {
        let list = StringList::from_items(["NEET", "JEE Main"]);
        assert_eq!(
            serde_json::to_value(&list).expect("serialise"),
            json!(["NEET", "JEE Main"])
        );
    }

    #[rstest]
    fn string_list_rejects_numbers() {
        assert!(serde_json::from_value::<StringList>(json!(42)).is_err());
    }

    #[rstest]
    #[case("9876543210", "9876543210")]
    #[case("+91 98765 43210", "9876543210")]
    #[case("098765-43210", "9876543210")]
    fn phone_numbers_normalise(#[case] raw: &str, #[case] expected: &str) {
        let phone = PhoneNumber::parse("phone", raw).expect("valid phone");
        assert_eq!(phone.as_ref(), expected);
    }

    #[rstest]
    #[case("12345", "invalid_phone")]
    #[case("98765432101", "invalid_phone")]
    #[case("98765abcde", "invalid_phone")]
    #[case("   ", "missing_field")]
    fn phone_numbers_reject_bad_shapes(#[case] raw: &str, #[case] code: &str) {
        let err = PhoneNumber::parse("contactPhone", raw).expect_err("invalid phone");
        assert_eq!(err.field(), "contactPhone");
        assert_eq!(err.code(), code);
    }

    #[rstest]
    fn field_errors_become_invalid_request_with_details() {
        let error = Error::from(FieldError::missing("name"));
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "name is required");
        assert_eq!(
            error.details(),
            Some(&json!({"field": "name", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case(Some("  hi  ".to_owned()), Some("hi"))]
    #[case(Some("   ".to_owned()), None)]
    #[case(None, None)]
    fn optional_text_trims(#[case] input: Option<String>, #[case] expected: Option<&str>) {
        assert_eq!(optional_text(input).as_deref(), expected);
    }
}
