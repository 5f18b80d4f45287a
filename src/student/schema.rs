//! Student payload validation.
//!
//! Payloads arrive as untyped JSON and leave as [`NewStudent`] or
//! [`StudentPatch`]. Every violated constraint is reported, not just the
//! first, in the `{loc, msg, type}` shape API clients already expect.
//!
//! | Field | Rule |
//! |---|---|
//! | `fullname` | non-empty string |
//! | `email` | string with email syntax |
//! | `course_of_study` | non-empty string |
//! | `year` | integer, `0 < year < 9` |
//! | `gpa` | number, `gpa <= 4.0` |

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::{NewStudent, StudentPatch};

pub const MIN_YEAR_EXCLUSIVE: i64 = 0;
pub const MAX_YEAR_EXCLUSIVE: i64 = 9;
pub const MAX_GPA: f64 = 4.0;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

/// One violated constraint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldViolation {
    /// Path to the offending value, starting at `"body"`.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldViolation {
    fn new(field: Option<&str>, msg: impl Into<String>, kind: &'static str) -> Self {
        let mut loc = vec!["body".to_owned()];
        loc.extend(field.map(str::to_owned));
        Self { loc, msg: msg.into(), kind }
    }

    /// The field name, if the violation is about a single field.
    pub fn field(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

/// Every violation found in one payload. Never empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub detail: Vec<FieldViolation>,
}

impl ValidationErrors {
    /// The body was not JSON at all.
    pub fn malformed_json(err: &serde_json::Error) -> Self {
        Self {
            detail: vec![FieldViolation::new(None, format!("invalid JSON: {err}"), "value_error.jsondecode")],
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.detail.iter().filter_map(FieldViolation::field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.detail.iter()
            .map(|v| format!("{}: {}", v.loc.join("."), v.msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a full record for creation.
pub fn validate_new(payload: &Value) -> Result<NewStudent, ValidationErrors> {
    let mut fields = Fields::of(payload)?;
    let fullname = fields.required("fullname", Fields::text);
    let email = fields.required("email", Fields::email);
    let course_of_study = fields.required("course_of_study", Fields::text);
    let year = fields.required("year", Fields::year);
    let gpa = fields.required("gpa", Fields::gpa);
    fields.finish()?;

    match (fullname, email, course_of_study, year, gpa) {
        (Some(fullname), Some(email), Some(course_of_study), Some(year), Some(gpa)) => {
            Ok(NewStudent { fullname, email, course_of_study, year, gpa })
        }
        // `finish` has already failed if any field is missing.
        _ => Err(ValidationErrors {
            detail: vec![FieldViolation::new(None, "incomplete record", "value_error.missing")],
        }),
    }
}

/// Validates a partial record for update.
///
/// Absent and `null` fields are left out of the patch; present ones must
/// satisfy the same rules as on creation. An empty patch is valid here.
pub fn validate_patch(payload: &Value) -> Result<StudentPatch, ValidationErrors> {
    let mut fields = Fields::of(payload)?;
    let patch = StudentPatch {
        fullname: fields.optional("fullname", Fields::text),
        email: fields.optional("email", Fields::email),
        course_of_study: fields.optional("course_of_study", Fields::text),
        year: fields.optional("year", Fields::year),
        gpa: fields.optional("gpa", Fields::gpa),
    };
    fields.finish()?;
    Ok(patch)
}

// ── Field checks ──────────────────────────────────────────────────────────────

type Check<T> = fn(&str, &Value) -> Result<T, FieldViolation>;

/// Collects violations while fields are pulled out of one JSON object.
struct Fields<'a> {
    object: &'a serde_json::Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> Fields<'a> {
    fn of(payload: &'a Value) -> Result<Self, ValidationErrors> {
        match payload {
            Value::Object(object) => Ok(Self { object, violations: Vec::new() }),
            _ => Err(ValidationErrors {
                detail: vec![FieldViolation::new(None, "value is not a valid dict", "type_error.dict")],
            }),
        }
    }

    fn required<T>(&mut self, name: &str, check: Check<T>) -> Option<T> {
        match self.object.get(name) {
            None | Some(Value::Null) => {
                self.violations.push(FieldViolation::new(Some(name), "field required", "value_error.missing"));
                None
            }
            Some(value) => self.record(check(name, value)),
        }
    }

    fn optional<T>(&mut self, name: &str, check: Check<T>) -> Option<T> {
        match self.object.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => self.record(check(name, value)),
        }
    }

    fn record<T>(&mut self, checked: Result<T, FieldViolation>) -> Option<T> {
        checked.map_err(|v| self.violations.push(v)).ok()
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { detail: self.violations })
        }
    }

    fn string(name: &str, value: &Value) -> Result<String, FieldViolation> {
        value.as_str()
            .map(str::to_owned)
            .ok_or_else(|| FieldViolation::new(Some(name), "str type expected", "type_error.str"))
    }

    fn text(name: &str, value: &Value) -> Result<String, FieldViolation> {
        let s = Self::string(name, value)?;
        if s.trim().is_empty() {
            return Err(FieldViolation::new(
                Some(name),
                "ensure this value has at least 1 characters",
                "value_error.any_str.min_length",
            ));
        }
        Ok(s)
    }

    fn email(name: &str, value: &Value) -> Result<String, FieldViolation> {
        let s = Self::string(name, value)?;
        if !EMAIL.is_match(&s) {
            return Err(FieldViolation::new(Some(name), "value is not a valid email address", "value_error.email"));
        }
        Ok(s)
    }

    fn year(name: &str, value: &Value) -> Result<i64, FieldViolation> {
        let year = value.as_i64()
            .ok_or_else(|| FieldViolation::new(Some(name), "value is not a valid integer", "type_error.integer"))?;
        if year <= MIN_YEAR_EXCLUSIVE {
            return Err(FieldViolation::new(
                Some(name),
                format!("ensure this value is greater than {MIN_YEAR_EXCLUSIVE}"),
                "value_error.number.not_gt",
            ));
        }
        if year >= MAX_YEAR_EXCLUSIVE {
            return Err(FieldViolation::new(
                Some(name),
                format!("ensure this value is less than {MAX_YEAR_EXCLUSIVE}"),
                "value_error.number.not_lt",
            ));
        }
        Ok(year)
    }

    fn gpa(name: &str, value: &Value) -> Result<f64, FieldViolation> {
        let gpa = value.as_f64()
            .ok_or_else(|| FieldViolation::new(Some(name), "value is not a valid float", "type_error.float"))?;
        if gpa > MAX_GPA {
            return Err(FieldViolation::new(
                Some(name),
                format!("ensure this value is less than or equal to {MAX_GPA}"),
                "value_error.number.not_le",
            ));
        }
        Ok(gpa)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    fn payload() -> Value {
        json!({
            "fullname": "John Doe",
            "email": "jdoe@x.edu.ng",
            "course_of_study": "Water resources engineering",
            "year": 2,
            "gpa": 3.0
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut p = payload();
        p[field] = value;
        p
    }

    #[test]
    fn accepts_valid_payload() {
        let student = validate_new(&payload()).unwrap();
        assert_eq!(student.fullname, "John Doe");
        assert_eq!(student.email, "jdoe@x.edu.ng");
        assert_eq!(student.course_of_study, "Water resources engineering");
        assert_eq!(student.year, 2);
        assert_eq!(student.gpa, 3.0);
    }

    #[rstest]
    fn accepts_years_one_through_eight(#[values(1, 2, 3, 4, 5, 6, 7, 8)] year: i64) {
        assert_eq!(validate_new(&with("year", json!(year))).unwrap().year, year);
    }

    #[rstest]
    #[case(0, "value_error.number.not_gt")]
    #[case(-3, "value_error.number.not_gt")]
    #[case(9, "value_error.number.not_lt")]
    #[case(100, "value_error.number.not_lt")]
    fn rejects_years_out_of_range(#[case] year: i64, #[case] kind: &str) {
        let err = validate_new(&with("year", json!(year))).unwrap_err();
        assert_eq!(err.detail.len(), 1);
        assert_eq!(err.detail[0].field(), Some("year"));
        assert_eq!(err.detail[0].kind, kind);
    }

    #[rstest]
    #[case(4.0)]
    #[case(3.99)]
    #[case(0.0)]
    fn accepts_gpa_up_to_four(#[case] gpa: f64) {
        assert_eq!(validate_new(&with("gpa", json!(gpa))).unwrap().gpa, gpa);
    }

    #[test]
    fn accepts_integer_gpa() {
        assert_eq!(validate_new(&with("gpa", json!(4))).unwrap().gpa, 4.0);
    }

    #[rstest]
    #[case(json!(4.01))]
    #[case(json!(5))]
    fn rejects_gpa_above_four(#[case] gpa: Value) {
        let err = validate_new(&with("gpa", gpa)).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), ["gpa"]);
        assert_eq!(err.detail[0].kind, "value_error.number.not_le");
    }

    #[rstest]
    #[case("plainaddress")]
    #[case("@x.edu.ng")]
    #[case("jdoe@")]
    #[case("jdoe@localhost")]
    #[case("j doe@x.edu.ng")]
    fn rejects_malformed_email(#[case] email: &str) {
        let err = validate_new(&with("email", json!(email))).unwrap_err();
        assert_eq!(err.detail[0].kind, "value_error.email");
    }

    #[test]
    fn rejects_empty_text() {
        let err = validate_new(&with("fullname", json!("  "))).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), ["fullname"]);
    }

    #[test]
    fn rejects_wrong_types() {
        let mut p = with("year", json!("2"));
        p["gpa"] = json!("3.0");
        p["fullname"] = json!(42);
        let err = validate_new(&p).unwrap_err();
        let kinds: Vec<_> = err.detail.iter().map(|v| v.kind).collect();
        assert_eq!(kinds, ["type_error.str", "type_error.integer", "type_error.float"]);
    }

    #[test]
    fn reports_every_violation() {
        let err = validate_new(&json!({"email": "nope", "year": 0, "gpa": 4.5})).unwrap_err();
        assert_eq!(
            err.fields().collect::<Vec<_>>(),
            ["fullname", "email", "course_of_study", "year", "gpa"],
        );
        assert_eq!(err.detail[0].loc, ["body", "fullname"]);
        assert_eq!(err.detail[0].kind, "value_error.missing");
    }

    #[test]
    fn null_counts_as_missing_on_create() {
        let err = validate_new(&with("gpa", Value::Null)).unwrap_err();
        assert_eq!(err.detail[0].kind, "value_error.missing");
    }

    #[test]
    fn rejects_non_object_body() {
        let err = validate_new(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.detail[0].loc, ["body"]);
        assert_eq!(err.detail[0].kind, "type_error.dict");
    }

    #[test]
    fn ignores_unknown_fields() {
        assert!(validate_new(&with("nickname", json!("JD"))).is_ok());
    }

    #[test]
    fn patch_keeps_only_present_fields() {
        let patch = validate_patch(&json!({"fullname": "Jane Doe", "gpa": null})).unwrap();
        assert_eq!(patch.fullname.as_deref(), Some("Jane Doe"));
        assert_eq!(patch.gpa, None);
        assert_eq!(patch.year, None);
        assert!(!patch.is_empty());
    }

    #[test]
    fn empty_patch_is_valid_but_empty() {
        assert!(validate_patch(&json!({})).unwrap().is_empty());
        assert!(validate_patch(&json!({"year": null})).unwrap().is_empty());
    }

    #[test]
    fn patch_still_checks_present_fields() {
        let err = validate_patch(&json!({"year": 9, "email": "bad"})).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), ["email", "year"]);
    }

    #[test]
    fn display_joins_locations() {
        let err = validate_patch(&json!({"year": 0})).unwrap_err();
        assert_eq!(err.to_string(), "body.year: ensure this value is greater than 0");
    }
}
