//! The Student record: its schema, its data access, and its HTTP routes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{Document, StoreError, StoredDocument};

pub mod repository;
pub mod routes;
pub mod schema;

pub use repository::StudentRepository;
pub use schema::{FieldViolation, ValidationErrors, validate_new, validate_patch};

/// A stored student, as returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub fullname: String,
    pub email: String,
    pub course_of_study: String,
    pub year: i64,
    pub gpa: f64,
}

/// A validated record ready to be inserted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewStudent {
    pub fullname: String,
    pub email: String,
    pub course_of_study: String,
    pub year: i64,
    pub gpa: f64,
}

/// A validated merge-patch. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StudentPatch {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub course_of_study: Option<String>,
    pub year: Option<i64>,
    pub gpa: Option<f64>,
}

/// Stored field layout, minus the id.
#[derive(Deserialize)]
struct StudentFields {
    fullname: String,
    email: String,
    course_of_study: String,
    year: i64,
    gpa: f64,
}

impl Student {
    /// Decodes a stored document. Documents missing a field or holding the
    /// wrong type are a store error, not a client one.
    pub fn from_stored(doc: StoredDocument) -> Result<Self, StoreError> {
        let StoredDocument { id, fields } = doc;
        let f: StudentFields = serde_json::from_value(Value::Object(fields))
            .map_err(|e| StoreError::Decode { id, reason: e.to_string() })?;
        Ok(Self {
            id: id.to_hex(),
            fullname: f.fullname,
            email: f.email,
            course_of_study: f.course_of_study,
            year: f.year,
            gpa: f.gpa,
        })
    }
}

impl NewStudent {
    pub fn into_document(self) -> Document {
        let mut doc = Document::new();
        doc.insert("fullname".to_owned(), self.fullname.into());
        doc.insert("email".to_owned(), self.email.into());
        doc.insert("course_of_study".to_owned(), self.course_of_study.into());
        doc.insert("year".to_owned(), self.year.into());
        doc.insert("gpa".to_owned(), self.gpa.into());
        doc
    }
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.fullname.is_none()
            && self.email.is_none()
            && self.course_of_study.is_none()
            && self.year.is_none()
            && self.gpa.is_none()
    }

    /// The `$set` document: only the fields that are present.
    pub fn into_document(self) -> Document {
        let mut doc = Document::new();
        if let Some(v) = self.fullname {
            doc.insert("fullname".to_owned(), v.into());
        }
        if let Some(v) = self.email {
            doc.insert("email".to_owned(), v.into());
        }
        if let Some(v) = self.course_of_study {
            doc.insert("course_of_study".to_owned(), v.into());
        }
        if let Some(v) = self.year {
            doc.insert("year".to_owned(), v.into());
        }
        if let Some(v) = self.gpa {
            doc.insert("gpa".to_owned(), v.into());
        }
        doc
    }
}
