//! Validation of submitted course forms.
//!
//! A submission is a flat map of form keys to strings. [`validate`] either hands back a
//! [`ValidCourse`] ready to be persisted, or a [`ValidationError`] with one message per
//! failing field.

use snafu::Snafu;
use std::collections::{BTreeMap, HashMap};

pub const REQUIRED_MESSAGE: &str = "Required";
pub const EMPTY_MESSAGE: &str = "Must not be empty";

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CourseField {
    Name,
    Description,
}

impl CourseField {
    /// Key used for the field in submitted forms.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
        }
    }
}

pub type FieldErrors = BTreeMap<CourseField, &'static str>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(display("{} course field(s) failed validation", errors.len()))]
pub struct ValidationError {
    errors: FieldErrors,
}

impl ValidationError {
    pub const fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn into_field_errors(self) -> FieldErrors {
        self.errors
    }
}

/// A course that passed validation. Only [`validate`] makes these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCourse {
    name: String,
    description: String,
}

impl ValidCourse {
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.description)
    }
}

pub fn validate(submission: &HashMap<String, String>) -> Result<ValidCourse, ValidationError> {
    let mut errors = FieldErrors::new();

    let mut check = |field: CourseField| match submission.get(field.key()).map(|value| value.trim()) {
        None => {
            errors.insert(field, REQUIRED_MESSAGE);
            None
        }
        Some("") => {
            errors.insert(field, EMPTY_MESSAGE);
            None
        }
        Some(value) => Some(value.to_string()),
    };

    let name = check(CourseField::Name);
    let description = check(CourseField::Description);

    match (name, description) {
        (Some(name), Some(description)) => Ok(ValidCourse { name, description }),
        _ => Err(ValidationError { errors }),
    }
}
