//! Conversion of raw form input into request bodies.
//!
//! Pages collect `name -> value` pairs from their `<form>` elements and the CLI
//! builds the same map from its flags, so both go through the parsing here.

use std::collections::BTreeMap;

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::api::{RegisterRequest, SignupRequest, TodoCreate, TodoUpdate};
use crate::models::{ChildDetails, LessonCreate};

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(String),

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: String, value: String },

    #[error("{field} is not a valid date and time: {value:?}")]
    InvalidDate { field: String, value: String },

    #[error("the end time must be after the start time")]
    PeriodOrder,

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Submitted form values keyed by input name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Raw value; missing inputs read as empty.
    pub fn text(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn required(&self, name: &str) -> Result<String, FormError> {
        let value = self.text(name).trim();
        if value.is_empty() {
            Err(FormError::Missing(name.to_string()))
        } else {
            Ok(value.to_string())
        }
    }

    pub fn optional(&self, name: &str) -> Option<String> {
        let value = self.text(name).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn int<T: std::str::FromStr>(&self, name: &str) -> Result<T, FormError> {
        let value = self.required(name)?;
        parse_number(name, &value)
    }

    pub fn optional_int<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>, FormError> {
        self.optional(name)
            .map(|value| parse_number(name, &value))
            .transpose()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, FormError> {
    // Prices are often typed with separators.
    let cleaned: String = value.chars().filter(|c| *c != ',').collect();
    cleaned.parse().map_err(|_| FormError::NotANumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Input names of the admin "add lesson" form.
pub const LESSON_FIELDS: &[&str] = &[
    "year",
    "season",
    "number",
    "title",
    "teacher",
    "day",
    "time",
    "price",
    "description",
    "capacity",
    "lessons",
];

pub fn lesson_create(fields: &FormFields) -> Result<LessonCreate, FormError> {
    Ok(LessonCreate {
        year: fields.int("year")?,
        season: fields.int("season")?,
        number: fields.int("number")?,
        title: fields.required("title")?,
        teacher: fields.required("teacher")?,
        day: fields.optional("day"),
        time: fields.optional("time"),
        price: fields.optional_int("price")?,
        description: fields.optional("description"),
        capacity: fields.optional_int("capacity")?,
        lessons: fields.optional_int("lessons")?,
    })
}

pub fn todo_create(fields: &FormFields) -> Result<TodoCreate, FormError> {
    let todo = TodoCreate {
        title: fields.required("title")?,
        content: fields.optional("content"),
    };
    todo.validate()?;
    Ok(todo)
}

/// Edit form payload: an empty title keeps the old one, content is always replaced.
pub fn todo_edit(title: &str, content: &str) -> TodoUpdate {
    let title = title.trim();
    TodoUpdate {
        title: (!title.is_empty()).then(|| title.to_string()),
        content: Some(content.to_string()),
    }
}

pub fn login(fields: &FormFields) -> Result<(String, String), FormError> {
    Ok((fields.required("username")?, fields.required("password")?))
}

pub fn register(fields: &FormFields) -> Result<RegisterRequest, FormError> {
    let request = RegisterRequest {
        username: fields.required("username")?,
        plain_password: fields.required("password")?,
    };
    request.validate()?;
    Ok(request)
}

/// Input names of the account sign-up form.
pub const SIGNUP_FIELDS: &[&str] = &[
    "last_name",
    "first_name",
    "last_name_furigana",
    "first_name_furigana",
    "tel",
    "postal_code",
    "address",
    "email",
    "username",
    "password",
];

/// Input names of the optional child block on the sign-up form.
pub const CHILD_FIELDS: &[&str] = &[
    "child_last_name",
    "child_first_name",
    "child_last_name_furigana",
    "child_first_name_furigana",
];

/// The child block is optional, but once any of it is filled in all of it is required.
pub fn child(fields: &FormFields) -> Result<Option<ChildDetails>, FormError> {
    if CHILD_FIELDS.iter().all(|name| fields.optional(name).is_none()) {
        return Ok(None);
    }
    Ok(Some(ChildDetails {
        last_name: fields.required("child_last_name")?,
        first_name: fields.required("child_first_name")?,
        last_name_furigana: fields.required("child_last_name_furigana")?,
        first_name_furigana: fields.required("child_first_name_furigana")?,
    }))
}

pub fn signup(fields: &FormFields) -> Result<SignupRequest, FormError> {
    let request = SignupRequest {
        username: fields.required("username")?,
        plain_password: fields.required("password")?,
        last_name: fields.required("last_name")?,
        first_name: fields.required("first_name")?,
        last_name_furigana: fields.required("last_name_furigana")?,
        first_name_furigana: fields.required("first_name_furigana")?,
        tel: fields.required("tel")?,
        postal_code: fields.required("postal_code")?,
        address: fields.required("address")?,
        email: fields.optional("email"),
        children: child(fields)?.into_iter().collect(),
    };
    request.validate()?;
    Ok(request)
}
