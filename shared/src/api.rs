use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::ClientError;
use crate::models::{ChildDetails, LessonCreate, LessonUpdate, PeriodRequest};

// ============================================================================
// Account API Types
// ============================================================================

/// Minimal account creation (`POST /users`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 4, max = 100))]
    pub username: String,

    #[validate(custom = "validate_password")]
    pub plain_password: String,
}

/// Account creation with contact details (`POST /users/signup`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 4, max = 100))]
    pub username: String,

    #[validate(custom = "validate_password")]
    pub plain_password: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name_furigana: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name_furigana: String,

    #[validate(length(min = 1, max = 20))]
    pub tel: String,
    #[validate(length(min = 1, max = 10))]
    pub postal_code: String,
    #[validate(length(min = 1, max = 200))]
    pub address: String,

    #[validate(email)]
    pub email: Option<String>,

    /// Children for the children's classes; omitted when there are none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildDetails>,
}

/// Passwords are at least four ASCII letters or digits.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() >= 4 && password.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("password"))
    }
}

// ============================================================================
// Todo API Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TodoCreate {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDonePatch {
    pub is_done: bool,
}

// ============================================================================
// Error Types
// ============================================================================

/// Error body the backend sends with non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// Flattens `detail` to text; validation failures arrive as arrays.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// Request descriptions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// Serialized JSON, sent as `application/json`.
    Json(String),
    /// Sent as `application/x-www-form-urlencoded`.
    Form(String),
}

impl RequestBody {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ClientError> {
        Ok(RequestBody::Json(serde_json::to_string(value)?))
    }

    pub fn form(pairs: &[(&str, &str)]) -> Self {
        let encoded = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        RequestBody::Form(encoded)
    }

    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Json(_) => Some("application/json"),
            RequestBody::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Json(s) | RequestBody::Form(s) => Some(s),
        }
    }
}

/// Whether a request carries the stored bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    None,
    /// Sent when a token is stored.
    Optional,
    /// The call fails with [`ClientError::MissingToken`] without a token.
    Required,
}

/// One backend call, independent of the HTTP stack that performs it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
    pub auth: Auth,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>, auth: Auth) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            auth,
        }
    }

    fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    fn with_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, ClientError> {
        Ok(self.with_body(RequestBody::json(value)?))
    }

    // ---- auth & accounts ----

    pub fn login(username: &str, password: &str) -> Self {
        Self::new(Method::Post, "/token", Auth::None).with_body(RequestBody::form(&[
            ("username", username),
            ("password", password),
        ]))
    }

    pub fn current_username() -> Self {
        Self::new(Method::Get, "/my/username", Auth::Required)
    }

    pub fn register(request: &RegisterRequest) -> Result<Self, ClientError> {
        Self::new(Method::Post, "/users", Auth::None).with_json(request)
    }

    pub fn signup(request: &SignupRequest) -> Result<Self, ClientError> {
        Self::new(Method::Post, "/users/signup", Auth::None).with_json(request)
    }

    pub fn my_user_details() -> Self {
        Self::new(Method::Get, "/json/my/userdetails", Auth::Required)
    }

    // ---- lessons ----

    pub fn public_lessons() -> Self {
        Self::new(Method::Get, "/json/lessons", Auth::None)
    }

    pub fn admin_lessons() -> Self {
        Self::new(Method::Get, "/json/admin/lessons", Auth::Required)
    }

    pub fn my_lessons() -> Self {
        Self::new(Method::Get, "/json/my/lessons", Auth::Required)
    }

    pub fn my_positions() -> Self {
        Self::new(Method::Get, "/json/my/lessons/position", Auth::Required)
    }

    pub fn lesson_position(lesson_id: i64) -> Self {
        Self::new(
            Method::Get,
            format!("/json/my/lessons/{}/position", lesson_id),
            Auth::Required,
        )
    }

    pub fn sign_up(lesson_id: i64) -> Self {
        Self::new(Method::Post, format!("/lessons/{}", lesson_id), Auth::Required)
            .with_body(RequestBody::Json("{}".to_string()))
    }

    pub fn cancel(lesson_id: i64) -> Self {
        Self::new(Method::Delete, format!("/my/lessons/{}", lesson_id), Auth::Required)
            .with_body(RequestBody::Json("{}".to_string()))
    }

    pub fn create_lesson(lesson: &LessonCreate) -> Result<Self, ClientError> {
        Self::new(Method::Post, "/lessons", Auth::Required).with_json(lesson)
    }

    pub fn import_lessons(lessons: &[LessonCreate]) -> Result<Self, ClientError> {
        Self::new(Method::Post, "/json/admin/lessons/create", Auth::Required).with_json(lessons)
    }

    pub fn update_lesson(lesson_id: i64, update: &LessonUpdate) -> Result<Self, ClientError> {
        Self::new(Method::Patch, format!("/lessons/{}", lesson_id), Auth::Required)
            .with_json(update)
    }

    pub fn delete_lesson(lesson_id: i64) -> Self {
        Self::new(Method::Delete, format!("/lessons/{}", lesson_id), Auth::Required)
    }

    pub fn lesson_members() -> Self {
        Self::new(Method::Get, "/json/admin/lessons/users", Auth::Required)
    }

    pub fn remove_member(username: &str, lesson_id: i64) -> Self {
        Self::new(
            Method::Delete,
            format!(
                "/admin/users/{}/remove/{}",
                urlencoding::encode(username),
                lesson_id
            ),
            Auth::Required,
        )
    }

    pub fn update_period(period: &PeriodRequest) -> Result<Self, ClientError> {
        Self::new(Method::Put, "/admin/period", Auth::Required).with_json(period)
    }

    // ---- todos ----

    pub fn list_todos() -> Self {
        Self::new(Method::Get, "/todos/json", Auth::Optional)
    }

    pub fn create_todo(todo: &TodoCreate) -> Result<Self, ClientError> {
        Self::new(Method::Post, "/todos", Auth::Optional).with_json(todo)
    }

    pub fn update_todo(todo_id: i64, update: &TodoUpdate) -> Result<Self, ClientError> {
        Self::new(Method::Patch, format!("/todos/{}", todo_id), Auth::Optional).with_json(update)
    }

    pub fn set_todo_done(todo_id: i64, is_done: bool) -> Result<Self, ClientError> {
        Self::new(Method::Patch, format!("/todos/is-done/{}", todo_id), Auth::Optional)
            .with_json(&TodoDonePatch { is_done })
    }

    pub fn delete_todo(todo_id: i64) -> Self {
        Self::new(Method::Delete, format!("/todos/{}", todo_id), Auth::Optional)
    }
}
