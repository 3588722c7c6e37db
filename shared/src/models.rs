use serde::{Deserialize, Serialize};

/// Number of sessions a lesson fee covers when the backend does not say.
pub const DEFAULT_SESSIONS: i32 = 10;

/// Lesson as returned by the lesson list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub season: Option<i32>,
    pub number: i32,
    pub title: String,
    pub teacher: String,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    /// `None` means the lesson has no participant limit.
    #[serde(default)]
    pub capacity: Option<i32>,
    /// `None` until the backend has counted sign-ups.
    #[serde(default)]
    pub capacity_left: Option<i32>,
    /// Sessions covered by the fee.
    #[serde(default)]
    pub lessons: Option<i32>,
}

impl Lesson {
    /// Lessons numbered 1 (or lower) are the children's classes.
    pub fn is_children_lesson(&self) -> bool {
        self.number <= 1
    }

    pub fn sessions(&self) -> i32 {
        self.lessons.unwrap_or(DEFAULT_SESSIONS)
    }

    /// Seats left, falling back to the full capacity when not counted yet.
    pub fn seats_left(&self) -> Option<i32> {
        self.capacity.map(|cap| self.capacity_left.unwrap_or(cap))
    }
}

/// Body of the admin "add lesson" form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonCreate {
    pub year: i32,
    pub season: i32,
    pub number: i32,
    pub title: String,
    pub teacher: String,
    pub day: Option<String>,
    pub time: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub lessons: Option<i32>,
}

/// Partial lesson update; unset fields are left untouched by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons: Option<i32>,
}

impl LessonUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Where the current user sits in a lesson's sign-up order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupPosition {
    pub lesson_id: i64,
    /// 1-based; 0 when not signed up.
    pub user_position: u32,
}

/// Admin view of who signed up for a lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonMembers {
    pub lesson_number: i32,
    pub lesson_title: String,
    /// Member rows differ between adult and children's lessons, so they stay untyped.
    pub users: Vec<serde_json::Value>,
}

/// Todo item model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_done: bool,
}

/// Account details shown on the "my page"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub last_name: String,
    pub first_name: String,
    pub last_name_furigana: String,
    pub first_name_furigana: String,
    pub tel: String,
    pub postal_code: String,
    pub address: String,
    #[serde(default)]
    pub email: Option<String>,
    pub username: String,
}

impl UserDetails {
    pub fn full_name(&self) -> String {
        format!("{}\u{3000}{}", self.last_name, self.first_name)
    }

    pub fn full_furigana(&self) -> String {
        format!("{}\u{3000}{}", self.last_name_furigana, self.first_name_furigana)
    }
}

/// A child registered together with the parent's account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildDetails {
    pub last_name: String,
    pub first_name: String,
    pub last_name_furigana: String,
    pub first_name_furigana: String,
}

impl ChildDetails {
    pub fn full_name(&self) -> String {
        format!("{}\u{3000}{}", self.last_name, self.first_name)
    }

    pub fn full_furigana(&self) -> String {
        format!("{}\u{3000}{}", self.last_name_furigana, self.first_name_furigana)
    }
}

/// Token issued by `POST /token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Calendar fields of a period boundary, as the admin settings endpoint expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDict {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// UTC offset in hours.
    pub timezone: i32,
}

/// Lesson sign-up period for one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRequest {
    pub year: i32,
    pub season: i32,
    pub start_time: DateDict,
    pub end_time: DateDict,
}
