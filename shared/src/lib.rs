//! Types and client logic shared by the browser frontend and the CLI.

pub mod api;
pub mod client;
pub mod error;
pub mod forms;
pub mod models;
pub mod period;
pub mod session;
pub mod view;

pub use client::{BoardScope, BookingClient, HttpRequest, HttpResponse, Transport};
pub use error::{ClientError, ClientResult};
pub use session::{Session, TokenStore};
pub use view::{LessonBoard, LessonCard, SignUpAction};
