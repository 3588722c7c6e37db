pub mod admin_lessons;
pub mod admin_settings;
pub mod home;
pub mod my_lessons;
pub mod not_found;
pub mod signup;
pub mod todos;
pub mod user_details;
