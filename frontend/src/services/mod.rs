pub mod api;
pub mod auth;
pub mod board;
pub mod forms;
pub mod page;
pub mod refresh;
pub mod storage;
pub mod theme;
