//! Data models shared between API client and UI.

pub mod attendance;
pub mod auth;
pub mod catalog;
pub mod course;
pub mod exam;
pub mod grade;
pub mod material;
pub mod news;
pub mod student;
