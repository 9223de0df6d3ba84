//! CLI command implementations.

pub mod common;
pub mod config;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod shell;
pub mod students;
