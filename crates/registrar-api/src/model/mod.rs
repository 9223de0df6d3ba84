//! Resource model mirroring the registrar service's JSON shapes.
//!
//! Read models carry the server-assigned `id` plus display fields the server
//! fills in (enrollment dates, denormalized names). Drafts are the request
//! bodies for create/update and never carry an id.

mod course;
mod enrollment;
mod student;

use thiserror::Error;

pub use course::{Course, CourseDraft};
pub use enrollment::{Enrollment, EnrollmentDraft, EnrollmentStatus, Grade};
pub use student::{Student, StudentDraft};

/// A string did not name a member of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    /// What was being parsed ("grade", "status").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}
