use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Lifecycle state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 3] = [
        EnrollmentStatus::Active,
        EnrollmentStatus::Completed,
        EnrollmentStatus::Dropped,
    ];

    /// Wire name ("ACTIVE").
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "ACTIVE",
            EnrollmentStatus::Completed => "COMPLETED",
            EnrollmentStatus::Dropped => "DROPPED",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ParseEnumError {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Letter grade recorded against a completed or in-progress enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Grade; 8] = [
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::CPlus,
        Grade::C,
        Grade::D,
        Grade::F,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|grade| grade.as_str() == wanted)
            .ok_or_else(|| ParseEnumError {
                kind: "grade",
                value: s.to_string(),
            })
    }
}

/// An enrollment record as returned by `GET /enrollments`.
///
/// `student_name`, `course_name` and `course_code` are denormalized by the
/// server at read time. They are display data only and may lag behind a
/// rename of the underlying student or course.
///
/// `grade` is kept as the server sent it. The server stores free text, so
/// a value outside [`Grade::ALL`] must not fail the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    #[serde(default)]
    pub student_name: Option<String>,
    pub course_id: i64,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub course_code: Option<String>,
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
}

impl Enrollment {
    /// The recorded grade, if it is one of the known grades.
    pub fn known_grade(&self) -> Option<Grade> {
        self.grade.as_deref().and_then(|grade| grade.parse().ok())
    }

    /// Student display name, falling back to "Student #id".
    pub fn student_label(&self) -> String {
        self.student_name
            .clone()
            .unwrap_or_else(|| format!("Student #{}", self.student_id))
    }

    /// Course display name, falling back to "Course #id".
    pub fn course_label(&self) -> String {
        self.course_name
            .clone()
            .unwrap_or_else(|| format!("Course #{}", self.course_id))
    }
}

/// Request body for `POST /enrollments`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDraft {
    pub student_id: i64,
    pub course_id: i64,
}
