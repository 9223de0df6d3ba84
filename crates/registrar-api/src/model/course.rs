use serde::{Deserialize, Serialize};

/// A course record as returned by `GET /courses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub course_name: String,
    pub course_code: String,
    pub credits: u32,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for `POST /courses` and `PUT /courses/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub course_name: String,
    pub course_code: String,
    pub credits: u32,
    pub instructor: Option<String>,
    pub description: Option<String>,
}

impl CourseDraft {
    /// Accepted credit range.
    pub const CREDITS: std::ops::RangeInclusive<u32> = 1..=10;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_reads_camel_case() {
        let course: Course = serde_json::from_str(
            r#"{"id":2,"courseName":"Algorithms","courseCode":"CS201","credits":4,
                "instructor":"Dr. Knuth"}"#,
        )
        .unwrap();
        assert_eq!(course.course_code, "CS201");
        assert_eq!(course.credits, 4);
        assert!(course.description.is_none());
    }

    #[test]
    fn test_credit_range() {
        assert!(CourseDraft::CREDITS.contains(&1));
        assert!(CourseDraft::CREDITS.contains(&10));
        assert!(!CourseDraft::CREDITS.contains(&0));
        assert!(!CourseDraft::CREDITS.contains(&11));
    }
}
