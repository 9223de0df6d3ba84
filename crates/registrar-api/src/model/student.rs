use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A student record as returned by `GET /students`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    /// Assigned by the server when the student is created.
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
}

impl Student {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Upper-cased initials used for the avatar cell ("AL").
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Request body for `POST /students` and `PUT /students/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_reads_camel_case() {
        let student: Student = serde_json::from_str(
            r#"{"id":7,"firstName":"Ada","lastName":"Lovelace","email":"ada@x.com",
                "phone":"1234567890","dateOfBirth":"1815-12-10","address":null,
                "enrollmentDate":"2024-09-01"}"#,
        )
        .unwrap();

        assert_eq!(student.id, 7);
        assert_eq!(student.full_name(), "Ada Lovelace");
        assert_eq!(student.date_of_birth, NaiveDate::from_ymd_opt(1815, 12, 10));
        assert!(student.address.is_none());
    }

    #[test]
    fn test_student_tolerates_missing_optionals() {
        let student: Student = serde_json::from_str(
            r#"{"id":1,"firstName":"Alan","lastName":"Turing","email":"alan@x.com"}"#,
        )
        .unwrap();
        assert!(student.phone.is_none());
        assert!(student.enrollment_date.is_none());
    }

    #[test]
    fn test_initials() {
        let student: Student = serde_json::from_str(
            r#"{"id":1,"firstName":"grace","lastName":"hopper","email":"g@x.com"}"#,
        )
        .unwrap();
        assert_eq!(student.initials(), "GH");
    }

    #[test]
    fn test_draft_sends_nulls_for_blank_optionals() {
        let draft = StudentDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@x.com".into(),
            phone: "1234567890".into(),
            date_of_birth: None,
            address: None,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert!(json["dateOfBirth"].is_null());
        assert!(json.get("id").is_none());
    }
}
