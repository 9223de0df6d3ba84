//! Students page.

use std::convert::Infallible;

use registrar_api::{Student, StudentDraft};

use crate::command::Command;
use crate::form::{FieldKind, FormData, FormField, ValidationError};
use crate::resource::{Editable, Resource};
use crate::router::Page;
use crate::view::{Cell, RowAction, TableRow};

/// Marker for the students collection.
#[derive(Debug)]
pub struct Students;

const REQUIRED: &str = "Please fill all required fields";

impl Resource for Students {
    type Item = Student;
    type Draft = StudentDraft;
    type Facet = Infallible;

    const PAGE: Page = Page::Students;
    const PATH: &'static str = "/students";
    const NOUN: &'static str = "student";
    const EMPTY: &'static str = "No students found";
    const CREATED: &'static str = "Student created successfully!";
    const DELETED: &'static str = "Student deleted";

    fn id(item: &Student) -> i64 {
        item.id
    }

    fn label(item: &Student) -> String {
        item.full_name()
    }

    fn matches(item: &Student, needle: &str) -> bool {
        item.full_name().to_lowercase().contains(needle)
            || item.email.to_lowercase().contains(needle)
    }

    fn columns() -> Vec<&'static str> {
        vec![
            "Student",
            "Email",
            "Phone",
            "Date of Birth",
            "Enrolled On",
            "Actions",
        ]
    }

    fn row(item: &Student) -> TableRow {
        TableRow {
            id: item.id,
            cells: vec![
                Cell::Person {
                    initials: item.initials(),
                    name: item.full_name(),
                    sub: format!("#{}", item.id),
                },
                Cell::Mono(Some(item.email.clone())),
                Cell::muted(item.phone.as_ref()),
                Cell::mono(item.date_of_birth),
                Cell::mono(item.enrollment_date),
            ],
            actions: vec![
                RowAction::new("Edit", Command::OpenEdit(item.id)),
                RowAction::danger("Delete", Command::ConfirmRemove(item.id)),
            ],
        }
    }

    fn draft(form: &FormData) -> Result<StudentDraft, ValidationError> {
        form.require(&["firstName", "lastName", "email", "phone"], REQUIRED)?;
        Ok(StudentDraft {
            first_name: form.text("firstName"),
            last_name: form.text("lastName"),
            email: form.text("email"),
            phone: form.text("phone"),
            date_of_birth: form.date("dateOfBirth", "Date of birth")?,
            address: form.optional("address"),
        })
    }
}

impl Editable for Students {
    const UPDATED: &'static str = "Student updated!";
    const CREATE_TITLE: &'static str = "Add Student";
    const CREATE_LABEL: &'static str = "Create Student";
    const EDIT_TITLE: &'static str = "Edit Student";

    fn form(item: Option<&Student>) -> Vec<FormField> {
        vec![
            FormField::text("firstName", "First Name")
                .required()
                .with_optional(item.map(|s| &s.first_name)),
            FormField::text("lastName", "Last Name")
                .required()
                .with_optional(item.map(|s| &s.last_name)),
            FormField::new("email", "Email", FieldKind::Email)
                .required()
                .with_optional(item.map(|s| &s.email)),
            FormField::text("phone", "Phone")
                .required()
                .with_optional(item.and_then(|s| s.phone.as_ref())),
            FormField::new("dateOfBirth", "Date of Birth", FieldKind::Date)
                .with_optional(item.and_then(|s| s.date_of_birth)),
            FormField::new("address", "Address", FieldKind::TextArea)
                .with_optional(item.and_then(|s| s.address.as_ref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::apply_filters;

    fn student(id: i64, first: &str, last: &str, email: &str) -> Student {
        Student {
            id,
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            phone: None,
            date_of_birth: None,
            address: None,
            enrollment_date: None,
        }
    }

    #[test]
    fn test_search_spans_full_name_and_email() {
        let items = vec![
            student(1, "Ada", "Lovelace", "ada@x.com"),
            student(2, "Alan", "Turing", "alan@bletchley.uk"),
        ];
        let ids = |q: &str| {
            apply_filters::<Students>(&items, q, None)
                .iter()
                .map(|s| s.id)
                .collect::<Vec<_>>()
        };

        assert_eq!(ids("a l"), vec![1]);
        assert_eq!(ids("BLETCH"), vec![2]);
        assert_eq!(ids(""), vec![1, 2]);
        assert!(ids("zzz").is_empty());
    }

    #[test]
    fn test_draft_requires_fields() {
        let form = FormData::new()
            .with("firstName", "Ada")
            .with("lastName", "Lovelace")
            .with("email", "ada@x.com");
        let err = Students::draft(&form).unwrap_err();
        assert_eq!(err.to_string(), REQUIRED);
    }

    #[test]
    fn test_draft_nulls_blank_optionals() {
        let form = FormData::new()
            .with("firstName", " Ada ")
            .with("lastName", "Lovelace")
            .with("email", "ada@x.com")
            .with("phone", "1234567890")
            .with("address", "   ");
        let draft = Students::draft(&form).unwrap();
        assert_eq!(draft.first_name, "Ada");
        assert_eq!(draft.address, None);
        assert_eq!(draft.date_of_birth, None);
    }

    #[test]
    fn test_edit_form_is_prefilled() {
        let ada = student(1, "Ada", "Lovelace", "ada@x.com");
        let fields = Students::form(Some(&ada));
        assert_eq!(fields[0].value, "Ada");
        assert_eq!(fields[2].value, "ada@x.com");
        assert!(fields[3].value.is_empty());
        assert!(Students::form(None).iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_row_actions() {
        let row = Students::row(&student(7, "Ada", "Lovelace", "ada@x.com"));
        assert_eq!(row.actions[0].command, Command::OpenEdit(7));
        assert_eq!(row.actions[1].command, Command::ConfirmRemove(7));
        assert!(row.actions[1].danger);
        assert_eq!(row.cells[0].plain(), "Ada Lovelace");
    }
}
