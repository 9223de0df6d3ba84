//! Courses page.

use std::convert::Infallible;

use registrar_api::{Course, CourseDraft};

use crate::command::Command;
use crate::form::{FieldKind, FormData, FormField, ValidationError};
use crate::resource::{Editable, Resource};
use crate::router::Page;
use crate::view::{Cell, RowAction, TableRow, Tone};

/// Marker for the courses collection.
#[derive(Debug)]
pub struct Courses;

fn contains(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}

impl Resource for Courses {
    type Item = Course;
    type Draft = CourseDraft;
    type Facet = Infallible;

    const PAGE: Page = Page::Courses;
    const PATH: &'static str = "/courses";
    const NOUN: &'static str = "course";
    const EMPTY: &'static str = "No courses found";
    const CREATED: &'static str = "Course created!";
    const DELETED: &'static str = "Course deleted";

    fn id(item: &Course) -> i64 {
        item.id
    }

    fn label(item: &Course) -> String {
        format!("{} ({})", item.course_name, item.course_code)
    }

    fn matches(item: &Course, needle: &str) -> bool {
        contains(Some(&item.course_name), needle)
            || contains(Some(&item.course_code), needle)
            || contains(item.instructor.as_deref(), needle)
    }

    fn columns() -> Vec<&'static str> {
        vec![
            "Course Name",
            "Code",
            "Credits",
            "Instructor",
            "Description",
            "Actions",
        ]
    }

    fn row(item: &Course) -> TableRow {
        TableRow {
            id: item.id,
            cells: vec![
                Cell::text(&item.course_name),
                Cell::Badge {
                    text: item.course_code.clone(),
                    tone: Tone::Blue,
                },
                Cell::mono(Some(item.credits)),
                Cell::muted(item.instructor.as_ref()),
                Cell::muted(item.description.as_ref()),
            ],
            actions: vec![
                RowAction::new("Edit", Command::OpenEdit(item.id)),
                RowAction::danger("Delete", Command::ConfirmRemove(item.id)),
            ],
        }
    }

    fn draft(form: &FormData) -> Result<CourseDraft, ValidationError> {
        form.require(
            &["courseName", "courseCode", "credits"],
            "Please fill all required fields",
        )?;
        Ok(CourseDraft {
            course_name: form.text("courseName"),
            course_code: form.text("courseCode"),
            credits: form.number("credits", "Credits", CourseDraft::CREDITS)?,
            instructor: form.optional("instructor"),
            description: form.optional("description"),
        })
    }
}

impl Editable for Courses {
    const UPDATED: &'static str = "Course updated!";
    const CREATE_TITLE: &'static str = "Add Course";
    const CREATE_LABEL: &'static str = "Create Course";
    const EDIT_TITLE: &'static str = "Edit Course";

    fn form(item: Option<&Course>) -> Vec<FormField> {
        vec![
            FormField::text("courseName", "Course Name")
                .required()
                .with_optional(item.map(|c| &c.course_name)),
            FormField::text("courseCode", "Course Code")
                .required()
                .with_optional(item.map(|c| &c.course_code)),
            FormField::new("credits", "Credits", FieldKind::Number)
                .required()
                .with_optional(item.map(|c| c.credits)),
            FormField::text("instructor", "Instructor")
                .with_optional(item.and_then(|c| c.instructor.as_ref())),
            FormField::new("description", "Description", FieldKind::TextArea)
                .with_optional(item.and_then(|c| c.description.as_ref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::apply_filters;

    fn course(id: i64, name: &str, code: &str, instructor: Option<&str>) -> Course {
        Course {
            id,
            course_name: name.into(),
            course_code: code.into(),
            credits: 4,
            instructor: instructor.map(Into::into),
            description: None,
        }
    }

    #[test]
    fn test_search_spans_name_code_and_instructor() {
        let items = vec![
            course(1, "Algorithms", "CS201", Some("Dr. Knuth")),
            course(2, "Compilers", "CS301", None),
        ];
        let ids = |q: &str| {
            apply_filters::<Courses>(&items, q, None)
                .iter()
                .map(|c| c.id)
                .collect::<Vec<_>>()
        };

        assert_eq!(ids("knuth"), vec![1]);
        assert_eq!(ids("cs3"), vec![2]);
        assert_eq!(ids("COMP"), vec![2]);
        assert_eq!(ids("cs"), vec![1, 2]);
    }

    #[test]
    fn test_credits_must_be_a_number_in_range() {
        let base = FormData::new()
            .with("courseName", "Algorithms")
            .with("courseCode", "CS201");

        let err = Courses::draft(&base.clone().with("credits", "four")).unwrap_err();
        assert_eq!(err.to_string(), "Credits must be a whole number");

        let err = Courses::draft(&base.clone().with("credits", "0")).unwrap_err();
        assert_eq!(err.to_string(), "Credits must be between 1 and 10");

        let draft = Courses::draft(&base.with("credits", "4")).unwrap();
        assert_eq!(draft.credits, 4);
        assert_eq!(draft.instructor, None);
    }

    #[test]
    fn test_code_renders_as_badge() {
        let row = Courses::row(&course(1, "Algorithms", "CS201", None));
        assert_eq!(
            row.cells[1],
            Cell::Badge {
                text: "CS201".into(),
                tone: Tone::Blue
            }
        );
        assert_eq!(row.cells[3].plain(), "—");
    }
}
