//! Enrollments page.
//!
//! Enrollments are never edited through a full form. New ones are created
//! from a student/course picker, and grade and status each have their own
//! dialog and PATCH endpoint.

use registrar_api::{
    ApiRequest, ApiResult, Course, Enrollment, EnrollmentDraft, EnrollmentStatus, Grade, Student,
    fetch_list,
};
use tracing::{info, instrument, warn};

use crate::command::Command;
use crate::context::Context;
use crate::controller::Controller;
use crate::dialog::{DialogAction, DialogSpec};
use crate::form::{FormData, FormField, SelectOption, ValidationError};
use crate::notify::Level;
use crate::resource::Resource;
use crate::router::Page;
use crate::view::{Cell, RowAction, TableRow, Tone};

/// Marker for the enrollments collection.
#[derive(Debug)]
pub struct Enrollments;

pub const GRADE_UPDATED: &str = "Grade updated!";
pub const STATUS_UPDATED: &str = "Status updated!";
pub const PICKER_FAILED: &str = "Could not load students or courses";
const PICK_BOTH: &str = "Please select both a student and a course";

impl Resource for Enrollments {
    type Item = Enrollment;
    type Draft = EnrollmentDraft;
    type Facet = EnrollmentStatus;

    const PAGE: Page = Page::Enrollments;
    const PATH: &'static str = "/enrollments";
    const NOUN: &'static str = "enrollment";
    const EMPTY: &'static str = "No enrollments found";
    const CREATED: &'static str = "Student enrolled successfully!";
    const DELETED: &'static str = "Enrollment deleted";

    fn id(item: &Enrollment) -> i64 {
        item.id
    }

    fn label(item: &Enrollment) -> String {
        format!("#{}", item.id)
    }

    /// Matches the denormalized names only; missing names never match.
    fn matches(item: &Enrollment, needle: &str) -> bool {
        [&item.student_name, &item.course_name]
            .into_iter()
            .flatten()
            .any(|name| name.to_lowercase().contains(needle))
    }

    fn facet(item: &Enrollment) -> Option<EnrollmentStatus> {
        Some(item.status)
    }

    fn columns() -> Vec<&'static str> {
        vec![
            "#", "Student", "Course", "Status", "Grade", "Date", "Actions",
        ]
    }

    fn row(item: &Enrollment) -> TableRow {
        TableRow {
            id: item.id,
            cells: vec![
                Cell::mono(Some(item.id)),
                Cell::text(item.student_label()),
                Cell::Muted(Some(item.course_label())),
                Cell::Badge {
                    text: item.status.to_string(),
                    tone: Tone::from(item.status),
                },
                Cell::mono(item.grade.as_deref()),
                Cell::mono(item.enrollment_date),
            ],
            actions: vec![
                RowAction::new("Grade", Command::OpenGrade(item.id)),
                RowAction::new("Status", Command::OpenStatus(item.id)),
                RowAction::danger("Delete", Command::ConfirmRemove(item.id)),
            ],
        }
    }

    fn draft(form: &FormData) -> Result<EnrollmentDraft, ValidationError> {
        form.require(&["studentId", "courseId"], PICK_BOTH)?;
        Ok(EnrollmentDraft {
            student_id: form.id("studentId", "Student")?,
            course_id: form.id("courseId", "Course")?,
        })
    }

    fn confirm_text(id: i64, _item: Option<&Enrollment>) -> (String, String) {
        (
            "Delete Enrollment".to_string(),
            format!("Delete enrollment #{id}? This cannot be undone."),
        )
    }
}

fn student_option(student: &Student) -> SelectOption {
    SelectOption::new(student.id.to_string(), student.full_name())
}

fn course_option(course: &Course) -> SelectOption {
    SelectOption::new(
        course.id.to_string(),
        format!("{} ({})", course.course_name, course.course_code),
    )
}

impl Controller<Enrollments> {
    /// Load students and courses side by side and open the enroll picker.
    #[instrument(skip_all)]
    pub async fn open_enroll(&self, ctx: &Context) -> ApiResult<()> {
        let (students, courses) = futures::join!(
            fetch_list::<Student>(ctx.transport(), "/students"),
            fetch_list::<Course>(ctx.transport(), "/courses"),
        );
        let (students, courses) = match (students, courses) {
            (Ok(students), Ok(courses)) => (students, courses),
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, "enroll picker failed");
                ctx.notifier.notify(PICKER_FAILED, Level::Error);
                return Err(err);
            }
        };

        let fields = vec![
            FormField::select(
                "studentId",
                "Student",
                students.iter().map(student_option).collect(),
            )
            .required(),
            FormField::select(
                "courseId",
                "Course",
                courses.iter().map(course_option).collect(),
            )
            .required(),
        ];
        ctx.dialog.open(
            DialogSpec::form("Enroll Student", fields)
                .with_action(DialogAction::cancel())
                .with_action(DialogAction::primary("Enroll", |form| {
                    Some(Command::Create(form.clone()))
                })),
        );
        Ok(())
    }

    /// Open the grade picker, pre-selecting the current grade if known.
    pub fn open_grade(&self, ctx: &Context, id: i64) {
        let current = self.find(id).and_then(Enrollment::known_grade);
        let options = Grade::ALL
            .iter()
            .map(|g| SelectOption::new(g.as_str(), g.as_str()))
            .collect();
        let field = FormField::select("grade", "Select Grade", options).with_optional(current);

        ctx.dialog.open(
            DialogSpec::form("Update Grade", vec![field])
                .with_action(DialogAction::cancel())
                .with_action(DialogAction::primary("Update Grade", move |form| {
                    form.get("grade")
                        .parse()
                        .ok()
                        .map(|grade| Command::SetGrade(id, grade))
                })),
        );
    }

    /// Open the status picker, pre-selecting the current status if known.
    pub fn open_status(&self, ctx: &Context, id: i64) {
        let current = self.find(id).map(|e| e.status);
        let options = EnrollmentStatus::ALL
            .iter()
            .map(|s| SelectOption::new(s.as_str(), s.as_str()))
            .collect();
        let field = FormField::select("status", "Select Status", options).with_optional(current);

        ctx.dialog.open(
            DialogSpec::form("Update Status", vec![field])
                .with_action(DialogAction::cancel())
                .with_action(DialogAction::primary("Update Status", move |form| {
                    form.get("status")
                        .parse()
                        .ok()
                        .map(|status| Command::SetStatus(id, status))
                })),
        );
    }

    /// PATCH the grade of enrollment `id`.
    #[instrument(skip(self, ctx))]
    pub async fn set_grade(&mut self, ctx: &Context, id: i64, grade: Grade) -> ApiResult<()> {
        let request = ApiRequest::patch(format!("{}/{id}/grade", Enrollments::PATH))
            .with_query("grade", grade.as_str());
        ctx.transport()
            .call(request)
            .await
            .map_err(|e| ctx.fail(e))?;

        info!("enrollment {id} graded {grade}");
        self.after_mutation(ctx, GRADE_UPDATED).await
    }

    /// PATCH the status of enrollment `id`.
    #[instrument(skip(self, ctx))]
    pub async fn set_status(
        &mut self,
        ctx: &Context,
        id: i64,
        status: EnrollmentStatus,
    ) -> ApiResult<()> {
        let request = ApiRequest::patch(format!("{}/{id}/status", Enrollments::PATH))
            .with_query("status", status.as_str());
        ctx.transport()
            .call(request)
            .await
            .map_err(|e| ctx.fail(e))?;

        info!("enrollment {id} now {status}");
        self.after_mutation(ctx, STATUS_UPDATED).await
    }
}
