//! Courses command implementation.

use anyhow::Result;
use clap::{Args, Subcommand};
use registrar_console::{FormData, Page};

use super::common::{RecordOp, Target, form_from, run_record_op};

#[derive(Subcommand, Debug)]
pub enum CourseAction {
    /// List courses
    List {
        /// Only show courses whose name, code or instructor contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one course
    Show { id: i64 },

    /// Add a course; missing required fields are prompted for
    Add(#[command(flatten)] CourseFields),

    /// Edit a course; without field flags every field is prompted for
    Edit {
        id: i64,

        #[command(flatten)]
        fields: CourseFields,
    },

    /// Delete a course
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct CourseFields {
    #[arg(long = "name")]
    course_name: Option<String>,

    #[arg(long = "code")]
    course_code: Option<String>,

    /// Whole number from 1 to 10
    #[arg(long)]
    credits: Option<String>,

    #[arg(long)]
    instructor: Option<String>,

    #[arg(long)]
    description: Option<String>,
}

impl CourseFields {
    fn form(&self) -> FormData {
        form_from(&[
            ("courseName", &self.course_name),
            ("courseCode", &self.course_code),
            ("credits", &self.credits),
            ("instructor", &self.instructor),
            ("description", &self.description),
        ])
    }
}

/// Execute a courses subcommand.
pub async fn execute(target: &Target, action: CourseAction) -> Result<()> {
    let op = match action {
        CourseAction::List { search } => RecordOp::List { search },
        CourseAction::Show { id } => RecordOp::Show(id),
        CourseAction::Add(fields) => RecordOp::Add(fields.form()),
        CourseAction::Edit { id, fields } => RecordOp::Edit(id, fields.form()),
        CourseAction::Delete { id, yes } => RecordOp::Delete { id, yes },
    };
    run_record_op(target, Page::Courses, "Course", op).await
}
