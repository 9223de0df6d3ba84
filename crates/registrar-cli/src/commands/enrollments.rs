//! Enrollments command implementation.

use anyhow::Result;
use clap::Subcommand;
use registrar_api::{EnrollmentStatus, Grade};
use registrar_console::{Command, FormData, Page};

use super::common::{Session, Target, prompting_if_terminal};
use crate::ui::Prompting;

#[derive(Subcommand, Debug)]
pub enum EnrollmentAction {
    /// List enrollments
    List {
        /// Only show enrollments whose student or course name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only show enrollments in this status (active, completed, dropped)
        #[arg(long)]
        status: Option<EnrollmentStatus>,
    },

    /// Enroll a student in a course; missing ids are picked interactively
    Add {
        /// Student id
        #[arg(long)]
        student: Option<i64>,

        /// Course id
        #[arg(long)]
        course: Option<i64>,
    },

    /// Record a grade (A+, A, B+, B, C+, C, D, F)
    Grade { id: i64, grade: Grade },

    /// Change the status (active, completed, dropped)
    Status { id: i64, status: EnrollmentStatus },

    /// Delete an enrollment
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute an enrollments subcommand.
pub async fn execute(target: &Target, action: EnrollmentAction) -> Result<()> {
    let mut session = Session::open(target, false)?;
    session.visit(Page::Enrollments).await?;

    match action {
        EnrollmentAction::List { search, status } => {
            if let Some(text) = search {
                session.dispatch(Command::Search(text)).await?;
            }
            if status.is_some() {
                session.dispatch(Command::FilterStatus(status)).await?;
            }
            session.screen.present();
        }
        EnrollmentAction::Add { student, course } => {
            session.dispatch(Command::OpenCreate).await?;
            let mut form = FormData::new();
            if let Some(id) = student {
                form.insert("studentId", id.to_string());
            }
            if let Some(id) = course {
                form.insert("courseId", id.to_string());
            }
            let prompting = prompting_if_terminal(Prompting::Missing);
            session.submit(&form, prompting, false).await?;
        }
        EnrollmentAction::Grade { id, grade } => {
            session.dispatch(Command::SetGrade(id, grade)).await?;
        }
        EnrollmentAction::Status { id, status } => {
            session.dispatch(Command::SetStatus(id, status)).await?;
        }
        EnrollmentAction::Delete { id, yes } => {
            session.dispatch(Command::ConfirmRemove(id)).await?;
            let prompting = prompting_if_terminal(Prompting::Missing);
            session.submit(&FormData::new(), prompting, yes).await?;
        }
    }
    Ok(())
}
