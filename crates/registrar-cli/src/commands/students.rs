//! Students command implementation.

use anyhow::Result;
use clap::{Args, Subcommand};
use registrar_console::{FormData, Page};

use super::common::{RecordOp, Target, form_from, run_record_op};

#[derive(Subcommand, Debug)]
pub enum StudentAction {
    /// List students
    List {
        /// Only show students whose name or email contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one student
    Show { id: i64 },

    /// Add a student; missing required fields are prompted for
    Add(#[command(flatten)] StudentFields),

    /// Edit a student; without field flags every field is prompted for
    Edit {
        id: i64,

        #[command(flatten)]
        fields: StudentFields,
    },

    /// Delete a student
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct StudentFields {
    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// Ten digits
    #[arg(long)]
    phone: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    date_of_birth: Option<String>,

    #[arg(long)]
    address: Option<String>,
}

impl StudentFields {
    fn form(&self) -> FormData {
        form_from(&[
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("dateOfBirth", &self.date_of_birth),
            ("address", &self.address),
        ])
    }
}

/// Execute a students subcommand.
pub async fn execute(target: &Target, action: StudentAction) -> Result<()> {
    let op = match action {
        StudentAction::List { search } => RecordOp::List { search },
        StudentAction::Show { id } => RecordOp::Show(id),
        StudentAction::Add(fields) => RecordOp::Add(fields.form()),
        StudentAction::Edit { id, fields } => RecordOp::Edit(id, fields.form()),
        StudentAction::Delete { id, yes } => RecordOp::Delete { id, yes },
    };
    run_record_op(target, Page::Students, "Student", op).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_use_wire_names() {
        let fields = StudentFields {
            first_name: Some("Ada".into()),
            date_of_birth: Some("1815-12-10".into()),
            ..Default::default()
        };
        let form = fields.form();
        assert_eq!(form.get("firstName"), "Ada");
        assert_eq!(form.get("dateOfBirth"), "1815-12-10");
        assert_eq!(form.iter().count(), 2);
    }
}
