//! Dialogs answered from flags and terminal prompts.

use std::io;

use anyhow::{Result, bail};
use console::{Term, style};
use registrar_console::{Command, Dialog, DialogBody, DialogSlot, DialogSpec, FormData, FormField};
use tracing::debug;

/// How much to ask the user when completing a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompting {
    /// Never read input.
    Never,
    /// Ask only for required fields that are still blank.
    Missing,
    /// Ask for every field, offering its current value.
    All,
}

/// Source of answers to prompts. `None` means end of input.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Prompts on stderr, answers from stdin.
pub struct Stdin;

impl LineSource for Stdin {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Term::stderr().write_str(prompt)?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Dialog host for the terminal. Holds the open dialog until the command
/// driving it calls [`resolve`](Self::resolve).
#[derive(Debug, Default)]
pub struct CliDialog {
    slot: DialogSlot,
}

impl Dialog for CliDialog {
    fn open(&self, spec: DialogSpec) {
        debug!(title = %spec.title, "dialog opened");
        self.slot.open(spec);
    }

    fn close(&self) {
        self.slot.close();
    }
}

impl CliDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.slot.is_open()
    }

    /// Complete the open dialog and return the command of its submit action.
    ///
    /// `overrides` pre-fill form fields (command-line flags). Confirmations
    /// are accepted by `assume_yes` or a "y" answer. `Ok(None)` means the
    /// dialog was dismissed.
    pub fn resolve(
        &self,
        overrides: &FormData,
        prompting: Prompting,
        assume_yes: bool,
        input: &mut dyn LineSource,
    ) -> Result<Option<Command>> {
        let Some(spec) = self.slot.current() else {
            return Ok(None);
        };
        let Some(submit) = spec.default_action() else {
            return Ok(None);
        };

        match &spec.body {
            DialogBody::Message(text) => {
                if assume_yes {
                    return Ok(submit.select(&FormData::new()));
                }
                if prompting == Prompting::Never {
                    bail!("{} needs confirmation; pass --yes to proceed", spec.title);
                }
                let prompt = format!(
                    "{}\n{}\n{}? [y/N] ",
                    style(&spec.title).bold(),
                    text,
                    submit.label
                );
                let confirmed = input
                    .read_line(&prompt)?
                    .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"));
                Ok(confirmed.then(|| submit.select(&FormData::new())).flatten())
            }
            DialogBody::Form(fields) => {
                let mut form = spec.form_values();
                for (name, value) in overrides.iter() {
                    if !value.trim().is_empty() {
                        form.insert(name, value);
                    }
                }

                if prompting == Prompting::All {
                    eprintln!("{}", style(&spec.title).bold());
                }
                for field in fields {
                    let ask = match prompting {
                        Prompting::Never => false,
                        Prompting::Missing => field.required && form.get(field.name).is_empty(),
                        Prompting::All => true,
                    };
                    if !ask {
                        continue;
                    }
                    match ask_field(field, form.get(field.name), input)? {
                        Some(value) => form.insert(field.name, value),
                        None => return Ok(None),
                    }
                }
                Ok(submit.select(&form))
            }
        }
    }
}

/// Prompt for one field. An empty answer keeps `current`.
fn ask_field(field: &FormField, current: &str, input: &mut dyn LineSource) -> Result<Option<String>> {
    let options = field.options();
    for option in options {
        eprintln!("    {:>4}  {}", style(&option.value).cyan(), option.label);
    }

    let marker = if field.required { "*" } else { "" };
    let prompt = if current.is_empty() {
        format!("  {}{marker}: ", field.label)
    } else {
        format!("  {}{marker} [{}]: ", field.label, current)
    };

    let Some(answer) = input.read_line(&prompt)? else {
        return Ok(None);
    };
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(Some(current.to_string()));
    }

    // Select values are matched case-insensitively ("b+" picks "B+").
    let chosen = options
        .iter()
        .find(|option| option.value.eq_ignore_ascii_case(answer))
        .map_or(answer, |option| option.value.as_str());
    Ok(Some(chosen.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_console::{DialogAction, FieldKind, SelectOption};
    use std::collections::VecDeque;

    struct Scripted(VecDeque<&'static str>);

    impl Scripted {
        fn new(lines: &[&'static str]) -> Self {
            Self(lines.iter().copied().collect())
        }
    }

    impl LineSource for Scripted {
        fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
            Ok(self.0.pop_front().map(str::to_string))
        }
    }

    fn course_form() -> DialogSpec {
        DialogSpec::form(
            "Add Course",
            vec![
                FormField::text("courseName", "Course Name").required(),
                FormField::new("credits", "Credits", FieldKind::Number)
                    .required()
                    .with_value("3"),
                FormField::text("instructor", "Instructor"),
            ],
        )
        .with_action(DialogAction::cancel())
        .with_action(DialogAction::primary("Create Course", |form| {
            Some(Command::Create(form.clone()))
        }))
    }

    fn confirm() -> DialogSpec {
        DialogSpec::message("Delete Course", "Are you sure?")
            .with_action(DialogAction::cancel())
            .with_action(DialogAction::danger("Delete", |_| Some(Command::Remove(3))))
    }

    #[test]
    fn test_overrides_fill_form_without_prompting() {
        let dialog = CliDialog::new();
        dialog.open(course_form());

        let overrides = FormData::new().with("courseName", "Compilers").with("instructor", "");
        let command = dialog
            .resolve(&overrides, Prompting::Never, false, &mut Scripted::new(&[]))
            .unwrap();

        let Some(Command::Create(form)) = command else {
            panic!("expected create");
        };
        assert_eq!(form.get("courseName"), "Compilers");
        assert_eq!(form.get("credits"), "3");
        assert_eq!(form.get("instructor"), "");
    }

    #[test]
    fn test_missing_prompts_only_blank_required_fields() {
        let dialog = CliDialog::new();
        dialog.open(course_form());

        let mut input = Scripted::new(&["Algorithms"]);
        let command = dialog
            .resolve(&FormData::new(), Prompting::Missing, false, &mut input)
            .unwrap();
        let Some(Command::Create(form)) = command else {
            panic!("expected create");
        };
        assert_eq!(form.get("courseName"), "Algorithms");
        assert!(input.0.is_empty());
    }

    #[test]
    fn test_end_of_input_dismisses() {
        let dialog = CliDialog::new();
        dialog.open(course_form());
        let command = dialog
            .resolve(&FormData::new(), Prompting::All, false, &mut Scripted::new(&["X"]))
            .unwrap();
        assert_eq!(command, None);
    }

    #[test]
    fn test_select_answer_matches_option_value() {
        let dialog = CliDialog::new();
        dialog.open(
            DialogSpec::form(
                "Update Grade",
                vec![FormField::select(
                    "grade",
                    "Grade",
                    vec![SelectOption::new("A+", "A+"), SelectOption::new("B+", "B+")],
                )],
            )
            .with_action(DialogAction::primary("Save", |form| {
                Some(Command::Search(form.text("grade")))
            })),
        );
        let command = dialog
            .resolve(&FormData::new(), Prompting::All, false, &mut Scripted::new(&["b+"]))
            .unwrap();
        assert_eq!(command, Some(Command::Search("B+".into())));
    }

    #[test]
    fn test_confirmation() {
        let dialog = CliDialog::new();
        dialog.open(confirm());

        let none = FormData::new();
        assert_eq!(
            dialog
                .resolve(&none, Prompting::Never, true, &mut Scripted::new(&[]))
                .unwrap(),
            Some(Command::Remove(3))
        );
        assert!(
            dialog
                .resolve(&none, Prompting::Never, false, &mut Scripted::new(&[]))
                .is_err()
        );
        assert_eq!(
            dialog
                .resolve(&none, Prompting::Missing, false, &mut Scripted::new(&["n"]))
                .unwrap(),
            None
        );
        assert_eq!(
            dialog
                .resolve(&none, Prompting::Missing, false, &mut Scripted::new(&["y"]))
                .unwrap(),
            Some(Command::Remove(3))
        );
    }

    #[test]
    fn test_nothing_open() {
        let dialog = CliDialog::new();
        assert!(!dialog.is_open());
        let command = dialog
            .resolve(&FormData::new(), Prompting::All, true, &mut Scripted::new(&[]))
            .unwrap();
        assert_eq!(command, None);
    }
}
