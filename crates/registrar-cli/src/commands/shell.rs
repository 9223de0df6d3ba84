//! Shell command implementation.
//!
//! An interactive loop over the console: one page at a time, row actions
//! typed as commands, dialogs answered at the prompt.

use anyhow::{Result, bail};
use console::style;
use registrar_api::{EnrollmentStatus, Grade};
use registrar_console::{Command, Dialog, FormData, Page};
use tracing::debug;

use super::common::{Session, Target, report_error};
use crate::ui::{LineSource, Prompting, Stdin};

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Run(Command),
    Help,
    Quit,
    Nothing,
}

const HELP: &[(&str, &str)] = &[
    ("dashboard | students | courses | enrollments", "switch page"),
    ("refresh", "reload the current page"),
    ("search [TEXT]", "filter rows by text (empty clears)"),
    ("filter STATUS|all", "filter enrollments by status"),
    ("add", "open the create form"),
    ("edit ID", "edit a student or course"),
    ("delete ID", "delete a record after confirmation"),
    ("grade ID [GRADE]", "record an enrollment grade"),
    ("status ID [STATUS]", "change an enrollment status"),
    ("help", "show this list"),
    ("quit", "leave the shell"),
];

fn id(arg: Option<&str>, usage: &str) -> Result<i64> {
    match arg.map(str::parse::<i64>) {
        Some(Ok(id)) => Ok(id),
        Some(Err(_)) | None => bail!("Usage: {usage}"),
    }
}

/// Parse one line typed at the shell prompt.
pub fn parse_line(line: &str) -> Result<Input> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(Input::Nothing),
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" | "q" => return Ok(Input::Quit),
        "go" => Command::Navigate(rest.parse::<Page>()?),
        "refresh" | "r" => Command::Refresh,
        "search" => Command::Search(rest.to_string()),
        "filter" => match rest {
            "" | "all" => Command::FilterStatus(None),
            status => Command::FilterStatus(Some(status.parse::<EnrollmentStatus>()?)),
        },
        "add" | "new" => Command::OpenCreate,
        "edit" => Command::OpenEdit(id(args.next(), "edit ID")?),
        "delete" | "rm" => Command::ConfirmRemove(id(args.next(), "delete ID")?),
        "grade" => {
            let id = id(args.next(), "grade ID [GRADE]")?;
            match args.next() {
                Some(grade) => Command::SetGrade(id, grade.parse::<Grade>()?),
                None => Command::OpenGrade(id),
            }
        }
        "status" => {
            let id = id(args.next(), "status ID [STATUS]")?;
            match args.next() {
                Some(status) => Command::SetStatus(id, status.parse::<EnrollmentStatus>()?),
                None => Command::OpenStatus(id),
            }
        }
        "close" => Command::CloseDialog,
        other => match other.parse::<Page>() {
            Ok(page) => Command::Navigate(page),
            Err(_) => bail!("Unknown command '{other}'. Type 'help' for a list."),
        },
    };
    Ok(Input::Run(command))
}

fn print_help() {
    println!("{} Commands:\n", style("→").cyan().bold());
    for (usage, what) in HELP {
        println!("  {:<46} {}", style(usage).bold(), style(what).dim());
    }
}

/// Execute the shell command.
pub async fn execute(target: &Target) -> Result<()> {
    let mut session = Session::open(target, true)?;
    println!(
        "{} Registrar shell. Type {} for commands.",
        style("→").cyan().bold(),
        style("help").bold()
    );

    if let Err(e) = session.app.start().await {
        debug!(error = %e, "dashboard unavailable");
    }

    let mut input = Stdin;
    loop {
        let prompt = format!(
            "{} ",
            style(format!("registrar:{}>", session.app.active_page()))
                .cyan()
                .bold()
        );
        let Some(line) = input.read_line(&prompt)? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(Input::Run(command)) => command,
            Ok(Input::Help) => {
                print_help();
                continue;
            }
            Ok(Input::Quit) => break,
            Ok(Input::Nothing) => continue,
            Err(e) => {
                report_error(&e);
                continue;
            }
        };

        if let Err(e) = session.dispatch(command).await {
            report_error(&e);
            continue;
        }
        if session.dialog.is_open() {
            if let Err(e) = session.submit(&FormData::new(), Prompting::All, false).await {
                report_error(&e);
                session.dialog.close();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str) -> Command {
        match parse_line(line).unwrap() {
            Input::Run(command) => command,
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn test_navigation() {
        assert_eq!(run("students"), Command::Navigate(Page::Students));
        assert_eq!(run("go Courses"), Command::Navigate(Page::Courses));
        assert!(parse_line("go nowhere").is_err());
    }

    #[test]
    fn test_search_keeps_spaces() {
        assert_eq!(run("search  grace hopper "), Command::Search("grace hopper".into()));
        assert_eq!(run("search"), Command::Search(String::new()));
    }

    #[test]
    fn test_filter() {
        assert_eq!(
            run("filter dropped"),
            Command::FilterStatus(Some(EnrollmentStatus::Dropped))
        );
        assert_eq!(run("filter all"), Command::FilterStatus(None));
        assert!(parse_line("filter paused").is_err());
    }

    #[test]
    fn test_row_actions() {
        assert_eq!(run("edit 4"), Command::OpenEdit(4));
        assert_eq!(run("delete 2"), Command::ConfirmRemove(2));
        assert_eq!(run("grade 3"), Command::OpenGrade(3));
        assert_eq!(run("grade 3 b+"), Command::SetGrade(3, Grade::BPlus));
        assert_eq!(run("status 3 completed"), Command::SetStatus(3, EnrollmentStatus::Completed));
        assert!(parse_line("edit").is_err());
        assert!(parse_line("delete x").is_err());
        assert!(parse_line("grade 3 E").is_err());
    }

    #[test]
    fn test_control_words() {
        assert_eq!(parse_line("   ").unwrap(), Input::Nothing);
        assert_eq!(parse_line("help").unwrap(), Input::Help);
        assert_eq!(parse_line("exit").unwrap(), Input::Quit);
        assert_eq!(run("add"), Command::OpenCreate);
        assert_eq!(run("r"), Command::Refresh);
        let err = parse_line("launch").unwrap_err();
        assert!(err.to_string().contains("Unknown command 'launch'"));
    }
}
