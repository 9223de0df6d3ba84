//! Notifications as status lines on stderr.

use console::style;
use registrar_console::{Level, Notifier};

/// Prints each notification on its own line.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliNotifier;

/// One status line for `message`.
pub fn format_line(message: &str, level: Level) -> String {
    match level {
        Level::Success => format!("{} {}", style("✓").green().bold(), message),
        Level::Error => format!("{} {}", style("✗").red().bold(), style(message).red()),
        Level::Info => format!("{} {}", style("·").cyan().bold(), message),
    }
}

impl Notifier for CliNotifier {
    fn notify(&self, message: &str, level: Level) {
        eprintln!("{}", format_line(message, level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_by_level() {
        console::set_colors_enabled(false);
        assert_eq!(format_line("Course created!", Level::Success), "✓ Course created!");
        assert_eq!(format_line("Error 500", Level::Error), "✗ Error 500");
        assert_eq!(format_line("Cancelled", Level::Info), "· Cancelled");
    }
}
