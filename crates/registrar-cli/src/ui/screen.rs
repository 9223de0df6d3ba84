//! Terminal rendering of console views.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use console::{Alignment, StyledObject, measure_text_width, pad_str, style};
use indicatif::{ProgressBar, ProgressStyle};
use registrar_console::{Cell, DashboardView, Page, Screen, TableView, Tone, View};

#[derive(Default)]
struct State {
    spinner: Option<ProgressBar>,
    last: Option<View>,
    active: Page,
    badges: BTreeMap<Page, usize>,
}

impl State {
    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

/// Screen that prints frames to stdout.
///
/// Loading frames become a spinner on stderr. A live screen (the shell)
/// prints every other frame as it arrives; otherwise only the latest frame
/// is kept until [`present`](Self::present) prints it.
pub struct CliScreen {
    live: bool,
    state: Mutex<State>,
}

impl CliScreen {
    pub fn new(live: bool) -> Self {
        Self {
            live,
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Print the latest frame, if any.
    pub fn present(&self) {
        let mut state = self.state();
        state.stop_spinner();
        if let Some(view) = &state.last {
            println!("{}", render(view));
        }
    }

    /// Navigation bar with record counts, active page highlighted.
    pub fn nav(&self) -> String {
        let state = self.state();
        let items: Vec<String> = Page::ALL
            .iter()
            .map(|page| {
                let label = match state.badges.get(page) {
                    Some(count) if page.has_badge() => format!("{} ({count})", page.title()),
                    _ => page.title().to_string(),
                };
                if *page == state.active {
                    style(label).cyan().bold().underlined().to_string()
                } else {
                    style(label).dim().to_string()
                }
            })
            .collect();
        format!("  {}", items.join("   "))
    }
}

impl Screen for CliScreen {
    fn clear(&self) {
        let mut state = self.state();
        state.stop_spinner();
        state.last = None;
    }

    fn set_active(&self, page: Page) {
        self.state().active = page;
    }

    fn set_badge(&self, page: Page, count: usize) {
        self.state().badges.insert(page, count);
    }

    fn draw(&self, view: &View) {
        let mut state = self.state();
        state.stop_spinner();

        if let View::Loading(page) = view {
            let spinner = ProgressBar::new_spinner();
            if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                spinner.set_style(template);
            }
            spinner.set_message(format!("Loading {}...", page.title().to_lowercase()));
            spinner.enable_steady_tick(Duration::from_millis(100));
            state.spinner = Some(spinner);
            return;
        }

        state.last = Some(view.clone());
        drop(state);
        if self.live {
            println!("{}\n{}", self.nav(), render(view));
        }
    }
}

/// Render a frame as terminal text.
pub fn render(view: &View) -> String {
    match view {
        View::Loading(page) => format!("  Loading {}...", page.title().to_lowercase()),
        View::Table { page, table } => {
            let count = table.rows.len();
            format!(
                "\n{} {} ({count}):\n\n{}",
                style("→").cyan().bold(),
                page.title(),
                render_table(table)
            )
        }
        View::Failed { page, message } => format!(
            "\n  {} {}",
            style(format!("Could not load {}:", page.title().to_lowercase())).red(),
            message
        ),
        View::Dashboard(dashboard) => render_dashboard(dashboard),
    }
}

fn tone(text: &str, tone: Tone) -> StyledObject<&str> {
    match tone {
        Tone::Green => style(text).green(),
        Tone::Blue => style(text).blue(),
        Tone::Red => style(text).red(),
        Tone::Yellow => style(text).yellow(),
    }
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Muted(_) => style(cell.plain()).dim().to_string(),
        Cell::Mono(_) => style(cell.plain()).cyan().to_string(),
        Cell::Badge { text, tone: t } => tone(text, *t).bold().to_string(),
        Cell::Person {
            initials,
            name,
            sub,
        } => format!(
            "{} {} {}",
            style(initials).magenta().bold(),
            name,
            style(sub).dim()
        ),
    }
}

/// Render a table with a header row and a rule, or its empty message.
pub fn render_table(table: &TableView) -> String {
    if table.is_empty() {
        return format!("  {}", style(table.empty_message).dim());
    }

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let mut cells: Vec<String> = row.cells.iter().map(render_cell).collect();
            let actions: Vec<String> = row
                .actions
                .iter()
                .map(|action| {
                    if action.danger {
                        style(action.label).red().to_string()
                    } else {
                        style(action.label).dim().to_string()
                    }
                })
                .collect();
            cells.push(actions.join(" "));
            cells
        })
        .collect();

    // Row cells exclude the trailing "Actions" column; the action labels
    // fill it.
    let columns = &table.columns;
    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| measure_text_width(cell))
                .chain(std::iter::once(columns[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, None).into_owned())
            .collect();
        format!("  {}", padded.join("  ").trim_end())
    };

    let header: Vec<String> = columns
        .iter()
        .map(|column| style(column.to_uppercase()).bold().to_string())
        .collect();
    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

    let mut out = vec![line(&header), format!("  {}", "-".repeat(total))];
    out.extend(rows.iter().map(|row| line(row)));
    out.join("\n")
}

fn render_dashboard(dashboard: &DashboardView) -> String {
    let number = |n: Option<usize>| match n {
        Some(n) => style(n.to_string()).bold().to_string(),
        None => style("—").dim().to_string(),
    };
    let stats = dashboard.stats;

    let mut out = vec![
        format!("\n{} Dashboard\n", style("→").cyan().bold()),
        format!(
            "  Students {}    Courses {}    Enrollments {}",
            number(stats.map(|s| s.students)),
            number(stats.map(|s| s.courses)),
            number(stats.map(|s| s.enrollments)),
        ),
    ];
    for panel in &dashboard.panels {
        out.push(format!("\n  {}", style(panel.title).bold()));
        out.push(render_table(&panel.table));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_console::{Command, Panel, RowAction, Stats, TableRow};

    fn plain() {
        console::set_colors_enabled(false);
    }

    fn table() -> TableView {
        TableView {
            columns: vec!["#", "Name", "Actions"],
            rows: vec![
                TableRow {
                    id: 1,
                    cells: vec![Cell::mono(Some(1)), Cell::text("Grace Hopper")],
                    actions: vec![
                        RowAction::new("Edit", Command::OpenEdit(1)),
                        RowAction::danger("Delete", Command::ConfirmRemove(1)),
                    ],
                },
                TableRow {
                    id: 12,
                    cells: vec![Cell::mono(Some(12)), Cell::muted(None::<String>)],
                    actions: vec![],
                },
            ],
            empty_message: "Nothing here",
        }
    }

    #[test]
    fn test_table_aligns_columns() {
        plain();
        let text = render_table(&table());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  #   NAME"));
        assert!(lines[2].contains("Grace Hopper  Edit Delete"));
        assert!(lines[3].starts_with("  12  —"));
    }

    #[test]
    fn test_empty_table_shows_message() {
        plain();
        let mut empty = table();
        empty.rows.clear();
        assert_eq!(render_table(&empty), "  Nothing here");
    }

    #[test]
    fn test_failed_view_carries_message() {
        plain();
        let text = render(&View::Failed {
            page: Page::Courses,
            message: "Error 503".into(),
        });
        assert!(text.contains("Could not load courses: Error 503"));
    }

    #[test]
    fn test_dashboard_without_stats_shows_dashes() {
        plain();
        let text = render(&View::Dashboard(DashboardView::default()));
        assert!(text.contains("Students —    Courses —    Enrollments —"));

        let text = render(&View::Dashboard(DashboardView {
            stats: Some(Stats {
                students: 3,
                courses: 2,
                enrollments: 1,
            }),
            panels: vec![Panel {
                title: "Recent Students",
                table: table(),
            }],
        }));
        assert!(text.contains("Students 3    Courses 2    Enrollments 1"));
        assert!(text.contains("Recent Students"));
    }

    #[test]
    fn test_screen_keeps_latest_frame() {
        plain();
        let screen = CliScreen::new(false);
        screen.set_active(Page::Students);
        screen.set_badge(Page::Students, 3);
        screen.draw(&View::Loading(Page::Students));
        assert!(screen.state().last.clone().is_none());

        let frame = View::Table {
            page: Page::Students,
            table: table(),
        };
        screen.draw(&frame);
        assert_eq!(screen.state().last.clone(), Some(frame));
        assert!(screen.nav().contains("Students (3)"));

        screen.clear();
        assert!(screen.state().last.clone().is_none());
    }
}
