/// User interface and status output utilities
///
/// This module handles:
/// - Serialized console output
/// - Colored terminal text
/// - Status and summary message formatting

use crate::runner::RunSummary;
use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;

/// Execute a function with exclusive access to console output
fn status_lock<F>(f: F)
where
    F: FnOnce(),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Print the "report: " prefix for status messages
fn print_status_header() {
    print!("report: ");
}

/// Print colored text to terminal, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        print!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        if let Some(ref mut t) = term::stdout() {
            if t.fg(fg).is_err() {
                return false;
            }
            let _ = t.attr(term::Attr::Bold);
            if write!(t, "{}", s).is_err() {
                return false;
            }
            let _ = t.reset();
            return true;
        }

        false
    }
}

/// Print a status message with "report: " prefix
pub fn status(s: &str) {
    status_lock(|| {
        print_status_header();
        println!("{}", s);
    });
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    status_lock(|| {
        println!();
        print_color("error", term::color::BRIGHT_RED);
        println!(": {}", msg);
        println!();
    });
}

/// Format the end-of-run summary lines
pub fn format_summary(summary: &RunSummary) -> String {
    let rows = &summary.rows;
    let mut out = String::new();
    out.push_str("\n=== Summary ===\n");
    out.push_str(&format!("Issues fetched: {}\n", summary.issues_fetched));
    out.push_str(&format!("Components:     {}\n", rows.components));
    out.push_str(&format!("Stories:        {}\n", rows.stories));
    out.push_str(&format!("Subtasks:       {}\n", rows.subtasks));
    out.push_str(&format!("Linked issues:  {}\n", rows.linked));
    out.push_str(&format!("Report saved to: {}\n", summary.output.display()));
    if let Some(json) = &summary.json_output {
        out.push_str(&format!("Grouping JSON saved to: {}\n", json.display()));
    }
    out
}

/// Print the end-of-run summary
pub fn print_summary(summary: &RunSummary) {
    status_lock(|| print!("{}", format_summary(summary)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RenderSummary;
    use std::path::PathBuf;

    #[test]
    fn test_format_summary() {
        let summary = RunSummary {
            issues_fetched: 2,
            rows: RenderSummary { components: 2, stories: 2, subtasks: 1, linked: 1 },
            output: PathBuf::from("component-report.xlsx"),
            json_output: None,
        };
        let text = format_summary(&summary);
        assert!(text.contains("Stories:        2"));
        assert!(text.contains("Report saved to: component-report.xlsx"));
        assert!(!text.contains("Grouping JSON"));
    }
}
