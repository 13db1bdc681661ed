//! Terminal styling for summaries and the scan table.
//!
//! Progress lines are printed unstyled; only decoration goes through here.

use console::Style;

fn prefixed(symbol: &str, style: Style, msg: &str) -> String {
    format!("{} {}", style.apply_to(symbol), msg)
}

/// Clean summary: a sweep with no failures, or a scan with nothing to do.
pub fn success(msg: &str) -> String {
    prefixed("✓", Style::new().green(), msg)
}

/// A file in the scan that could not be read.
pub fn error(msg: &str) -> String {
    prefixed("✗", Style::new().red(), msg)
}

/// Summary line when at least one file reported an error.
pub fn warn(msg: &str) -> String {
    prefixed("⚠", Style::new().yellow(), msg)
}

pub fn header(msg: &str) -> String {
    Style::new().bold().apply_to(msg).to_string()
}

pub fn dim(msg: &str) -> String {
    Style::new().dim().apply_to(msg).to_string()
}

// Scan actions

/// Region the generic pass will rewrite.
pub fn action_resolve() -> String {
    Style::new().green().apply_to("resolve").to_string()
}

/// Region the special-case pass will delete.
pub fn action_delete() -> String {
    Style::new().cyan().apply_to("delete (dead declaration)").to_string()
}

/// Region from another branch, left alone.
pub fn action_skip() -> String {
    Style::new().dim().apply_to("skip (other branch)").to_string()
}
