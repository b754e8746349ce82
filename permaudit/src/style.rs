//! TTY-aware color helpers for the text report and error output.
//!
//! Built on [`console`], which detects whether stdout/stderr is a terminal
//! and respects `NO_COLOR`.

use console::Style;

use crate::categorize::Category;

fn out() -> Style {
    Style::new()
}

fn err() -> Style {
    Style::new().for_stderr()
}

pub fn bold(text: &str) -> String {
    out().bold().apply_to(text).to_string()
}

/// Secondary information.
pub fn dim(text: &str) -> String {
    out().dim().apply_to(text).to_string()
}

/// Section headers.
pub fn header(text: &str) -> String {
    out().cyan().bold().apply_to(text).to_string()
}

pub fn green(text: &str) -> String {
    out().green().apply_to(text).to_string()
}

pub fn red(text: &str) -> String {
    out().red().apply_to(text).to_string()
}

pub fn yellow(text: &str) -> String {
    out().yellow().apply_to(text).to_string()
}

pub fn magenta(text: &str) -> String {
    out().magenta().apply_to(text).to_string()
}

pub fn err_red_bold(text: &str) -> String {
    err().red().bold().apply_to(text).to_string()
}

pub fn err_dim(text: &str) -> String {
    err().dim().apply_to(text).to_string()
}

/// Hints on stderr.
pub fn err_cyan_bold(text: &str) -> String {
    err().cyan().bold().apply_to(text).to_string()
}

/// Colorize text by category: safe green, ask and medium yellow, deny red,
/// review magenta.
pub fn category(category: Category, text: &str) -> String {
    match category {
        Category::Safe => green(text),
        Category::Ask | Category::Medium => yellow(text),
        Category::Deny => red(text),
        Category::Review => magenta(text),
    }
}
