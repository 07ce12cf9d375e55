//! Common utilities for letter generation.

use chrono::{Local, NaiveDate};
use std::path::Path;

/// Format a date in the `DD/MM/YYYY` form the letters use throughout.
pub fn format_letter_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Today's date in letter form.
pub fn current_letter_date() -> String {
    format_letter_date(Local::now().date_naive())
}

/// Sanitize a string for use in filenames.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_dash = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            if !last_dash && !result.is_empty() {
                result.push('-');
                last_dash = true;
            }
        }
    }

    if result.is_empty() {
        return fallback.to_string();
    }

    result.trim_matches('-').to_string()
}

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}
