//! Output formatting helpers for the `medcalc` CLI.
//!
//! JSON output, plain tables, and a small colour palette for human-readable
//! results. Colour follows the usual conventions (`NO_COLOR`, `CLICOLOR`,
//! `CLICOLOR_FORCE`, `TERM=dumb`) and is off when stdout is not a terminal.

use std::env;
use std::io::{self, Write};

use owo_colors::OwoColorize;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Palette (Ayu Dark)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c);
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54);
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80);
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff);

pub const ICON_PASS: &str = "\u{2713}";
pub const ICON_WARN: &str = "\u{26A0}";

/// Determines if ANSI colour codes should be used.
pub fn supports_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").as_deref() == Ok("0") {
        return false;
    }
    if env::var("TERM").as_deref() == Ok("dumb") {
        return false;
    }
    if env::var_os("CLICOLOR_FORCE").is_some() {
        return true;
    }
    crossterm::tty::IsTty::is_tty(&io::stdout())
}

fn paint(text: &str, (r, g, b): (u8, u8, u8)) -> String {
    if supports_color() {
        text.truecolor(r, g, b).to_string()
    } else {
        text.to_string()
    }
}

pub fn render_pass(text: &str) -> String {
    paint(text, PASS)
}

pub fn render_warn(text: &str) -> String {
    paint(text, WARN)
}

pub fn render_muted(text: &str) -> String {
    paint(text, MUTED)
}

pub fn render_accent(text: &str) -> String {
    paint(text, ACCENT)
}

/// Bold, uncoloured.
pub fn render_bold(text: &str) -> String {
    if supports_color() {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

// ---------------------------------------------------------------------------
// JSON and tables
// ---------------------------------------------------------------------------

/// Print any serializable value as pretty JSON to stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Column widths are computed from the data (in characters, so units such
/// as `kg/m²` align).
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{:<width$}", header, width = widths[i]);
    }
    let _ = writeln!(handle);

    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{}", "-".repeat(*width));
    }
    let _ = writeln!(handle);

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                let _ = write!(handle, "  ");
            }
            let width = widths.get(i).copied().unwrap_or(0);
            let _ = write!(handle, "{:<width$}", cell, width = width);
        }
        let _ = writeln!(handle);
    }
}

/// `value unit`, or just `value` when there is no unit.
pub fn with_unit(value: &str, unit: Option<&str>) -> String {
    match unit {
        Some(u) if !u.is_empty() => format!("{} {}", value, u),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_unit_skips_empty() {
        assert_eq!(with_unit("22.86", Some("kg/m²")), "22.86 kg/m²");
        assert_eq!(with_unit("9", None), "9");
        assert_eq!(with_unit("9", Some("")), "9");
    }
}
