//! Colored console output and table printing.
//!
//! Error output goes to stderr with a distinct prefix; everything else
//! goes to stdout. Color is handled by `colored`, which disables itself
//! when the stream is not a terminal.

use std::io::Write;

use colored::Colorize;

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{}", format!("✓ {message}").green());
}

/// Prints an error message to stderr.
pub fn print_error(message: &str) {
    eprintln!("{}", format!("✗ {message}").red());
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    println!("{}", format!("⚠ {message}").yellow());
}

/// Prints an informational message.
pub fn print_info(message: &str) {
    println!("{}", format!("ℹ {message}").cyan());
}

/// Prints a formatted section header.
pub fn print_header(title: &str) {
    println!("{}", format!("\n=== {title} ===\n").cyan());
}

/// Prints a simple left-aligned table to stdout.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let _ = write_table(&mut handle, headers, rows);
}

/// Writes a table with column widths fitted to the widest cell.
pub fn write_table<W: Write>(
    out: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> std::io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    for (i, header) in headers.iter().enumerate() {
        write!(out, "{header:<width$}", width = widths[i])?;
        if i < headers.len() - 1 {
            write!(out, "  ")?;
        }
    }
    writeln!(out)?;

    for (i, width) in widths.iter().enumerate() {
        write!(out, "{}", "-".repeat(*width))?;
        if i < widths.len() - 1 {
            write!(out, "  ")?;
        }
    }
    writeln!(out)?;

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(0);
            write!(out, "{cell:<width$}")?;
            if i < row.len() - 1 {
                write!(out, "  ")?;
            }
        }
        writeln!(out)?;
    }

    Ok(())
}
