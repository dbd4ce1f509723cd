//! Unified console output for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, blue for written paths
//! - **Diagnostics on stderr**: Errors never mix with the JSON printed by `stats`
//! - **Standardized spacing**: Newline before each message block

use colored::*;

/// Formats and prints an error message to stderr
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Prints one written artifact path, indented under a success message
pub fn print_artifact(path: &str) {
    println!("   {} {}", "•".bright_black(), path.blue());
}
