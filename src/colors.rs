//! Color support with NO_COLOR and CLICOLOR environment variable handling
//!
//! - `NO_COLOR` set to anything: never color (https://no-color.org/)
//! - `CLICOLOR_FORCE` set and not `0`: always color, even when piped
//! - `CLICOLOR=0`: never color
//! - otherwise color only when stdout is a terminal

use colored::control;

/// Configure `colored` for the whole process. Call once, early in main().
pub fn init_colors() {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());
    let enabled = colors_enabled(|name| std::env::var(name).ok(), is_tty);
    control::set_override(enabled);
}

fn colors_enabled(var: impl Fn(&str) -> Option<String>, is_tty: bool) -> bool {
    if var("NO_COLOR").is_some() {
        return false;
    }

    if var("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
        return true;
    }

    if var("CLICOLOR").is_some_and(|v| v == "0") {
        return false;
    }

    is_tty
}
