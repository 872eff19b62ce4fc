//! Colored step output for the CI console.
//!
//! Presentation only: the lifecycle logic reports through these helpers
//! but never depends on them. Color is dropped when stdout is not a TTY,
//! matching how the tracing layer is initialized.

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const BRIGHT_WHITE: &str = "\x1b[97m";
const RESET: &str = "\x1b[0m";

fn paint(color: &str, message: &str) -> String {
    if atty::is(atty::Stream::Stdout) {
        format!("{}{}{}", color, message, RESET)
    } else {
        message.to_string()
    }
}

/// Fatal failure line. The caller decides the exit code.
pub fn fail(message: &str) {
    println!();
    println!("{}", paint(RED, message));
}

pub fn warn(message: &str) {
    println!("{}", paint(YELLOW, message));
}

/// Section banner.
pub fn info(message: &str) {
    println!();
    println!("{}", paint(BLUE, message));
}

/// Indented detail line under the current banner.
pub fn detail(message: &str) {
    println!("  {}", paint(BRIGHT_WHITE, message));
}

/// Indented success line under the current banner.
pub fn done(message: &str) {
    println!("  {}", paint(GREEN, message));
}
