use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

pub mod progress;
pub mod table;

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static BACKEND_BUSY: AtomicBool = AtomicBool::new(false);

/// Apply color preferences. `NO_COLOR` is honoured by `colored` itself.
pub fn init_colors(no_color: bool) {
    if no_color {
        colored::control::set_override(false);
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Set while a backend subprocess is in flight. Ctrl-C then only stops the
/// spinner instead of exiting.
pub fn set_backend_busy(busy: bool) {
    BACKEND_BUSY.store(busy, Ordering::SeqCst);
}

pub fn is_backend_busy() -> bool {
    BACKEND_BUSY.load(Ordering::SeqCst)
}

pub fn header(title: &str) {
    if is_quiet() {
        return;
    }
    println!("\n{}", title.bold().underline());
}

pub fn success(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn info(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "ℹ".blue().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Diagnostic line, only shown with `--verbose`.
pub fn verbose(msg: &str) {
    if !is_verbose() {
        return;
    }
    eprintln!("{} {}", "·".bright_black(), msg.dimmed());
}

pub fn keyval(key: &str, val: &str) {
    println!("{}: {}", key.bold(), val);
}

pub fn indent(msg: &str, level: usize) {
    let spaces = " ".repeat(level * 2);
    println!("{}{}", spaces, msg);
}

/// Ask a `[y/N]` question on the terminal. Defaults to no.
pub fn prompt_yes_no(question: &str) -> bool {
    print!("{} {} [y/N] ", "?".yellow().bold(), question);

    if let Err(e) = io::stdout().flush() {
        eprintln!("\nWarning: Failed to flush terminal: {}", e);
        return false;
    }

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(_) => crate::core::selection::is_affirmative(&input),
        Err(e) => {
            eprintln!("\nWarning: Failed to read input: {}", e);
            false
        }
    }
}
