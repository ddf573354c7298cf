use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::ui;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(80);

/// Receiver of progress updates for long-running backend calls.
///
/// Purely cosmetic: implementations must never influence the result of the
/// work they decorate.
pub trait ProgressSink: Send {
    /// Show (or replace) the current progress message.
    fn report(&mut self, message: &str);

    /// Stop rendering. Safe to call more than once.
    fn stop(&mut self);
}

/// Sink that renders nothing. Used in quiet mode, when stderr is not a
/// terminal, and in tests.
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _message: &str) {}

    fn stop(&mut self) {}
}

/// Spinner for operations of unknown duration, drawn to stderr from its own
/// render thread.
pub struct Spinner {
    message: Arc<Mutex<String>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            message: Arc::new(Mutex::new(String::new())),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    fn start(&mut self) {
        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let message = Arc::clone(&self.message);

        let spawned = thread::Builder::new()
            .name("ppm-spinner".to_string())
            .spawn(move || {
                let mut frame = 0usize;
                while running.load(Ordering::SeqCst) {
                    // Ctrl-C during a backend call only silences the spinner.
                    if ui::is_interrupted() {
                        break;
                    }
                    let text = message.lock().map(|m| m.clone()).unwrap_or_default();
                    draw(FRAMES[frame % FRAMES.len()], &text);
                    frame += 1;
                    thread::sleep(TICK);
                }
                clear_line();
            });

        match spawned {
            Ok(handle) => self.handle = Some(handle),
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                ui::verbose(&format!("Spinner disabled: {}", e));
            }
        }
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for Spinner {
    fn report(&mut self, message: &str) {
        if let Ok(mut current) = self.message.lock() {
            *current = message.to_string();
        }
        if self.handle.is_none() {
            self.start();
        }
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            // A panicked render thread has nothing left to clean up.
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

fn draw(frame: &str, message: &str) {
    let mut stderr = io::stderr();
    let _ = write!(stderr, "\r{} {}...", frame.cyan().bold(), message);
    let _ = stderr.flush();
}

fn clear_line() {
    let width = terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(100);
    let mut stderr = io::stderr();
    let _ = write!(stderr, "\r{:width$}\r", "", width = width);
    let _ = stderr.flush();
}

/// Pick the sink for the current session: a spinner on an interactive
/// stderr, nothing otherwise.
pub fn default_sink() -> Box<dyn ProgressSink> {
    if ui::is_quiet() || !atty::is(atty::Stream::Stderr) {
        Box::new(NoProgress)
    } else {
        Box::new(Spinner::new())
    }
}

/// Run a backend call while `sink` shows `message`. The sink is stopped once
/// the result exists, whatever the outcome.
pub fn run_with_progress<T, F>(sink: &mut dyn ProgressSink, message: &str, work: F) -> T
where
    F: FnOnce() -> T,
{
    sink.report(message);
    ui::set_backend_busy(true);
    let result = work();
    ui::set_backend_busy(false);
    sink.stop();
    result
}
