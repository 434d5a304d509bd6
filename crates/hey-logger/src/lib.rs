use crossterm::tty::IsTty;
use crossterm::{ExecutableCommand, cursor, terminal};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
    Debug,
}

impl Level {
    const fn marker(self) -> &'static str {
        match self {
            Self::Info => "hey",
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
            Self::Debug => "•",
        }
    }

    fn render(self, message: &str) -> String {
        let marker = self.marker();
        match self {
            Self::Info => format!("{} {}", marker.bright_cyan().bold(), message.white()),
            Self::Success => format!("{} {}", marker.bright_green().bold(), message.bright_green()),
            Self::Warning => {
                format!("{} {}", marker.bright_yellow().bold(), message.bright_yellow())
            }
            Self::Error => format!("{} {}", marker.bright_red().bold(), message.bright_red()),
            Self::Debug => format!("{} {}", marker.bright_black().bold(), message.bright_black()),
        }
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_millis() < 1000 {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

/// Terminal output for one CLI run.
///
/// At most one transient status line ("Downloading ...") is on screen at a
/// time. The next message replaces it, so an install step reads as a single
/// line that ends in its result.
pub struct Logger {
    started: Instant,
    quiet: bool,
    interactive: bool,
    status_open: AtomicBool,
}

impl Logger {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            started: Instant::now(),
            quiet,
            interactive: io::stdout().is_tty(),
            status_open: AtomicBool::new(false),
        }
    }

    fn take_status_line(&self) {
        if !self.status_open.swap(false, Ordering::AcqRel) {
            return;
        }
        let mut stdout = io::stdout();
        let _ = stdout.execute(cursor::MoveToColumn(0));
        let _ = stdout.execute(terminal::Clear(terminal::ClearType::CurrentLine));
        let _ = stdout.flush();
    }

    pub fn log(&self, level: Level, message: &str) {
        if self.quiet && level != Level::Error {
            return;
        }

        self.take_status_line();
        let line = level.render(message);
        if level == Level::Error {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Transient progress message. Piped output gets it as a plain line.
    pub fn status(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.take_status_line();
        let line = format!("{} {}", "◦".bright_cyan(), message.bright_white());
        if self.interactive {
            print!("{line}");
            let _ = io::stdout().flush();
            self.status_open.store(true, Ordering::Release);
        } else {
            println!("{line}");
        }
    }

    /// Closing success line with the time spent since the logger was created.
    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.take_status_line();
        println!(
            "{} {}",
            Level::Success.render(message),
            format!("[{}]", format_elapsed(self.started.elapsed())).bright_black()
        );
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_logger(quiet: bool) {
    let _ = LOGGER.set(Logger::new(quiet));
}

/// Library code may log before the CLI has called [`init_logger`] (tests, embedders),
/// so an uninitialised logger is created on first use.
fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(false))
}

pub fn status(message: &str) {
    get_logger().status(message);
}

pub fn info(message: &str) {
    get_logger().log(Level::Info, message);
}

pub fn success(message: &str) {
    get_logger().log(Level::Success, message);
}

pub fn warn(message: &str) {
    get_logger().log(Level::Warning, message);
}

pub fn error(message: &str) {
    get_logger().log(Level::Error, message);
}

pub fn debug(message: &str, enabled: bool) {
    if enabled {
        get_logger().log(Level::Debug, message);
    }
}

pub fn finish(message: &str) {
    get_logger().finish(message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(42)), "42ms");
        assert_eq!(format_elapsed(Duration::from_millis(1500)), "1.50s");
    }

    #[test]
    fn test_render_keeps_marker_and_message() {
        let line = Level::Warning.render("new version available");
        assert!(line.contains("⚠"));
        assert!(line.contains("new version available"));
        assert!(Level::Info.render("x").contains("hey"));
    }

    #[test]
    fn test_quiet_logger_keeps_no_status_line() {
        let logger = Logger::new(true);
        logger.status("Downloading demo@1.0.0...");
        assert!(!logger.status_open.load(Ordering::Acquire));
    }
}
