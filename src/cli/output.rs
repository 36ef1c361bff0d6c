//! Colored terminal output for operator feedback.
//!
//! Diagnostics for machines go through `log`; this manager handles the
//! human-facing progress lines. Write errors to the terminal are ignored:
//! losing a status line must never fail the pipeline.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Terminal output manager with colored message categories.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }
        let mut out = StandardStream::stdout(ColorChoice::Auto);
        let _ = out.set_color(ColorSpec::new().set_bold(true));
        let _ = writeln!(out, "{title}");
        let _ = out.reset();
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.prefixed(Color::Cyan, "→", message);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.prefixed(Color::Green, "✓", message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        self.prefixed_stderr(Color::Yellow, "⚠", message);
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        self.prefixed_stderr(Color::Red, "✗", message);
    }

    /// Print a plain informational message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let mut out = StandardStream::stdout(ColorChoice::Auto);
        let _ = writeln!(out, "{message}");
    }

    /// Print indented detail
    pub fn indent(&self, message: &str) {
        if self.quiet {
            return;
        }
        let mut out = StandardStream::stdout(ColorChoice::Auto);
        let _ = writeln!(out, "  {message}");
    }

    /// Print per-step detail, only in verbose mode
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            self.indent(message);
        }
    }

    fn prefixed(&self, color: Color, prefix: &str, message: &str) {
        let mut out = StandardStream::stdout(ColorChoice::Auto);
        let _ = out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(out, "{prefix} ");
        let _ = out.reset();
        let _ = writeln!(out, "{message}");
    }

    fn prefixed_stderr(&self, color: Color, prefix: &str, message: &str) {
        let mut err = StandardStream::stderr(ColorChoice::Auto);
        let _ = err.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(err, "{prefix} ");
        let _ = err.reset();
        let _ = writeln!(err, "{message}");
    }
}
