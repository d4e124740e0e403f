use std::{io::Write, time::Duration};

use crate::io::output::format_elapsed;

/// Receives periodic elapsed-time notifications from a running search.
///
/// `elapsed` is the time since the previous notification (or since the
/// search started, for the first one). Implementations must not block; the
/// search ignores whatever they do.
pub trait ProgressObserver {
    fn on_progress(&mut self, elapsed: Duration);
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _elapsed: Duration) {}
}

impl<F> ProgressObserver for F
where
    F: FnMut(Duration),
{
    fn on_progress(&mut self, elapsed: Duration) {
        self(elapsed)
    }
}

/// Rewrites a single `Elapsed Time: ...` status line on a terminal stream.
///
/// Keeps a running total across notifications so the line shows time since
/// the search started.
pub struct ConsoleProgress<W: Write> {
    out: W,
    total: Duration,
    wrote_line: bool,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            total: Duration::ZERO,
            wrote_line: false,
        }
    }

    /// Writes the initial zero-elapsed status line.
    pub fn start(&mut self) {
        self.total = Duration::ZERO;
        self.write_line();
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Clears the status line if one was written.
    pub fn finish(&mut self) {
        if !self.wrote_line {
            return;
        }
        if let Err(err) = write!(self.out, "\r\x1b[2K").and_then(|()| self.out.flush()) {
            log::warn!("progress: failed to clear status line err={err}");
        }
        self.wrote_line = false;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self) {
        let line = format!("\r\x1b[2KElapsed Time: {}", format_elapsed(self.total));
        match self
            .out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.flush())
        {
            Ok(()) => self.wrote_line = true,
            Err(err) => log::warn!("progress: failed to write status line err={err}"),
        }
    }
}

impl<W: Write> ProgressObserver for ConsoleProgress<W> {
    fn on_progress(&mut self, elapsed: Duration) {
        self.total += elapsed;
        log::debug!("progress: elapsed={:.2}s", self.total.as_secs_f64());
        self.write_line();
    }
}
