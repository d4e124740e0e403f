use std::{fmt, fs::File, io::Write};

use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::Level;

use crate::Result;
use crate::options::{LogFormat, SolverOptions};

/// Installs the global `env_logger` backend configured from `options`.
pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let style = LineStyle {
        format: options.log_format,
        timestamp: options.log_timestamp,
    };

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .format(move |buf: &mut Formatter, record| {
            let timestamp = style
                .timestamp
                .then(|| buf.timestamp_millis().to_string());
            writeln!(
                buf,
                "{}",
                style.render(
                    timestamp.as_deref(),
                    record.level(),
                    record.target(),
                    record.args()
                )
            )
        });

    if let Some(log_path) = options.log_output_path() {
        let log_file = File::create(log_path).map_err(|e| {
            crate::Error::other(format!(
                "failed to create log output file {}: {e}",
                log_path.display()
            ))
        })?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| crate::Error::other(format!("logger init failed: {e}")))
}

#[derive(Clone, Copy)]
struct LineStyle {
    format: LogFormat,
    timestamp: bool,
}

impl LineStyle {
    fn render(
        &self,
        timestamp: Option<&str>,
        level: Level,
        target: &str,
        message: &dyn fmt::Display,
    ) -> String {
        let prefix = timestamp.map(|ts| format!("{ts} ")).unwrap_or_default();
        match self.format {
            LogFormat::Compact => format!("{prefix}{} {message}", level_tag(level)),
            LogFormat::Pretty => format!("{prefix}{} [{target}] {message}", level_tag(level)),
        }
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
