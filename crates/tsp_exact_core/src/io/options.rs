use std::{env, path::Path, time::Duration};

use log::LevelFilter;
use tsp_exact_derive::{CliOptions, CliValue, KvDisplay};

use crate::{Error, Result, SearchConfig, constants::DEFAULT_PROGRESS_INTERVAL_SECS};

/// Command-line options for the `tsp-exact` binary.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Points file with one `latitude;longitude` per line; prompts when empty.
    #[cli(long = "input", value = "<path>")]
    #[kv(fmt = "debug")]
    pub input: String,
    /// Report file; empty or `-` means stdout.
    #[cli(long = "output", value = "<path>")]
    #[kv(fmt = "debug")]
    pub output: String,
    /// Seconds between elapsed-time updates while searching.
    #[cli(long = "progress-interval", value = "<secs>", parse_with = "parse_interval")]
    pub progress_interval: f64,
    /// Show the elapsed-time line on stderr while searching.
    #[cli(flag = "progress")]
    pub progress: bool,
    /// Structured logging level.
    #[cli(long = "log-level", value = "<error|warn|info|debug|trace|off>")]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format", value = "<compact|pretty>")]
    pub log_format: LogFormat,
    /// Prefix log lines with a millisecond timestamp.
    #[cli(flag = "log-timestamp")]
    pub log_timestamp: bool,
    /// Log file; empty or `-` means stderr.
    #[cli(long = "log-output", value = "<path>")]
    #[kv(fmt = "debug")]
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL_SECS,
            progress: true,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        Ok(options)
    }

    pub fn usage() -> String {
        format!(
            concat!(
                "Usage:\n",
                "  tsp-exact [options] --input points.csv\n",
                "  tsp-exact [options]            (asks for the points file)\n\n",
                "Options:\n",
                "{}",
                "  --help\n",
                "\n",
                "Examples:\n",
                "  tsp-exact --input cities.csv\n",
                "  tsp-exact --input cities.csv --output route.txt --no-progress\n",
                "  tsp-exact --log-level=info --log-format=pretty --input cities.csv\n",
                "  tsp-exact --progress-interval=1 --log-output run.log\n",
            ),
            Self::option_help()
        )
    }

    pub fn search_config(&self) -> Result<SearchConfig> {
        let interval = Duration::try_from_secs_f64(self.progress_interval).map_err(|e| {
            Error::invalid_input(format!(
                "Invalid progress interval {}: {e}",
                self.progress_interval
            ))
        })?;
        Ok(SearchConfig::default().with_progress_interval(interval))
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_stdio_path(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }
}

fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn parse_interval(raw: &str) -> Result<f64> {
    let secs: f64 = raw.trim().parse().map_err(|e| {
        Error::invalid_input(format!("Invalid value for --progress-interval: {raw} ({e})"))
    })?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(Error::invalid_input(format!(
            "Invalid value for --progress-interval: {raw} (expected a non-negative number of seconds)"
        )));
    }
    Ok(secs)
}
