use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    time::Duration,
};

use crate::{Error, Result, Solution};

const CENTIS_PER_HOUR: u128 = 360_000;
const CENTIS_PER_MINUTE: u128 = 6_000;
const NANOS_PER_CENTI: u128 = 10_000_000;

/// `"{h} hours, {m} minutes, and {s:.2} seconds"`.
///
/// Rounds to hundredths of a second before splitting, so the seconds field
/// never reads `60.00`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let centis = (elapsed.as_nanos() + NANOS_PER_CENTI / 2) / NANOS_PER_CENTI;
    let hours = centis / CENTIS_PER_HOUR;
    let minutes = (centis % CENTIS_PER_HOUR) / CENTIS_PER_MINUTE;
    let seconds = (centis % CENTIS_PER_MINUTE) as f64 / 100.0;
    format!("{hours} hours, {minutes} minutes, and {seconds:.2} seconds")
}

pub fn write_report(mut out: impl Write, solution: &Solution) -> io::Result<()> {
    writeln!(out, "Best Path: {:?}", solution.tour)?;
    writeln!(out, "Minimum Distance: {} km", solution.cost_km)?;
    writeln!(out, "Total Elapsed Time: {}", format_elapsed(solution.elapsed))?;
    out.flush()
}

/// Writes the report to `path`, or stdout when `path` is `None`.
pub fn write_report_to(path: Option<&Path>, solution: &Solution) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!(
                    "failed to create report output file {}: {e}",
                    path.display()
                ))
            })?;
            write_report(BufWriter::new(file), solution)?;
            log::info!("output: wrote report to {}", path.display());
        }
        None => write_report(io::stdout().lock(), solution)?,
    }
    Ok(())
}
