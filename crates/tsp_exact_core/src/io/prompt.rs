use std::{
    io::{BufRead, ErrorKind, Write},
    path::Path,
};

use crate::{Error, GeoPoint, Result, io::input::read_points_from_path};

const PATH_PROMPT: &str = "Enter the path to the CSV file: ";
const FILE_NOT_FOUND: &str = "File not found. Check the path and try again.";
const NO_CITIES: &str = "Invalid input. The number of cities must be greater than 0.";

/// Asks for a points file until one exists and holds at least one point.
///
/// Missing files and files without records are reported on `writer` and
/// retried. Malformed records and other I/O failures end the loop with an
/// error, as does end of input on `reader`.
pub fn prompt_for_points<R, W>(mut reader: R, mut writer: W) -> Result<Vec<GeoPoint>>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(writer, "{PATH_PROMPT}")?;
        writer.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(Error::invalid_input("no input path provided"));
        }

        let path = line.trim();
        if path.is_empty() {
            writeln!(writer, "{FILE_NOT_FOUND}")?;
            continue;
        }

        match read_points_from_path(Path::new(path)) {
            Ok(points) if points.is_empty() => {
                log::warn!("input: no points in {path}");
                writeln!(writer, "{NO_CITIES}")?;
            }
            Ok(points) => return Ok(points),
            Err(Error::Io(err)) if err.kind() == ErrorKind::NotFound => {
                log::warn!("input: file not found path={path}");
                writeln!(writer, "{FILE_NOT_FOUND}")?;
            }
            Err(err) => return Err(err),
        }
    }
}
