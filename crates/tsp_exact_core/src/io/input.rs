use std::{fs, io::Read, path::Path};

use crate::{Error, GeoPoint, Result, constants::POINT_FIELD_DELIMITER};

const UTF8_BOM: char = '\u{feff}';

/// Parses `latitude;longitude` records, one per line.
///
/// Blank lines are skipped. Every other line must hold exactly two finite
/// numbers inside coordinate bounds, otherwise the whole parse fails with
/// [`Error::MalformedRecord`]. An input without records yields an empty vec;
/// rejecting that is up to the caller.
pub fn parse_points(input: &str) -> Result<Vec<GeoPoint>> {
    let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);

    let mut points = Vec::new();
    for (idx, raw_line) in input.lines().enumerate() {
        let record = raw_line.trim();
        if record.is_empty() {
            continue;
        }
        points.push(parse_record(idx + 1, record)?);
    }

    log::debug!("input: parsed points={}", points.len());
    Ok(points)
}

pub fn read_points_from_path(path: &Path) -> Result<Vec<GeoPoint>> {
    let contents = fs::read_to_string(path)?;
    log::info!("input: reading points from {}", path.display());
    parse_points(&contents)
}

pub fn read_points_from_reader(mut reader: impl Read) -> Result<Vec<GeoPoint>> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_points(&contents)
}

fn parse_record(line: usize, record: &str) -> Result<GeoPoint> {
    let mut fields = record.split(POINT_FIELD_DELIMITER).map(str::trim);

    let lat_s = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::malformed_record(line, "missing latitude"))?;
    let lng_s = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::malformed_record(line, "missing longitude"))?;

    if fields.next().is_some() {
        return Err(Error::malformed_record(
            line,
            format!("expected 'latitude;longitude' but got extra fields: {record}"),
        ));
    }

    let lat: f64 = lat_s
        .parse()
        .map_err(|_| Error::malformed_record(line, format!("invalid latitude: {lat_s}")))?;
    let lng: f64 = lng_s
        .parse()
        .map_err(|_| Error::malformed_record(line, format!("invalid longitude: {lng_s}")))?;

    let point = GeoPoint::new(lat, lng);
    if !point.is_valid() {
        return Err(Error::malformed_record(
            line,
            format!("coordinates out of range: {record}"),
        ));
    }
    Ok(point)
}
