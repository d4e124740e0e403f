/// Mean Earth radius used for haversine distances.
pub(crate) const EARTH_RADIUS_KM: f64 = 6_371.0;

pub(crate) const DEFAULT_PROGRESS_INTERVAL_SECS: f64 = 5.0;

/// Above this many cities the factorial search gets slow enough to warn about.
pub(crate) const LONG_RUN_WARN_CITIES: usize = 12;

pub(crate) const POINT_FIELD_DELIMITER: char = ';';
