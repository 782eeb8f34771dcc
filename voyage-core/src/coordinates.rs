static DMS_SEPARATORS: [char; 4] = ['°', '\'', '"', 'Â'];

/// Converts a degree-minute-second string such as `46°59'00"N` to decimal degrees.
/// Southern and western hemispheres are negative.
pub fn parse_dms(value: &str) -> Option<f64> {
    let mut parts = value
        .trim()
        .split(|c: char| DMS_SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let degrees = parts.next()?.parse::<f64>().ok()?;
    let minutes = parts.next()?.parse::<f64>().ok()?;
    let seconds = parts.next()?.parse::<f64>().ok()?;
    let direction = parts.next()?;

    if parts.next().is_some() || !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds)
    {
        return None;
    }

    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;

    match direction {
        "N" | "E" => Some(decimal),
        "S" | "W" => Some(-decimal),
        _ => None,
    }
}

/// Accepts either decimal degrees or a degree-minute-second string.
pub fn parse_coordinate(value: &str) -> Option<f64> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        Ok(_) => None,
        Err(_) => parse_dms(value),
    }
}
