use crate::errors::AlignmentError;

// @module: SRT timecode conversion

/// Parse an `HH:MM:SS,mmm` timecode into fractional seconds.
///
/// Every field must be a run of ASCII digits. Field ranges are not checked,
/// so `00:75:00,000` is accepted as 4500 seconds.
pub fn parse_timecode(timecode: &str) -> Result<f64, AlignmentError> {
    let trimmed = timecode.trim();
    let malformed = |reason: &str| AlignmentError::MalformedTimestamp {
        value: timecode.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() != 3 {
        return Err(malformed("expected three ':' separated fields"));
    }

    let (seconds, millis) = parts[2]
        .split_once(',')
        .ok_or_else(|| malformed("missing ',' before milliseconds"))?;

    let field = |value: &str, name: &str| {
        parse_field(value).map_err(|problem| malformed(&format!("{} are {}", name, problem)))
    };
    let hours = field(parts[0], "hours")?;
    let minutes = field(parts[1], "minutes")?;
    let seconds = field(seconds, "seconds")?;
    let millis = field(millis, "milliseconds")?;

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64 + millis as f64 / 1000.0)
}

/// Parse a timecode, falling back to zero seconds when it is malformed.
///
/// The error is handed back alongside the value so the caller can attach it
/// to the block it came from.
pub fn parse_timecode_or_zero(timecode: &str) -> (f64, Option<AlignmentError>) {
    match parse_timecode(timecode) {
        Ok(seconds) => (seconds, None),
        Err(e) => (0.0, Some(e)),
    }
}

/// Format fractional seconds as `HH:MM:SS,mmm`, rounding to the nearest millisecond
pub fn format_timecode(seconds: f64) -> String {
    let ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

fn parse_field(field: &str) -> Result<u64, &'static str> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err("not numeric");
    }
    field.parse().map_err(|_| "out of range")
}
