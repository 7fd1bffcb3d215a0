use chrono::Local;

use crate::error::{Error, Result};

/// End-of-day sentinel: a slot whose `toTime` is exactly "00:00" runs until
/// midnight.
pub const MIDNIGHT: &str = "00:00";

/// Checks one wall-clock string and returns its canonical zero-padded form.
/// Single-digit hours are padded ("9:00" becomes "09:00"); anything else
/// that is not HH:MM with hour 00-23 and minute 00-59 is rejected.
pub fn normalize_time(raw: &str) -> Result<String> {
    let invalid = || {
        Error::Validation(format!(
            "invalid time {raw:?}: expected HH:MM with hour 00-23 and minute 00-59"
        ))
    };
    let (hour, minute) = raw.split_once(':').ok_or_else(invalid)?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return Err(invalid());
    }
    if !hour.bytes().all(|b| b.is_ascii_digit()) || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: u32 = hour.parse().map_err(|_| invalid())?;
    let minutes: u32 = minute.parse().map_err(|_| invalid())?;
    if hours >= 24 || minutes >= 60 {
        return Err(invalid());
    }
    Ok(format!("{hours:02}:{minute}"))
}

/// Confirms a day token belongs to the configured vocabulary.
pub fn check_day(day: &str, vocabulary: &[String]) -> Result<()> {
    if vocabulary.iter().any(|d| d == day) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "unknown day {day:?} (expected one of: {})",
            vocabulary.join(", ")
        )))
    }
}

/// Rejects empty or reversed ranges. The midnight sentinel is exempt from
/// the from < to rule since it marks the end of the day, not its start.
pub fn check_range(from: &str, to: &str) -> Result<()> {
    if to != MIDNIGHT && from >= to {
        return Err(Error::Validation(format!(
            "time range {from}-{to} is empty or reversed"
        )));
    }
    Ok(())
}

/// A moment on the server clock, in the shape occupancy queries compare
/// against schedule boundaries.
#[derive(Debug, Clone)]
pub struct Now {
    /// Full English day name, e.g. "Tuesday".
    pub day: String,
    /// HH:MM:SS, zero padded.
    pub time: String,
}

pub fn now() -> Now {
    let now = Local::now();
    Now {
        day: now.format("%A").to_string(),
        time: now.format("%H:%M:%S").to_string(),
    }
}
