//! Delivery window parsing.
//!
//! A window is written `HH:MM-HH:MM`. The engine only needs a numeric cutoff
//! per destination; how that cutoff is derived depends on [`WindowMode`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::network::LocationId;

const SEPARATOR: char = '-';
const TIME_FORMAT: &str = "%H:%M";

/// How a window string is turned into a cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Cutoff is the two-digit start hour. Minutes and the end time are
    /// ignored, so `09:45-12:00` yields `9.0`.
    #[default]
    Literal,
    /// Both times are validated and the cutoff is the start time in
    /// fractional hours, so `09:45-12:00` yields `9.75`.
    Corrected,
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            WindowMode::Literal => "literal",
            WindowMode::Corrected => "corrected",
        };
        f.write_str(value)
    }
}

/// Parse a window string into the numeric cutoff used by the engine.
pub fn parse_window_cutoff(window: &str, mode: WindowMode) -> Result<f64> {
    match mode {
        WindowMode::Literal => parse_literal(window),
        WindowMode::Corrected => DeliveryWindow::parse(window).map(|parsed| parsed.cutoff()),
    }
}

fn parse_literal(window: &str) -> Result<f64> {
    let Some((start, _)) = window.split_once(SEPARATOR) else {
        return Err(invalid(window, "missing '-' separator"));
    };

    let mut digits = start.chars().take(2);
    let (Some(tens), Some(ones)) = (digits.next(), digits.next()) else {
        return Err(invalid(window, "start component shorter than two characters"));
    };
    match (tens.to_digit(10), ones.to_digit(10)) {
        (Some(tens), Some(ones)) => Ok(f64::from(tens * 10 + ones)),
        _ => Err(invalid(window, "start hour is not two digits")),
    }
}

fn invalid(window: &str, reason: &str) -> Error {
    Error::InvalidWindowFormat {
        window: window.to_string(),
        reason: reason.to_string(),
    }
}

/// Fully parsed `HH:MM-HH:MM` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DeliveryWindow {
    /// Parse and validate both ends of the window. Windows that wrap past
    /// midnight are rejected.
    pub fn parse(window: &str) -> Result<Self> {
        let Some((start, end)) = window.split_once(SEPARATOR) else {
            return Err(invalid(window, "missing '-' separator"));
        };

        let start = NaiveTime::parse_from_str(start.trim(), TIME_FORMAT)
            .map_err(|err| invalid(window, &format!("bad start time: {err}")))?;
        let end = NaiveTime::parse_from_str(end.trim(), TIME_FORMAT)
            .map_err(|err| invalid(window, &format!("bad end time: {err}")))?;

        if end < start {
            return Err(invalid(window, "end time is before start time"));
        }

        Ok(Self { start, end })
    }

    /// Start of the window in fractional hours.
    pub fn cutoff(&self) -> f64 {
        f64::from(self.start.hour()) + f64::from(self.start.minute()) / 60.0
    }
}

impl fmt::Display for DeliveryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

/// Sparse mapping from destination to its window text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryWindows {
    windows: BTreeMap<LocationId, String>,
}

impl DeliveryWindows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the window for a location.
    pub fn insert(&mut self, location: LocationId, window: impl Into<String>) -> Option<String> {
        self.windows.insert(location, window.into())
    }

    pub fn get(&self, location: LocationId) -> Option<&str> {
        self.windows.get(&location).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LocationId, &str)> + '_ {
        self.windows.iter().map(|(&id, window)| (id, window.as_str()))
    }

    /// Merge another set of windows, later entries winning.
    pub fn extend(&mut self, other: DeliveryWindows) {
        self.windows.extend(other.windows);
    }
}

impl<S: Into<String>> FromIterator<(LocationId, S)> for DeliveryWindows {
    fn from_iter<I: IntoIterator<Item = (LocationId, S)>>(iter: I) -> Self {
        Self {
            windows: iter
                .into_iter()
                .map(|(id, window)| (id, window.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_mode_uses_start_hour_only() {
        assert_eq!(parse_window_cutoff("09:00-12:00", WindowMode::Literal).unwrap(), 9.0);
        assert_eq!(parse_window_cutoff("14:45-17:00", WindowMode::Literal).unwrap(), 14.0);
        // End component is never inspected.
        assert_eq!(parse_window_cutoff("09:30-garbage", WindowMode::Literal).unwrap(), 9.0);
    }

    #[test]
    fn literal_mode_combines_both_hour_digits() {
        assert_eq!(parse_window_cutoff("23:59-23:59", WindowMode::Literal).unwrap(), 23.0);
        assert_eq!(parse_window_cutoff("00:10-01:00", WindowMode::Literal).unwrap(), 0.0);
        assert_eq!(parse_window_cutoff("07-08", WindowMode::Literal).unwrap(), 7.0);
        // Non-ASCII digits are not hours.
        assert!(parse_window_cutoff("\u{0660}\u{0669}:00-12:00", WindowMode::Literal).is_err());
    }

    #[test]
    fn literal_mode_rejects_malformed_input() {
        for window in ["0900", "9-12", "9:00-12:00", "ab:00-12:00", "-12:00", ""] {
            let err = parse_window_cutoff(window, WindowMode::Literal).expect_err(window);
            assert!(
                matches!(err, Error::InvalidWindowFormat { .. }),
                "{window} should be rejected"
            );
        }
    }

    #[test]
    fn corrected_mode_honours_minutes() {
        assert_eq!(parse_window_cutoff("09:30-12:00", WindowMode::Corrected).unwrap(), 9.5);
        assert_eq!(parse_window_cutoff("09:00-12:00", WindowMode::Corrected).unwrap(), 9.0);
        assert_eq!(parse_window_cutoff(" 07:15 - 08:00 ", WindowMode::Corrected).unwrap(), 7.25);
    }

    #[test]
    fn corrected_mode_validates_end() {
        assert!(parse_window_cutoff("09:00-25:00", WindowMode::Corrected).is_err());
        assert!(parse_window_cutoff("12:00-09:00", WindowMode::Corrected).is_err());
        assert!(parse_window_cutoff("09:00", WindowMode::Corrected).is_err());
    }

    #[test]
    fn delivery_window_displays_normalised() {
        let window = DeliveryWindow::parse(" 09:05 - 12:00").unwrap();
        assert_eq!(window.to_string(), "09:05-12:00");
    }

    #[test]
    fn windows_collect_from_pairs() {
        let windows: DeliveryWindows = [(2, "09:00-12:00"), (3, "14:00-17:00")].into_iter().collect();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows.get(3), Some("14:00-17:00"));
        assert_eq!(windows.get(4), None);
    }
}
