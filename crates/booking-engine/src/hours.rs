//! Business-hours configuration.
//!
//! A [`BusinessHours`] table maps each weekday to an optional working window
//! in minutes since local midnight. Absent entry = closed that day. The
//! [`BusinessHours::from_settings`] normalizer accepts the heterogeneous
//! shapes tenant settings blobs have accumulated in production, so callers
//! can feed stored JSON straight in.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A working window within a single day, in minutes since midnight.
///
/// A window with `end_minutes <= start_minutes` is inert: the availability
/// engine yields no slots for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start_minutes: u16,
    pub end_minutes: u16,
}

impl DayWindow {
    pub fn new(start_minutes: u16, end_minutes: u16) -> Self {
        Self {
            start_minutes,
            end_minutes,
        }
    }

    /// Parse a `"9:00-17:00"` style range. Returns `None` on any malformed
    /// part rather than guessing.
    pub fn parse(s: &str) -> Option<Self> {
        let (start, end) = s.split_once('-')?;
        Some(Self {
            start_minutes: parse_time_of_day(start.trim())?,
            end_minutes: parse_time_of_day(end.trim())?,
        })
    }
}

/// Parse an `"H:MM"` / `"HH:MM"` clock label into minutes since midnight.
pub fn parse_time_of_day(s: &str) -> Option<u16> {
    let (h, m) = s.split_once(':')?;
    let h: u16 = h.trim().parse().ok()?;
    let m: u16 = m.trim().parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// Per-weekday working windows. Days without an entry are closed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusinessHours {
    // Indexed by days-from-Sunday: 0 = Sunday .. 6 = Saturday.
    days: [Option<DayWindow>; 7],
}

impl BusinessHours {
    /// All days closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Monday through Friday, 09:00–17:00. The fallback the availability
    /// engine uses when a caller supplies no hours at all.
    pub fn standard_week() -> Self {
        let window = DayWindow::new(9 * 60, 17 * 60);
        Self::new()
            .with(Weekday::Mon, window)
            .with(Weekday::Tue, window)
            .with(Weekday::Wed, window)
            .with(Weekday::Thu, window)
            .with(Weekday::Fri, window)
    }

    pub fn with(mut self, weekday: Weekday, window: DayWindow) -> Self {
        self.set(weekday, window);
        self
    }

    pub fn set(&mut self, weekday: Weekday, window: DayWindow) {
        self.days[Self::index(weekday)] = Some(window);
    }

    /// The working window for `weekday`, or `None` when closed.
    pub fn window_for(&self, weekday: Weekday) -> Option<DayWindow> {
        self.days[Self::index(weekday)]
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }

    /// Normalize a tenant-settings JSON blob into business hours.
    ///
    /// Accepts an object (or array) keyed by weekday number (0 = Sunday ..
    /// 6 = Saturday) whose values are any of the shapes seen in stored
    /// settings:
    ///
    /// - `"9:00-17:00"`
    /// - `{ "startMinutes": 540, "endMinutes": 1020 }`
    /// - `{ "start": 540, "end": 1020 }`
    /// - `{ "startTime": "9:00", "endTime": "17:00" }`
    ///
    /// Unrecognized keys and malformed entries are skipped. Returns `None`
    /// when no entry parses, so callers fall back to explicit defaults.
    pub fn from_settings(raw: &Value) -> Option<Self> {
        let mut hours = Self::new();

        let entries: Vec<(usize, &Value)> = match raw {
            Value::Object(map) => map
                .iter()
                .filter_map(|(k, v)| Some((k.parse::<usize>().ok()?, v)))
                .collect(),
            Value::Array(items) => items.iter().enumerate().collect(),
            _ => return None,
        };

        for (idx, val) in entries {
            if idx > 6 {
                continue;
            }
            if let Some(window) = Self::window_from_value(val) {
                hours.days[idx] = Some(window);
            }
        }

        if hours.is_empty() {
            None
        } else {
            Some(hours)
        }
    }

    fn window_from_value(val: &Value) -> Option<DayWindow> {
        match val {
            Value::String(s) => DayWindow::parse(s),
            Value::Object(obj) => {
                if let (Some(s), Some(e)) = (
                    minutes_field(obj.get("startMinutes")),
                    minutes_field(obj.get("endMinutes")),
                ) {
                    return Some(DayWindow::new(s, e));
                }
                if let (Some(s), Some(e)) =
                    (minutes_field(obj.get("start")), minutes_field(obj.get("end")))
                {
                    return Some(DayWindow::new(s, e));
                }
                if let (Some(Value::String(s)), Some(Value::String(e))) =
                    (obj.get("startTime"), obj.get("endTime"))
                {
                    return Some(DayWindow::new(
                        parse_time_of_day(s)?,
                        parse_time_of_day(e)?,
                    ));
                }
                None
            }
            _ => None,
        }
    }

    fn index(weekday: Weekday) -> usize {
        weekday.num_days_from_sunday() as usize
    }
}

/// Read a minutes-since-midnight field, rejecting values outside a day.
fn minutes_field(val: Option<&Value>) -> Option<u16> {
    let n = val?.as_u64()?;
    if n > 24 * 60 {
        return None;
    }
    Some(n as u16)
}
