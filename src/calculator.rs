//! Pace calculator.
//!
//! Turns a free-text distance and finish time into pace, speed and
//! predicted finish times for the standard race distances. Every input is
//! parsed leniently: anything that does not read as a number counts as zero,
//! so the view always has something to render.

/// Unit the distance field is entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Meters,
}

impl DistanceUnit {
    pub const ALL: [DistanceUnit; 2] = [DistanceUnit::Kilometers, DistanceUnit::Meters];

    pub fn label(&self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "км",
            DistanceUnit::Meters => "м",
        }
    }

    /// Convert a value in this unit to kilometers.
    pub fn to_km(&self, value: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => value,
            DistanceUnit::Meters => value / 1000.0,
        }
    }
}

/// A named race distance used for finish time predictions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceDistance {
    pub label: &'static str,
    pub km: f64,
}

pub const REFERENCE_DISTANCES: [ReferenceDistance; 8] = [
    ReferenceDistance { label: "400 м", km: 0.4 },
    ReferenceDistance { label: "1 км", km: 1.0 },
    ReferenceDistance { label: "3 км", km: 3.0 },
    ReferenceDistance { label: "5 км", km: 5.0 },
    ReferenceDistance { label: "10 км", km: 10.0 },
    ReferenceDistance { label: "Полумарафон", km: 21.0975 },
    ReferenceDistance { label: "Марафон", km: 42.195 },
    ReferenceDistance { label: "100 км", km: 100.0 },
];

/// Raw calculator fields, exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorInput {
    pub distance: String,
    pub unit: DistanceUnit,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Default for CalculatorInput {
    /// 10 km in 50 minutes.
    fn default() -> Self {
        Self {
            distance: "10".to_string(),
            unit: DistanceUnit::Kilometers,
            hours: "0".to_string(),
            minutes: "50".to_string(),
            seconds: "0".to_string(),
        }
    }
}

impl CalculatorInput {
    pub fn distance_km(&self) -> f64 {
        self.unit.to_km(parse_lenient_float(&self.distance))
    }

    pub fn total_seconds(&self) -> i64 {
        let hours = parse_lenient_int(&self.hours);
        let minutes = parse_lenient_int(&self.minutes);
        let seconds = parse_lenient_int(&self.seconds);
        hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds)
    }
}

/// Predicted finish time for one reference distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub distance: ReferenceDistance,
    pub seconds: f64,
}

/// Everything derived from a [`CalculatorInput`].
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorResult {
    pub distance_km: f64,
    pub total_minutes: f64,
    /// Minutes per kilometer.
    pub pace: f64,
    /// Kilometers per hour.
    pub speed: f64,
    pub predictions: Vec<Prediction>,
}

impl CalculatorResult {
    pub fn pace_display(&self) -> String {
        format_pace(self.pace)
    }

    pub fn speed_display(&self) -> String {
        format_speed(self.speed)
    }
}

pub fn compute(input: &CalculatorInput) -> CalculatorResult {
    let distance_km = input.distance_km();
    let total_minutes = input.total_seconds() as f64 / 60.0;

    let pace = if distance_km > 0.0 {
        total_minutes / distance_km
    } else {
        0.0
    };
    let speed = if total_minutes > 0.0 {
        distance_km / (total_minutes / 60.0)
    } else {
        0.0
    };

    let predictions = REFERENCE_DISTANCES
        .iter()
        .map(|d| Prediction {
            distance: *d,
            seconds: d.km * pace * 60.0,
        })
        .collect();

    CalculatorResult {
        distance_km,
        total_minutes,
        pace,
        speed,
        predictions,
    }
}

/// Parse a decimal number the way a browser number field does.
///
/// The first comma is treated as a decimal point. Leading whitespace is
/// skipped and the longest numeric prefix is used, so `"12km"` reads as 12.
/// Returns 0 when no number can be read.
pub fn parse_lenient_float(text: &str) -> f64 {
    let normalized = text.replacen(',', ".", 1);
    let s = normalized.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when it has at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => 0.0,
    }
}

/// Parse the leading integer of `text`, ignoring whatever follows it.
///
/// `"1.9"` reads as 1 and `"abc"` as 0. Values are not range checked, but
/// anything past 19 digits saturates at `i64::MAX` instead of growing into
/// a float.
pub fn parse_lenient_int(text: &str) -> i64 {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative {
        -value
    } else {
        value
    }
}

/// Round half up, matching the rounding browsers apply to time displays.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Format a pace in minutes per kilometer as `M:SS`.
///
/// Zero and non-finite paces render as `0:00`. Seconds that round up to 60
/// are printed as-is (`4:60`), not carried into the minutes.
pub fn format_pace(pace: f64) -> String {
    if pace == 0.0 || !pace.is_finite() {
        return "0:00".to_string();
    }
    let minutes = pace.floor();
    let seconds = round_half_up((pace - minutes) * 60.0);
    format!("{}:{:0>2}", whole_number(minutes), whole_number(seconds))
}

/// Format a duration in seconds as `H:MM:SS`, or `M:SS` under an hour.
///
/// Zero and non-finite durations render as `-`.
pub fn format_time(total_seconds: f64) -> String {
    if total_seconds == 0.0 || !total_seconds.is_finite() {
        return "-".to_string();
    }
    let hours = (total_seconds / 3600.0).floor();
    let minutes = ((total_seconds % 3600.0) / 60.0).floor();
    let seconds = round_half_up(total_seconds % 60.0);

    if hours > 0.0 {
        format!(
            "{}:{:0>2}:{:0>2}",
            whole_number(hours),
            whole_number(minutes),
            whole_number(seconds)
        )
    } else {
        format!("{}:{:0>2}", whole_number(minutes), whole_number(seconds))
    }
}

/// Format a speed with two decimals. Infinite speeds read `Infinity`.
pub fn format_speed(speed: f64) -> String {
    if speed.is_nan() {
        "NaN".to_string()
    } else if speed == f64::INFINITY {
        "Infinity".to_string()
    } else if speed == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if speed.abs() >= 1e21 {
        exponent_notation(speed)
    } else {
        format!("{:.2}", speed + 0.0)
    }
}

/// Print an integral float in full, switching to `1e+21` style from 1e21 up.
/// Adding zero turns `-0` into `0`.
fn whole_number(value: f64) -> String {
    let value = value + 0.0;
    if value.abs() < 1e21 {
        format!("{}", value)
    } else {
        exponent_notation(value)
    }
}

fn exponent_notation(value: f64) -> String {
    let text = format!("{:e}", value);
    if text.contains("e-") {
        text
    } else {
        text.replacen('e', "e+", 1)
    }
}
