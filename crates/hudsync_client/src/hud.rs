//! Formatting and conversion helpers for HUD panels.
//!
//! Small, host-independent functions that every layout ends up needing.
//! The quirks are load-bearing: panels and server scripts already agree
//! on these exact behaviors.

use hudsync_shared::DataValue;

/// Offset between a SteamID64 and its 32-bit account id.
const STEAM_ID64_IDENT_OFFSET: u64 = 6_561_197_960_265_728;

/// Formats a second count as `M:SS`, with optional fractional digits.
///
/// Seconds are rounded to `decimals` places first; when that rounds up to
/// a full minute, the minute is carried so 59.7s at zero decimals reads
/// `1:00`, never `0:60`. Trailing zero decimals are trimmed, so whole
/// values print the same regardless of `decimals`.
///
/// ```
/// use hudsync_client::hud::format_time;
///
/// assert_eq!(format_time(75.0, 0), "1:15");
/// assert_eq!(format_time(3600.0, 0), "60:00");
/// assert_eq!(format_time(59.7, 0), "1:00");
/// ```
#[must_use]
pub fn format_time(seconds: f64, decimals: usize) -> String {
    let minutes = (seconds / 60.0).floor() as i64;
    let rounded: f64 = format!("{:.decimals$}", seconds % 60.0)
        .parse()
        .unwrap_or(0.0);

    if (rounded - 60.0).abs() < f64::EPSILON {
        return format!("{}:00", minutes + 1);
    }

    let pad = if rounded < 10.0 { "0" } else { "" };
    format!("{minutes}:{pad}{rounded}")
}

/// Interprets a stored value as the wire's loose boolean.
///
/// Server tables encode flags as `1` or `"1"`; everything else is false.
/// Real JSON booleans are honored too.
#[must_use]
pub fn value_to_bool(value: &DataValue) -> bool {
    match value {
        DataValue::Bool(b) => *b,
        DataValue::Number(n) => n.as_f64() == Some(1.0),
        DataValue::String(s) => s == "1",
        _ => false,
    }
}

/// Clamps `value` into `[min, max]`.
///
/// When `min > max`, `min` wins. That keeps degenerate panel math from
/// panicking mid-frame.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Component-wise equality of two world vectors.
#[must_use]
pub fn vectors_equal(a: [f32; 3], b: [f32; 3]) -> bool {
    a == b
}

/// Uppercases the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a SteamID64 (as the wire sends it: a decimal string) to the
/// 32-bit account id the scoreboard tables are keyed by.
///
/// Only the low 16 digits participate; returns `None` for strings that
/// are not the decimal tail of a valid SteamID64.
#[must_use]
pub fn steam_id64_to_id32(steam_id64: &str) -> Option<u32> {
    let start = steam_id64.len().saturating_sub(16);
    let tail = steam_id64.get(start..)?;
    let value: u64 = tail.parse().ok()?;
    let account = value.checked_sub(STEAM_ID64_IDENT_OFFSET)?;
    u32::try_from(account).ok()
}
