use std::time::Duration;

/// Parse a compact duration token like `30s`, `10m`, `2h`, `1d`, or plain seconds.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let mut chars = value.chars();
    let unit = chars.next_back();

    let (number_raw, multiplier) = match unit {
        Some('s' | 'S') => (chars.as_str(), 1_u64),
        Some('m' | 'M') => (chars.as_str(), 60_u64),
        Some('h' | 'H') => (chars.as_str(), 60_u64 * 60),
        Some('d' | 'D') => (chars.as_str(), 60_u64 * 60 * 24),
        Some(last) if last.is_ascii_digit() => (value, 1_u64),
        _ => return None,
    };

    let number = number_raw.trim().parse::<u64>().ok()?;
    if number == 0 {
        return None;
    }

    number.checked_mul(multiplier)
}

/// [`parse_duration_seconds`] as a [`Duration`].
pub fn parse_duration(raw: &str) -> Option<Duration> {
    parse_duration_seconds(raw).map(Duration::from_secs)
}
