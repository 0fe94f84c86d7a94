/// Placeholder shown wherever a value is absent.
pub const EM_DASH: &str = "—";

/// Compact money-style magnitude: `1.5B`, `3.2M`, `2.5k`, else the plain number.
pub fn format_compact(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.1}k", value / 1e3)
    } else {
        format!("{value}")
    }
}

/// A fractional share (0..1) as a percentage with one decimal: `0.6` -> `60.0%`.
pub fn format_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

/// A signed percentage delta: `7.5` -> `+7.5%`, `-3.0` -> `-3.0%`, `0` -> `0.0%`.
pub fn format_signed_delta(delta: f64) -> String {
    let sign = if delta > 0.0 { "+" } else { "" };
    format!("{sign}{delta:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_magnitudes() {
        assert_eq!(format_compact(1_500_000_000.0), "1.5B");
        assert_eq!(format_compact(3_200_000.0), "3.2M");
        assert_eq!(format_compact(2_500.0), "2.5k");
        assert_eq!(format_compact(999.0), "999");
        assert_eq!(format_compact(12.5), "12.5");
    }

    #[test]
    fn shares_and_deltas() {
        assert_eq!(format_share(0.6), "60.0%");
        assert_eq!(format_share(0.1), "10.0%");
        assert_eq!(format_signed_delta(7.5), "+7.5%");
        assert_eq!(format_signed_delta(-3.0), "-3.0%");
        assert_eq!(format_signed_delta(0.0), "0.0%");
    }
}
