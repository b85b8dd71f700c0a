//! Number formatting for stat cards and chart tooltips.

use num_format::{Locale, ToFormattedString};

/// Formats a percentage for display.
///
/// Values strictly between 0 and 0.1 keep two decimals so small shares do
/// not render as `0`. Everything else is rounded to one decimal with any
/// trailing `.0` dropped.
#[must_use]
pub fn format_smart_percent(value: f64) -> String {
    if value > 0.0 && value < 0.1 {
        return format!("{value:.2}");
    }
    let rounded = format!("{value:.1}");
    match rounded.strip_suffix(".0") {
        Some(whole) if whole == "-0" => "0".to_string(),
        Some(whole) => whole.to_string(),
        None => rounded,
    }
}

/// Formats a count with `,` thousands separators.
#[must_use]
pub fn format_count(count: u64) -> String {
    count.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_shares_keep_two_decimals() {
        assert_eq!(format_smart_percent(0.05), "0.05");
        assert_eq!(format_smart_percent(0.004), "0.00");
    }

    #[test]
    fn regular_shares_use_one_decimal() {
        assert_eq!(format_smart_percent(25.0), "25");
        assert_eq!(format_smart_percent(33.333), "33.3");
        assert_eq!(format_smart_percent(0.1), "0.1");
        assert_eq!(format_smart_percent(0.0), "0");
        assert_eq!(format_smart_percent(100.0), "100");
    }

    #[test]
    fn counts_get_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(9_876_543), "9,876,543");
    }
}
