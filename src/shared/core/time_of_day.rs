use once_cell::sync::Lazy;
use regex::Regex;

// Two digit hour 00-23, colon, two digit minute 00-59.
static WALL_CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid wall clock regex"));

/// Whether `value` is a 24-hour `HH:MM` wall-clock time.
pub fn is_wall_clock_time(value: &str) -> bool {
    WALL_CLOCK.is_match(value)
}

#[cfg(test)]
mod time_of_day_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("00:00")]
    #[case("09:05")]
    #[case("17:30")]
    #[case("23:59")]
    fn it_should_accept_padded_times(#[case] value: &str) {
        assert!(is_wall_clock_time(value));
    }

    #[rstest]
    #[case("9:5")]
    #[case("9:05")]
    #[case("24:00")]
    #[case("25:00")]
    #[case("12:60")]
    #[case("12:5")]
    #[case("12-30")]
    #[case(" 12:30")]
    #[case("12:30:00")]
    #[case("")]
    fn it_should_reject_anything_else(#[case] value: &str) {
        assert!(!is_wall_clock_time(value));
    }
}
