use chrono::{DateTime, Local, TimeZone};

/// Formats a time as a horizontal-axis label, `HH:MM:SS.ffffff`.
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%H:%M:%S%.6f").to_string()
}

/// Label for a sample taken now, in local time.
pub fn now_label() -> String {
    format_timestamp(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn label_has_microsecond_precision() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_micro_opt(7, 5, 9, 42)
            .unwrap()
            .and_utc();
        assert_eq!(format_timestamp(&time), "07:05:09.000042");
    }

    #[test]
    fn label_ignores_the_date() {
        let a = Utc.with_ymd_and_hms(2020, 1, 1, 23, 59, 59).unwrap();
        let b = Utc.with_ymd_and_hms(2031, 6, 9, 23, 59, 59).unwrap();
        assert_eq!(format_timestamp(&a), format_timestamp(&b));
    }

    #[test]
    fn now_label_has_fixed_width() {
        assert_eq!(now_label().len(), "00:00:00.000000".len());
    }
}
