use chrono::{DateTime, Local, TimeZone};

/// `dttm` layout: 14 digits, local time, no zone marker.
pub const DTTM_FORMAT: &str = "%Y%m%d%H%M%S";

/// Current local time as a `dttm` field value.
pub fn dttm() -> String {
    format_dttm(&Local::now())
}

/// Format any timestamp as a `dttm` field value.
pub fn format_dttm<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(DTTM_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_dttm() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_dttm(&at), "20240101120000");
    }

    #[test]
    fn test_dttm_is_fourteen_digits() {
        let now = dttm();
        assert_eq!(now.len(), 14);
        assert!(now.chars().all(|c| c.is_ascii_digit()));
    }
}
