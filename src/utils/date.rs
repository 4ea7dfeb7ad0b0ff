use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Current calendar date in UTC, the same clock the log timestamps use.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Validate a `YYYY-MM` month selector and return it normalized.
pub fn parse_month(s: &str) -> AppResult<String> {
    let with_day = format!("{s}-01");
    let d = NaiveDate::parse_from_str(&with_day, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidMonth(s.to_string()))?;
    Ok(format!("{:04}-{:02}", d.year(), d.month()))
}

/// Current month as `YYYY-MM`.
pub fn this_month() -> String {
    let t = today();
    format!("{:04}-{:02}", t.year(), t.month())
}

/// Human form of a `YYYY-MM` selector, e.g. "March 2024".
pub fn month_label(month: &str) -> String {
    match month.split_once('-').and_then(|(y, m)| {
        m.parse::<u32>().ok().map(|m| (y, m))
    }) {
        Some((year, m)) => format!("{} {}", month_name(m), year),
        None => month.to_string(),
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parser_normalizes_and_rejects() {
        assert_eq!(parse_month("2024-03").unwrap(), "2024-03");
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("march").is_err());
    }

    #[test]
    fn month_label_is_human_readable() {
        assert_eq!(month_label("2024-03"), "March 2024");
        assert_eq!(month_label("garbage"), "garbage");
    }
}
