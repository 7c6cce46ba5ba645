use chrono::{Datelike, NaiveDate};

/// Format used by the diary file and every date given on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| crate::Error::Usage(format!("invalid date \"{value}\" ({e}), expected YYYY-MM-DD")))
}

/// Ordinal suffix of a day of the month, e.g. 2 => "nd", 13 => "th"
pub fn day_suffix(day: u32) -> &'static str {
    match day {
        4..=20 | 24..=30 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// Human readable date such as `Wed 5th Jan 2022`
///
/// `pad_day` left-pads single digit days with a space so that a column of
/// dates lines up. The year is only written when `include_year` is set.
pub fn pretty_date(date: &NaiveDate, pad_day: bool, include_year: bool) -> String {
    let day = date.day();
    let day_str = if pad_day && day < 10 {
        format!(" {day}")
    } else {
        day.to_string()
    };

    let mut ret = format!(
        "{} {}{} {}",
        date.format("%a"),
        day_str,
        day_suffix(day),
        date.format("%b")
    );

    if include_year {
        ret.push_str(&format!(" {}", date.format("%Y")));
    }

    ret
}
