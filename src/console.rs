use chrono::{Datelike, NaiveDate};
use mealprep_mealplan::{MealDiary, Review, Reviewer};
use mealprep_shared::{Result, format_date, parse_date};
use std::io::{BufRead, Write};

const QUIT: &str = "q";

/// Interactive [`Reviewer`] reading answers line by line.
///
/// End of input is treated as quitting.
pub struct ConsoleReviewer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleReviewer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }
}

impl<R: BufRead, W: Write> Reviewer for ConsoleReviewer<R, W> {
    fn review(&mut self, proposal: &MealDiary) -> Result<Review> {
        writeln!(self.output, "\nRecommended meals:\n{proposal}\n")?;

        loop {
            let Some(answer) = self.prompt("Accept? [Y]es, [N]o, [Q]uit: ")? else {
                return Ok(Review::Cancel);
            };

            match answer.to_ascii_lowercase().as_str() {
                "y" => return Ok(Review::Confirm),
                "n" => return Ok(Review::Reject),
                QUIT => return Ok(Review::Cancel),
                _ => writeln!(self.output, "Please answer Y, N or Q.")?,
            }
        }
    }

    fn dates_to_change(&mut self, proposal: &MealDiary) -> Result<Option<Vec<NaiveDate>>> {
        let dates = proposal.dates();

        loop {
            let Some(answer) = self.prompt("Dates to change, comma separated ([Q]uit): ")? else {
                return Ok(None);
            };

            match parse_dates_to_change(&answer, &dates) {
                Ok(selection) => return Ok(selection),
                Err(reason) => writeln!(self.output, "{reason}")?,
            }
        }
    }
}

/// Parse a comma separated selection among `dates`.
///
/// Each entry is an ISO date or a day of the month, optionally suffixed
/// (`5`, `5th`), that matches exactly one of `dates`. `Ok(None)` means quit.
pub fn parse_dates_to_change(
    answer: &str,
    dates: &[NaiveDate],
) -> std::result::Result<Option<Vec<NaiveDate>>, String> {
    let entries: Vec<&str> = answer
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect();

    if entries.iter().any(|e| e.eq_ignore_ascii_case(QUIT)) {
        return Ok(None);
    }

    if entries.is_empty() {
        return Err("Enter at least one date.".to_owned());
    }

    let mut selection = Vec::with_capacity(entries.len());
    for entry in entries {
        let date = match_entry(entry, dates)?;
        if !selection.contains(&date) {
            selection.push(date);
        }
    }

    Ok(Some(selection))
}

fn match_entry(entry: &str, dates: &[NaiveDate]) -> std::result::Result<NaiveDate, String> {
    if let Ok(date) = parse_date(entry) {
        return match dates.contains(&date) {
            true => Ok(date),
            false => Err(format!("{} is not one of the recommended dates.", format_date(&date))),
        };
    }

    let digits = entry.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &entry[digits.len()..];
    let day: u32 = digits
        .parse()
        .map_err(|_| format!("Could not understand \"{entry}\"."))?;

    if !suffix.is_empty() && !suffix.eq_ignore_ascii_case(mealprep_shared::day_suffix(day)) {
        return Err(format!("Could not understand \"{entry}\"."));
    }

    let matching: Vec<NaiveDate> = dates.iter().copied().filter(|d| d.day() == day).collect();
    match matching.as_slice() {
        [date] => Ok(*date),
        [] => Err(format!("No recommended date falls on day {day}.")),
        _ => Err(format!("Day {day} is ambiguous, use YYYY-MM-DD.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealprep_recipe::{Meal, MealMeat, MealProperties};
    use std::io::Cursor;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn proposal() -> MealDiary {
        let meal = |name: &str| Meal::new(name, vec![], MealProperties::new(MealMeat::None), []).unwrap();

        MealDiary::from_entries([
            (date(2024, 1, 30), meal("Dal")),
            (date(2024, 1, 31), meal("Omelette")),
            (date(2024, 2, 1), meal("Risotto")),
        ])
        .unwrap()
    }

    fn reviewer(input: &str) -> ConsoleReviewer<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleReviewer::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_review_reprompts_until_valid() {
        let mut console = reviewer("maybe\n\nN\n");

        assert_eq!(console.review(&proposal()).unwrap(), Review::Reject);

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Omelette"));
        assert_eq!(output.matches("Please answer").count(), 2);
    }

    #[test]
    fn test_review_answers() {
        assert_eq!(reviewer("y\n").review(&proposal()).unwrap(), Review::Confirm);
        assert_eq!(reviewer("Q\n").review(&proposal()).unwrap(), Review::Cancel);
        assert_eq!(reviewer("").review(&proposal()).unwrap(), Review::Cancel);
    }

    #[test]
    fn test_dates_to_change() {
        let mut console = reviewer("2024-01-29\n31st, 2024-02-01, 31\n");

        let dates = console.dates_to_change(&proposal()).unwrap();
        assert_eq!(dates, Some(vec![date(2024, 1, 31), date(2024, 2, 1)]));

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("2024-01-29 is not one of the recommended dates."));
    }

    #[test]
    fn test_dates_to_change_quit() {
        assert_eq!(reviewer("30, q\n").dates_to_change(&proposal()).unwrap(), None);
        assert_eq!(reviewer("").dates_to_change(&proposal()).unwrap(), None);
    }

    #[test]
    fn test_parse_dates_to_change() {
        let dates = proposal().dates();

        assert_eq!(parse_dates_to_change("1", &dates), Ok(Some(vec![date(2024, 2, 1)])));
        assert_eq!(parse_dates_to_change(" 30TH ", &dates), Ok(Some(vec![date(2024, 1, 30)])));
        assert!(parse_dates_to_change("", &dates).is_err());
        assert!(parse_dates_to_change("2nd", &dates).is_err());
        assert!(parse_dates_to_change("1th", &dates).is_err());
        assert!(parse_dates_to_change("tuesday", &dates).is_err());
    }

    #[test]
    fn test_parse_ambiguous_day() {
        let dates = vec![date(2024, 1, 5), date(2024, 2, 5)];

        let err = parse_dates_to_change("5", &dates).unwrap_err();
        assert!(err.contains("ambiguous"));
        assert_eq!(parse_dates_to_change("2024-02-05", &dates), Ok(Some(vec![date(2024, 2, 5)])));
    }
}
