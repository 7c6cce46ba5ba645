use chrono::{Datelike, NaiveDate, TimeDelta};
use mealprep_recipe::{Meal, MealCatalog, MealCollection};
use mealprep_shared::{DATE_FORMAT, Error, Result, bail, format_date, pretty_date};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::path::Path;

/// Date to meal history.
///
/// Every operation returning a `MealDiary` builds a new value. A proposal and
/// the committed history can be held side by side without one leaking into
/// the other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MealDiary {
    entries: BTreeMap<NaiveDate, Meal>,
}

impl MealDiary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails on a repeated date.
    pub fn from_entries(entries: impl IntoIterator<Item = (NaiveDate, Meal)>) -> Result<Self> {
        let mut diary = BTreeMap::new();
        for (date, meal) in entries {
            if diary.insert(date, meal).is_some() {
                bail!("the date {} appears more than once", format_date(&date));
            }
        }

        Ok(Self { entries: diary })
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&Meal> {
        self.entries.get(date)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.entries.contains_key(date)
    }

    /// Dates in ascending order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.entries.keys().copied().collect()
    }

    /// Meals in date order
    pub fn meals(&self) -> MealCollection {
        self.entries.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Meal)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the diary with `date` set to `meal`, replacing any existing entry
    pub fn with_entry(&self, date: NaiveDate, meal: Meal) -> MealDiary {
        let mut entries = self.entries.clone();
        entries.insert(date, meal);
        Self { entries }
    }

    /// Union of both diaries; entries of `other` win on shared dates.
    pub fn upsert(&self, other: &MealDiary) -> MealDiary {
        let mut entries = self.entries.clone();
        entries.extend(other.iter().map(|(d, m)| (*d, m.clone())));
        Self { entries }
    }

    /// Entries whose date is not a key of `other`
    pub fn difference(&self, other: &MealDiary) -> MealDiary {
        self.filter(|date, _| !other.contains(date))
    }

    pub fn except_dates<'a>(&self, dates: impl IntoIterator<Item = &'a NaiveDate>) -> MealDiary {
        let excluded: HashSet<&NaiveDate> = dates.into_iter().collect();
        self.filter(|date, _| !excluded.contains(date))
    }

    /// Entries in `[min_date, max_date)`, or on/after `min_date` when no max is given
    pub fn filter_dates(&self, min_date: NaiveDate, max_date: Option<NaiveDate>) -> MealDiary {
        self.filter(|date, _| *date >= min_date && max_date.is_none_or(|max| *date < max))
    }

    /// Entries no further than `delta` from `date`, in either direction
    pub fn filter_by_time_delta(&self, date: NaiveDate, delta: TimeDelta) -> MealDiary {
        self.filter(|d, _| (*d - date).abs() <= delta)
    }

    /// The `max_before` entries closest before `today` and the first
    /// `max_after` entries on or after it.
    pub fn filter_around(&self, today: NaiveDate, max_before: usize, max_after: usize) -> MealDiary {
        let before = self.entries.range(..today).rev().take(max_before);
        let after = self.entries.range(today..).take(max_after);

        Self {
            entries: before
                .chain(after)
                .map(|(d, m)| (*d, m.clone()))
                .collect(),
        }
    }

    /// Date strings to meal names, sorted by date
    pub fn representation(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(date, meal)| (format_date(date), meal.name().to_owned()))
            .collect()
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(&self.representation())?;

        std::fs::write(path, contents + "\n").map_err(|e| Error::Diary {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Read a diary written by [`MealDiary::to_file`], resolving meal names
    /// through `catalog`.
    pub fn from_file(path: impl AsRef<Path>, catalog: &MealCatalog) -> Result<Self> {
        let path = path.as_ref();
        let diary_error = |reason: String| Error::Diary {
            path: path.to_path_buf(),
            reason,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => diary_error("file could not be found".to_owned()),
            _ => diary_error(e.to_string()),
        })?;

        let representation: BTreeMap<String, String> = serde_json::from_str(&contents)
            .map_err(|e| diary_error(format!("could not be parsed as a JSON object of strings: {e}")))?;

        let mut entries = BTreeMap::new();
        for (date_string, meal_name) in representation.iter() {
            let date = NaiveDate::parse_from_str(date_string, DATE_FORMAT).map_err(|_| {
                diary_error(format!("\"{date_string}\" is not a YYYY-MM-DD date"))
            })?;

            let meal = catalog
                .get(meal_name)
                .ok_or_else(|| diary_error(format!("unknown meal \"{meal_name}\" on {date_string}")))?;

            if entries.insert(date, meal.clone()).is_some() {
                return Err(diary_error(format!("the date {date_string} appears more than once")));
            }
        }

        Ok(Self { entries })
    }

    fn filter(&self, mut predicate: impl FnMut(&NaiveDate, &Meal) -> bool) -> MealDiary {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(d, m)| predicate(d, m))
                .map(|(d, m)| (*d, m.clone()))
                .collect(),
        }
    }
}

impl fmt::Display for MealDiary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad_day = self.entries.keys().any(|d| d.day() >= 10);
        let years: BTreeSet<i32> = self.entries.keys().map(|d| d.year()).collect();
        let include_year = years.len() > 1;

        for (idx, (date, meal)) in self.entries.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", pretty_date(date, pad_day, include_year), meal.name())?;
        }

        Ok(())
    }
}
