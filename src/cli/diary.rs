use chrono::NaiveDate;
use mealprep_shared::{Error, format_date};
use std::io::Write;

use crate::config::Config;

/// Print the diary entries closest to `today`.
pub fn show(
    config: &Config,
    today: NaiveDate,
    before: Option<usize>,
    after: Option<usize>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let catalog = super::load_catalog(config)?;
    let diary = super::load_diary(config, &catalog)?;

    let around = diary.filter_around(
        today,
        before.unwrap_or(config.display.max_before),
        after.unwrap_or(config.display.max_after),
    );

    if around.is_empty() {
        writeln!(out, "The meal diary is empty.")?;
    } else {
        writeln!(out, "{around}")?;
    }

    Ok(())
}

/// Record `meal_name` on `date`, replacing whatever the diary already holds
/// for that date.
pub fn add(config: &Config, date: NaiveDate, meal_name: &str) -> anyhow::Result<()> {
    let catalog = super::load_catalog(config)?;
    let diary = super::load_diary(config, &catalog)?;

    let meal = catalog.meal(meal_name)?;
    let replaced = diary.get(&date).map(|existing| existing.name().to_owned());
    diary.with_entry(date, meal.clone()).to_file(&config.data.diary_file)?;

    tracing::info!(
        date = %format_date(&date),
        meal = meal.name(),
        replaced = replaced.as_deref(),
        "meal added to diary"
    );

    Ok(())
}

pub fn remove(config: &Config, dates: &[NaiveDate]) -> anyhow::Result<()> {
    let catalog = super::load_catalog(config)?;
    let diary = super::load_diary(config, &catalog)?;

    let missing: Vec<String> = dates
        .iter()
        .filter(|d| !diary.contains(d))
        .map(format_date)
        .collect();

    if !missing.is_empty() {
        return Err(Error::Usage(format!("not in the meal diary: {}", missing.join(", "))).into());
    }

    diary.except_dates(dates).to_file(&config.data.diary_file)?;

    tracing::info!(count = dates.len(), "meals removed from diary");

    Ok(())
}
