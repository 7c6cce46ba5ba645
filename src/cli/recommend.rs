use chrono::NaiveDate;
use mealprep_mealplan::{MealSelector, Reviewer};
use std::io::Write;

use crate::config::Config;

/// Run an interactive session and save the confirmed meals.
///
/// `dates` falls back to `plan.dates` and `seed` to `plan.seed`.
pub fn run(
    config: &Config,
    dates: Vec<NaiveDate>,
    seed: Option<u64>,
    reviewer: &mut impl Reviewer,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let dates = match dates.is_empty() {
        true => config.plan.dates()?,
        false => dates,
    };

    if dates.is_empty() {
        anyhow::bail!("no dates to plan, pass --date or set plan.dates");
    }

    let catalog = super::load_catalog(config)?;
    let diary = super::load_diary(config, &catalog)?;
    let rules = config.plan.rule_collection()?;

    tracing::info!(dates = dates.len(), rules = rules.len(), "recommending meals");

    let mut selector = MealSelector::new(
        catalog.meals().clone(),
        rules,
        diary.clone(),
        seed.or(config.plan.seed),
    );

    let Some(confirmed) = selector.recommend_until_confirmed(&dates, reviewer)? else {
        writeln!(out, "No changes made.")?;
        return Ok(());
    };

    diary.upsert(&confirmed).to_file(&config.data.diary_file)?;
    writeln!(
        out,
        "Saved {} meals to {}.",
        confirmed.len(),
        config.data.diary_file.display()
    )?;

    Ok(())
}
