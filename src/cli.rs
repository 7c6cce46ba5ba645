pub mod diary;
pub mod meals;
pub mod recommend;

use mealprep_mealplan::MealDiary;
use mealprep_recipe::MealCatalog;

use crate::config::Config;

pub fn load_catalog(config: &Config) -> anyhow::Result<MealCatalog> {
    let catalog = MealCatalog::from_dir(&config.data.recipes_dir)?;
    tracing::debug!(
        recipes_dir = %config.data.recipes_dir.display(),
        meals = catalog.len(),
        "catalog loaded"
    );

    Ok(catalog)
}

/// A diary file that does not exist yet reads as an empty diary.
pub fn load_diary(config: &Config, catalog: &MealCatalog) -> anyhow::Result<MealDiary> {
    let path = &config.data.diary_file;
    if !path.exists() {
        tracing::info!(diary_file = %path.display(), "no meal diary yet, starting empty");
        return Ok(MealDiary::new());
    }

    Ok(MealDiary::from_file(path, catalog)?)
}
