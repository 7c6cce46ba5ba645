use mealprep_shared::{Error, Result, bail};
use std::collections::HashMap;
use std::path::Path;

use crate::{Meal, MealCollection, RECIPE_EXTENSION, read_recipe};

/// Registry of every known meal, built once at startup and passed by reference.
#[derive(Clone, Debug, Default)]
pub struct MealCatalog {
    meals: MealCollection,
    by_name: HashMap<String, Meal>,
}

impl MealCatalog {
    pub fn new(meals: impl IntoIterator<Item = Meal>) -> Result<Self> {
        let meals = MealCollection::new(meals);
        let mut by_name = HashMap::with_capacity(meals.len());

        for meal in meals.iter() {
            if by_name.insert(meal.name().to_owned(), meal.clone()).is_some() {
                bail!("the meal \"{}\" is defined more than once", meal.name());
            }
        }

        Ok(Self { meals, by_name })
    }

    /// Load every `*.yaml` recipe in `dir`, sorted by meal name.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == RECIPE_EXTENSION) {
                paths.push(path);
            }
        }

        paths.sort();

        let mut meals = Vec::with_capacity(paths.len());
        for path in paths.iter() {
            meals.push(read_recipe(path)?);
        }

        tracing::debug!(dir = %dir.display(), count = meals.len(), "loaded recipes");

        Self::new(meals)
    }

    pub fn meals(&self) -> &MealCollection {
        &self.meals
    }

    pub fn get(&self, name: &str) -> Option<&Meal> {
        self.by_name.get(name)
    }

    pub fn meal(&self, name: &str) -> Result<Meal> {
        self.get(name)
            .cloned()
            .ok_or_else(|| Error::Usage(format!("unable to find the meal \"{name}\"")))
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}
