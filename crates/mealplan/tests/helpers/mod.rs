#![allow(dead_code)]

use chrono::NaiveDate;
use mealprep_mealplan::{MealDiary, Review, Reviewer};
use mealprep_recipe::{Meal, MealCollection, MealMeat, MealProperties, MealTag};
use mealprep_shared::Result;
use std::collections::VecDeque;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn meal(name: &str, meat: MealMeat, tags: &[MealTag]) -> Meal {
    Meal::new(name, vec![], MealProperties::new(meat), tags.iter().copied()).expect("valid test meal")
}

/// Enough variety to plan a few weeks under every built-in rule.
pub fn catalog() -> MealCollection {
    MealCollection::new([
        meal("Roast Beef", MealMeat::Beef, &[MealTag::Roast]),
        meal("Roast Chicken", MealMeat::Chicken, &[MealTag::Roast]),
        meal("Roast Lamb", MealMeat::Lamb, &[MealTag::Roast, MealTag::Winter]),
        meal("Spaghetti Bolognese", MealMeat::Beef, &[MealTag::Pasta]),
        meal("Carbonara", MealMeat::Pork, &[MealTag::Pasta]),
        meal("Pesto Pasta", MealMeat::None, &[MealTag::Pasta, MealTag::Vegetarian]),
        meal("Chicken Korma", MealMeat::Chicken, &[MealTag::Indian]),
        meal("Dal", MealMeat::None, &[MealTag::Indian, MealTag::Vegetarian]),
        meal("Fish Pie", MealMeat::Fish, &[]),
        meal("Fish Tacos", MealMeat::Fish, &[]),
        meal("Pork Chops", MealMeat::Pork, &[]),
        meal("Turkey Burgers", MealMeat::Turkey, &[]),
        meal("Chilli", MealMeat::Beef, &[MealTag::Winter]),
        meal("Omelette", MealMeat::None, &[MealTag::Vegetarian]),
        meal("Risotto", MealMeat::None, &[MealTag::Vegetarian]),
        meal("Lamb Tagine", MealMeat::Lamb, &[]),
        meal("Stir Fry", MealMeat::Chicken, &[]),
        meal("Shepherd's Pie", MealMeat::Lamb, &[MealTag::Winter]),
    ])
}

/// Consecutive dates starting at `start`.
pub fn dates_from(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    start.iter_days().take(count).collect()
}

/// Plays back canned answers and records every proposal it was shown.
#[derive(Default)]
pub struct ScriptedReviewer {
    reviews: VecDeque<Review>,
    changes: VecDeque<Option<Vec<NaiveDate>>>,
    pub proposals: Vec<MealDiary>,
}

impl ScriptedReviewer {
    pub fn new(
        reviews: impl IntoIterator<Item = Review>,
        changes: impl IntoIterator<Item = Option<Vec<NaiveDate>>>,
    ) -> Self {
        Self {
            reviews: reviews.into_iter().collect(),
            changes: changes.into_iter().collect(),
            proposals: vec![],
        }
    }
}

impl Reviewer for ScriptedReviewer {
    fn review(&mut self, proposal: &MealDiary) -> Result<Review> {
        self.proposals.push(proposal.clone());

        Ok(self.reviews.pop_front().unwrap_or(Review::Confirm))
    }

    fn dates_to_change(&mut self, _proposal: &MealDiary) -> Result<Option<Vec<NaiveDate>>> {
        Ok(self.changes.pop_front().unwrap_or(None))
    }
}
