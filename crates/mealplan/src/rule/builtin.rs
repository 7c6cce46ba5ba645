use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use mealprep_recipe::{Meal, MealCollection, MealMeat, MealTag};
use std::collections::HashSet;

use super::Rule;
use crate::MealDiary;

/// Drop every meal carrying `tag` when a meal with that tag is already
/// within `days` of `date`.
fn not_tag_twice_within(
    meals: &MealCollection,
    date: NaiveDate,
    diary: &MealDiary,
    tag: MealTag,
    days: i64,
) -> MealCollection {
    let tag_nearby = diary
        .filter_by_time_delta(date, TimeDelta::days(days))
        .meals()
        .iter()
        .any(|meal| meal.has_tag(tag));

    if !tag_nearby {
        return meals.clone();
    }

    meals.filter(|meal| !meal.has_tag(tag))
}

/// Sundays are for roasts
#[derive(Debug, Clone, Copy)]
pub struct ForceRoastOnSunday;

impl Rule for ForceRoastOnSunday {
    fn filter(&self, meals: &MealCollection, date: NaiveDate, _diary: &MealDiary) -> MealCollection {
        if date.weekday() != Weekday::Sun {
            return meals.clone();
        }

        meals.filter(|meal| meal.has_tag(MealTag::Roast))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NotRoastOnNonSunday;

impl Rule for NotRoastOnNonSunday {
    fn filter(&self, meals: &MealCollection, date: NaiveDate, _diary: &MealDiary) -> MealCollection {
        if date.weekday() == Weekday::Sun {
            return meals.clone();
        }

        meals.filter(|meal| !meal.has_tag(MealTag::Roast))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NotPastaTwiceWithinFiveDays;

impl Rule for NotPastaTwiceWithinFiveDays {
    fn filter(&self, meals: &MealCollection, date: NaiveDate, diary: &MealDiary) -> MealCollection {
        not_tag_twice_within(meals, date, diary, MealTag::Pasta, 5)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NotIndianTwiceWithinTenDays;

impl Rule for NotIndianTwiceWithinTenDays {
    fn filter(&self, meals: &MealCollection, date: NaiveDate, diary: &MealDiary) -> MealCollection {
        not_tag_twice_within(meals, date, diary, MealTag::Indian, 10)
    }
}

/// No meal twice within a week either side of the date
#[derive(Debug, Clone, Copy)]
pub struct NotSameMealWithinSevenDays;

impl Rule for NotSameMealWithinSevenDays {
    fn filter(&self, meals: &MealCollection, date: NaiveDate, diary: &MealDiary) -> MealCollection {
        let recent = diary.filter_by_time_delta(date, TimeDelta::days(7)).meals();
        let names_to_avoid: HashSet<&str> = recent.iter().map(|meal| meal.name()).collect();

        meals.filter(|meal| !names_to_avoid.contains(meal.name()))
    }
}

/// Meatless meals never clash with each other.
#[derive(Debug, Clone, Copy)]
pub struct NotSameMeatOnConsecutiveDays;

impl Rule for NotSameMeatOnConsecutiveDays {
    fn filter(&self, meals: &MealCollection, date: NaiveDate, diary: &MealDiary) -> MealCollection {
        let meats_to_avoid: HashSet<MealMeat> = diary
            .filter_by_time_delta(date, TimeDelta::days(1))
            .meals()
            .iter()
            .map(|meal| meal.meat())
            .filter(|meat| *meat != MealMeat::None)
            .collect();

        meals.filter(|meal| !meats_to_avoid.contains(&meal.meat()))
    }
}

/// Excludes exactly one meal on exactly one date. Built from user rejections.
#[derive(Debug, Clone)]
pub struct NotSpecifiedMealOnSpecifiedDate {
    date: NaiveDate,
    meal: Meal,
}

impl NotSpecifiedMealOnSpecifiedDate {
    pub fn new(date: NaiveDate, meal: Meal) -> Self {
        Self { date, meal }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn meal(&self) -> &Meal {
        &self.meal
    }
}

impl Rule for NotSpecifiedMealOnSpecifiedDate {
    fn filter(&self, meals: &MealCollection, date: NaiveDate, _diary: &MealDiary) -> MealCollection {
        if date != self.date {
            return meals.clone();
        }

        meals.filter(|meal| *meal != self.meal)
    }
}
