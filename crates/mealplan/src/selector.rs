use chrono::NaiveDate;
use mealprep_recipe::{Meal, MealCollection};
use mealprep_shared::{Error, Result, bail, format_date};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::{MealDiary, NotSpecifiedMealOnSpecifiedDate, RuleCollection};

/// Answer to a presented meal plan
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Review {
    Confirm,
    Reject,
    Cancel,
}

/// The person accepting or rejecting recommendations.
///
/// Both requests block until an answer is available.
pub trait Reviewer {
    fn review(&mut self, proposal: &MealDiary) -> Result<Review>;

    /// Dates of `proposal` to re-roll, or `None` to cancel the session.
    fn dates_to_change(&mut self, proposal: &MealDiary) -> Result<Option<Vec<NaiveDate>>>;
}

/// Assigns meals to dates with one step of lookahead.
///
/// Each date takes a random meal among those leaving the most choice for the
/// next date. There is no backtracking: a date left without any feasible
/// meal fails the whole call with [`Error::OutOfMeals`].
pub struct MealSelector {
    meals: MealCollection,
    rule_collection: RuleCollection,
    original_meal_diary: MealDiary,
    rng: StdRng,
}

impl MealSelector {
    /// `seed` makes tie-breaks reproducible. Without one the generator is
    /// seeded from the OS.
    pub fn new(
        meals: MealCollection,
        rule_collection: RuleCollection,
        meal_diary: MealDiary,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };

        Self {
            meals,
            rule_collection,
            original_meal_diary: meal_diary,
            rng,
        }
    }

    pub fn meals(&self) -> &MealCollection {
        &self.meals
    }

    pub fn rule_collection(&self) -> &RuleCollection {
        &self.rule_collection
    }

    pub fn original_meal_diary(&self) -> &MealDiary {
        &self.original_meal_diary
    }

    /// Recommend meals for `dates` under `rule_collection`.
    ///
    /// `recommended_diary` is a proposal already made in this session; it is
    /// treated as fixed context alongside the original diary. Returns every
    /// entry not in the original diary, i.e. the proposal plus the new dates.
    pub fn recommend(
        &mut self,
        dates: &[NaiveDate],
        rule_collection: &RuleCollection,
        recommended_diary: Option<&MealDiary>,
    ) -> Result<MealDiary> {
        let mut dates = dates.to_vec();
        dates.sort();

        if dates.windows(2).any(|w| w[0] == w[1]) {
            bail!("passed dates contain duplicates");
        }

        let mut meal_diary = match recommended_diary {
            Some(recommended) => self.original_meal_diary.upsert(recommended),
            None => self.original_meal_diary.clone(),
        };

        let existing: Vec<String> = dates
            .iter()
            .filter(|d| meal_diary.contains(d))
            .map(format_date)
            .collect();

        if !existing.is_empty() {
            bail!("dates already in the meal diary: {}", existing.join(", "));
        }

        for (idx, date) in dates.iter().enumerate() {
            let meal_choices = rule_collection.apply(&self.meals, *date, &meal_diary)?;

            if meal_choices.is_empty() {
                tracing::warn!(date = %format_date(date), "ran out of meals");
                return Err(Error::OutOfMeals(*date));
            }

            let meal = match dates.get(idx + 1) {
                Some(next_date) => {
                    self.choose_leaving_most_choice(&meal_choices, *date, *next_date, rule_collection, &meal_diary)?
                }
                None => self.choose(meal_choices.as_slice(), *date)?,
            };

            tracing::debug!(
                date = %format_date(date),
                choices = meal_choices.len(),
                meal = meal.name(),
                "assigned meal"
            );

            meal_diary = meal_diary.with_entry(*date, meal);
        }

        Ok(meal_diary.difference(&self.original_meal_diary))
    }

    /// Keep recommending until the reviewer confirms or cancels.
    ///
    /// Rejected `(date, meal)` pairs become [`NotSpecifiedMealOnSpecifiedDate`]
    /// rules for the rest of the session; only rejected dates are recomputed.
    /// Returns `None` on cancel, otherwise the confirmed additions to the diary.
    pub fn recommend_until_confirmed(
        &mut self,
        dates: &[NaiveDate],
        reviewer: &mut impl Reviewer,
    ) -> Result<Option<MealDiary>> {
        let mut rule_collection = self.rule_collection.clone();
        let mut recommended_diary: Option<MealDiary> = None;

        loop {
            let pending: Vec<NaiveDate> = match recommended_diary.as_ref() {
                Some(recommended) => dates
                    .iter()
                    .filter(|d| !recommended.contains(d))
                    .copied()
                    .collect(),
                None => dates.to_vec(),
            };

            let recommended =
                self.recommend(&pending, &rule_collection, recommended_diary.as_ref())?;

            match reviewer.review(&recommended)? {
                Review::Cancel => return Ok(None),
                Review::Confirm => {
                    tracing::info!(count = recommended.len(), "recommendation confirmed");
                    return Ok(Some(recommended.difference(&self.original_meal_diary)));
                }
                Review::Reject => {}
            }

            let Some(dates_to_change) = reviewer.dates_to_change(&recommended)? else {
                return Ok(None);
            };

            let (rules, remaining) = reject(&rule_collection, &recommended, &dates_to_change)?;
            rule_collection = rules;
            recommended_diary = Some(remaining);
        }
    }

    fn choose(&mut self, meals: &[Meal], date: NaiveDate) -> Result<Meal> {
        meals
            .choose(&mut self.rng)
            .cloned()
            .ok_or(Error::OutOfMeals(date))
    }

    /// Score each candidate by the size of the next date's feasible set if
    /// it were assigned, then pick at random among the best.
    fn choose_leaving_most_choice(
        &mut self,
        meal_choices: &MealCollection,
        date: NaiveDate,
        next_date: NaiveDate,
        rule_collection: &RuleCollection,
        meal_diary: &MealDiary,
    ) -> Result<Meal> {
        let mut scores = Vec::with_capacity(meal_choices.len());
        for meal in meal_choices.iter() {
            let proposed_diary = meal_diary.with_entry(date, meal.clone());
            let next_choices = rule_collection.apply(&self.meals, next_date, &proposed_diary)?;
            scores.push(next_choices.len());
        }

        let largest_number_of_choices = scores.iter().copied().max().unwrap_or_default();
        let meals_leaving_most_choice: Vec<Meal> = meal_choices
            .iter()
            .zip(scores.iter())
            .filter(|(_, score)| **score == largest_number_of_choices)
            .map(|(meal, _)| meal.clone())
            .collect();

        self.choose(&meals_leaving_most_choice, date)
    }
}

/// Turn a rejection into rules and drop the rejected dates from the proposal.
fn reject(
    rule_collection: &RuleCollection,
    proposal: &MealDiary,
    dates_to_change: &[NaiveDate],
) -> Result<(RuleCollection, MealDiary)> {
    let mut rule_collection = rule_collection.clone();

    for date in dates_to_change.iter() {
        let Some(meal) = proposal.get(date) else {
            bail!("{} is not part of the recommendation", format_date(date));
        };

        tracing::info!(date = %format_date(date), meal = meal.name(), "recommendation rejected");

        rule_collection =
            rule_collection.append(NotSpecifiedMealOnSpecifiedDate::new(*date, meal.clone()));
    }

    Ok((rule_collection, proposal.except_dates(dates_to_change)))
}
