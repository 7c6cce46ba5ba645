mod builtin;
mod kind;

pub use builtin::*;
pub use kind::*;

use chrono::NaiveDate;
use mealprep_recipe::MealCollection;
use mealprep_shared::{Error, Result, format_date};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::MealDiary;

/// A single constraint on which meals may be assigned to a date.
pub trait Rule: fmt::Debug + Send + Sync {
    /// Return the subset of `meals` that does not break the rule if assigned
    /// to `date`, with `diary` as the already fixed context.
    ///
    /// `diary` may hold entries before and after `date`; rules look both ways.
    /// `date` is never a key of `diary`.
    fn filter(&self, meals: &MealCollection, date: NaiveDate, diary: &MealDiary) -> MealCollection;
}

/// Ordered, immutable composition of rules.
#[derive(Clone, Debug, Default)]
pub struct RuleCollection {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleCollection {
    pub fn new(rules: impl IntoIterator<Item = Arc<dyn Rule>>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    pub fn from_kinds(kinds: impl IntoIterator<Item = RuleKind>) -> Self {
        Self::new(kinds.into_iter().map(RuleKind::into_rule))
    }

    /// Materialize a configured list of rule names
    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Result<Self> {
        let kinds = names
            .into_iter()
            .map(|name| RuleKind::from_name(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_kinds(kinds))
    }

    /// New collection with `rule` added last. `self` is left as is.
    pub fn append(&self, rule: impl Rule + 'static) -> RuleCollection {
        let mut rules = self.rules.clone();
        rules.push(Arc::new(rule));
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.rules.iter()
    }

    /// Fold every rule over `meals`, each narrowing the previous output.
    ///
    /// Fails with [`Error::RuleContract`] when `date` is already in `diary`
    /// or a rule returns a meal it was not given.
    pub fn apply(
        &self,
        meals: &MealCollection,
        date: NaiveDate,
        diary: &MealDiary,
    ) -> Result<MealCollection> {
        if diary.contains(&date) {
            return Err(Error::RuleContract(format!(
                "rules were asked about {}, which is already in the meal diary",
                format_date(&date)
            )));
        }

        let mut feasible = meals.clone();
        for rule in self.rules.iter() {
            let narrowed = rule.filter(&feasible, date, diary);
            ensure_subset(rule.as_ref(), &feasible, &narrowed)?;
            feasible = narrowed;
        }

        Ok(feasible)
    }
}

fn ensure_subset(rule: &dyn Rule, input: &MealCollection, output: &MealCollection) -> Result<()> {
    let mut available: HashMap<&str, usize> = HashMap::new();
    for meal in input.iter() {
        *available.entry(meal.name()).or_insert(0) += 1;
    }

    for meal in output.iter() {
        match available.get_mut(meal.name()) {
            Some(count) if *count > 0 => *count -= 1,
            _ => {
                return Err(Error::RuleContract(format!(
                    "{rule:?} returned {meal:?}, which was not among its input"
                )));
            }
        }
    }

    Ok(())
}
