use std::collections::HashMap;
use std::ops::{Add, Index};

use crate::Meal;

/// Ordered, immutable sequence of meals.
///
/// Filtering always produces a new collection so the input can be handed to
/// several consumers. Equality ignores order and compares as a multiset.
#[derive(Clone, Debug, Default)]
pub struct MealCollection {
    meals: Vec<Meal>,
}

impl MealCollection {
    pub fn new(meals: impl IntoIterator<Item = Meal>) -> Self {
        Self {
            meals: meals.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Meal> {
        self.meals.get(index)
    }

    pub fn contains(&self, meal: &Meal) -> bool {
        self.meals.contains(meal)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Meal> {
        self.meals.iter()
    }

    pub fn as_slice(&self) -> &[Meal] {
        &self.meals
    }

    pub fn filter(&self, mut predicate: impl FnMut(&Meal) -> bool) -> MealCollection {
        Self {
            meals: self.meals.iter().filter(|m| predicate(m)).cloned().collect(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.meals.iter().map(|m| m.name()).collect()
    }

    fn counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for meal in self.meals.iter() {
            *counts.entry(meal.name()).or_insert(0) += 1;
        }
        counts
    }
}

impl PartialEq for MealCollection {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.counts() == other.counts()
    }
}

impl Eq for MealCollection {}

impl Index<usize> for MealCollection {
    type Output = Meal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.meals[index]
    }
}

impl Add for MealCollection {
    type Output = MealCollection;

    fn add(mut self, rhs: MealCollection) -> Self::Output {
        self.meals.extend(rhs.meals);
        self
    }
}

impl Add<Meal> for MealCollection {
    type Output = MealCollection;

    fn add(mut self, rhs: Meal) -> Self::Output {
        self.meals.push(rhs);
        self
    }
}

impl FromIterator<Meal> for MealCollection {
    fn from_iter<T: IntoIterator<Item = Meal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a MealCollection {
    type Item = &'a Meal;
    type IntoIter = std::slice::Iter<'a, Meal>;

    fn into_iter(self) -> Self::IntoIter {
        self.meals.iter()
    }
}

impl IntoIterator for MealCollection {
    type Item = Meal;
    type IntoIter = std::vec::IntoIter<Meal>;

    fn into_iter(self) -> Self::IntoIter {
        self.meals.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MealMeat, MealProperties, MealTag};

    fn meal(name: &str) -> Meal {
        Meal::new(name, vec![], MealProperties::new(MealMeat::None), [MealTag::Vegetarian]).unwrap()
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = MealCollection::new([meal("A"), meal("B"), meal("B")]);
        let b = MealCollection::new([meal("B"), meal("A"), meal("B")]);
        let c = MealCollection::new([meal("A"), meal("A"), meal("B")]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, MealCollection::new([meal("A"), meal("B")]));
    }

    #[test]
    fn test_filter_leaves_input_untouched() {
        let meals = MealCollection::new([meal("A"), meal("B"), meal("C")]);
        let filtered = meals.filter(|m| m.name() != "B");

        assert_eq!(filtered.names(), vec!["A", "C"]);
        assert_eq!(meals.len(), 3);
        assert!(meals.contains(&meal("B")));
        assert!(!filtered.contains(&meal("B")));
    }

    #[test]
    fn test_concatenation_and_indexing() {
        let meals = MealCollection::new([meal("A")]) + MealCollection::new([meal("B")]) + meal("C");

        assert_eq!(meals.len(), 3);
        assert_eq!(meals[2].name(), "C");
        assert_eq!(meals.get(1).map(|m| m.name()), Some("B"));
        assert!(meals.get(3).is_none());
        assert!(MealCollection::default().is_empty());
    }
}
