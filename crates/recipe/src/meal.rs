use mealprep_shared::{Result, invalid_meal};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;
use strum::VariantArray;

use crate::{MealMeat, MealProperty, MealTag, Unit};

#[derive(Clone, Debug, PartialEq)]
pub struct IngredientQuantity {
    ingredient: String,
    unit: Unit,
    quantity: f64,
}

impl IngredientQuantity {
    pub fn new(ingredient: impl Into<String>, unit: Unit, quantity: f64) -> Result<Self> {
        let ingredient = ingredient.into();

        if ingredient.trim().is_empty() {
            invalid_meal!("ingredient name must not be empty");
        }

        if !quantity.is_finite() || quantity <= 0.0 {
            invalid_meal!("quantity of {ingredient} must be positive, got {quantity}");
        }

        // Bool means "some of", the only meaningful amount is one
        if unit == Unit::Bool && quantity != 1.0 {
            invalid_meal!("{ingredient} is measured as present/absent and cannot have a quantity");
        }

        Ok(Self {
            ingredient,
            unit,
            quantity,
        })
    }

    pub fn ingredient(&self) -> &str {
        &self.ingredient
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }
}

/// Values of every [`MealProperty`] for one meal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MealProperties {
    pub meat: MealMeat,
}

impl MealProperties {
    pub fn new(meat: MealMeat) -> Self {
        Self { meat }
    }

    /// Build from `(kind, value)` pairs as they appear in a recipe file.
    ///
    /// Every property kind must be given exactly once and every value must
    /// belong to the value set of its kind.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut meat = None;

        for (key, value) in entries {
            let (key, value) = (key.as_ref().trim(), value.as_ref().trim());
            let Ok(property) = MealProperty::from_str(key) else {
                invalid_meal!("unknown property \"{key}\"");
            };

            match property {
                MealProperty::Meat => {
                    if meat.is_some() {
                        invalid_meal!("property {property} specified more than once");
                    }

                    let Ok(value) = MealMeat::from_str(value) else {
                        invalid_meal!(
                            "\"{value}\" is not a supported {property} value, expected one of {:?}",
                            property.supported_values()
                        );
                    };

                    meat = Some(value);
                }
            }
        }

        let Some(meat) = meat else {
            invalid_meal!("unspecified properties: {:?}", MealProperty::VARIANTS);
        };

        Ok(Self { meat })
    }

    pub fn value(&self, property: MealProperty) -> String {
        match property {
            MealProperty::Meat => self.meat.to_string(),
        }
    }
}

#[derive(Debug)]
struct MealData {
    name: String,
    ingredient_quantities: Vec<IngredientQuantity>,
    properties: MealProperties,
    tags: BTreeSet<MealTag>,
}

/// An immutable, cheaply cloned meal. Two meals are equal when their names are.
#[derive(Clone)]
pub struct Meal {
    inner: Arc<MealData>,
}

impl Meal {
    pub fn new(
        name: impl Into<String>,
        ingredient_quantities: Vec<IngredientQuantity>,
        properties: MealProperties,
        tags: impl IntoIterator<Item = MealTag>,
    ) -> Result<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            invalid_meal!("meal name must not be empty");
        }

        let mut seen = HashSet::new();
        for quantity in ingredient_quantities.iter() {
            if !seen.insert(quantity.ingredient().to_lowercase()) {
                invalid_meal!(
                    "{name} lists the ingredient \"{}\" more than once",
                    quantity.ingredient()
                );
            }
        }

        Ok(Self {
            inner: Arc::new(MealData {
                name,
                ingredient_quantities,
                properties,
                tags: tags.into_iter().collect(),
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn ingredient_quantities(&self) -> &[IngredientQuantity] {
        &self.inner.ingredient_quantities
    }

    pub fn properties(&self) -> &MealProperties {
        &self.inner.properties
    }

    pub fn meat(&self) -> MealMeat {
        self.inner.properties.meat
    }

    /// Absent tags are `false`
    pub fn has_tag(&self, tag: MealTag) -> bool {
        self.inner.tags.contains(&tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = MealTag> + '_ {
        self.inner.tags.iter().copied()
    }
}

impl PartialEq for Meal {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Meal {}

impl Hash for Meal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Debug for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Meal({:?})", self.name())
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
