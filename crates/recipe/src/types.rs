use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[strum(ascii_case_insensitive)]
pub enum MealTag {
    Indian,
    Roast,
    Pasta,
    Vegetarian,
    Winter,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
)]
#[strum(ascii_case_insensitive)]
pub enum MealMeat {
    Beef,
    Chicken,
    Fish,
    Lamb,
    #[default]
    None,
    Pork,
    Turkey,
}

/// Property kinds every meal must define. Each kind owns a closed value set.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[strum(ascii_case_insensitive)]
pub enum MealProperty {
    Meat,
}

impl MealProperty {
    pub fn supported_values(&self) -> Vec<String> {
        match self {
            MealProperty::Meat => MealMeat::VARIANTS.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Bool,
    Bag,
    Jar,
    Gram,
    Millilitre,
    Number,
}

impl Unit {
    fn identifiers(&self) -> &'static [&'static str] {
        match self {
            Unit::Bool => &[],
            Unit::Bag => &["bag", "bags"],
            Unit::Jar => &["jar", "jars"],
            Unit::Gram => &["g", "gram", "grams"],
            Unit::Millilitre => &["ml"],
            Unit::Number => &["unit", "units"],
        }
    }

    /// Resolve a written unit such as `g`, `grams` or `Jars`
    pub fn from_identifier(identifier: &str) -> Option<Unit> {
        let identifier = identifier.trim().to_lowercase();

        Unit::VARIANTS
            .iter()
            .find(|unit| unit.identifiers().contains(&identifier.as_str()))
            .copied()
    }
}
