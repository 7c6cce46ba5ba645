use mealprep_shared::{Error, Result};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use crate::{IngredientQuantity, Meal, MealProperties, MealTag, Unit};

pub const RECIPE_EXTENSION: &str = "yaml";

/// Top level of a recipe file: either a mapping of sections or a list of
/// single-section mappings (`- ingredients: ...`, `- properties: ...`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeDocument {
    Sections(Mapping),
    Entries(Vec<Mapping>),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RecipeFile {
    ingredients: Vec<IngredientEntry>,
    properties: PropertySection,
    #[serde(default)]
    tags: Vec<String>,
}

/// `- Bay Leaves` is an ingredient that is simply present; `- Carrot: 2`
/// carries an amount.
#[derive(Deserialize)]
#[serde(untagged)]
enum IngredientEntry {
    Present(String),
    Measured(Mapping),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PropertySection {
    Map(BTreeMap<String, String>),
    List(Vec<BTreeMap<String, String>>),
}

impl PropertySection {
    fn into_entries(self) -> Vec<(String, String)> {
        match self {
            PropertySection::Map(map) => map.into_iter().collect(),
            PropertySection::List(list) => list.into_iter().flatten().collect(),
        }
    }
}

/// Read `<dir>/<Meal Name>.yaml`. The meal takes its name from the file stem.
pub fn read_recipe(path: &Path) -> Result<Meal> {
    let stem = path.file_stem().unwrap_or_default();
    let Some(name) = stem.to_str() else {
        return Err(Error::Recipe {
            name: stem.to_string_lossy().into_owned(),
            reason: "the file name is not valid UTF-8".to_owned(),
        });
    };

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Recipe {
        name: name.to_owned(),
        reason: e.to_string(),
    })?;

    parse_recipe(name, &contents)
}

/// Parse the YAML body of a recipe. Every failure names the meal.
pub fn parse_recipe(name: &str, contents: &str) -> Result<Meal> {
    parse_recipe_inner(name, contents).map_err(|e| match e {
        Error::Recipe { .. } => e,
        Error::InvalidMeal(reason) | Error::Usage(reason) => Error::Recipe {
            name: name.to_owned(),
            reason,
        },
        other => Error::Recipe {
            name: name.to_owned(),
            reason: other.to_string(),
        },
    })
}

fn parse_recipe_inner(name: &str, contents: &str) -> Result<Meal> {
    let document: RecipeDocument = serde_yaml::from_str(contents).map_err(|_| {
        Error::InvalidMeal(
            "expected a mapping of sections or a list of single-section entries".to_owned(),
        )
    })?;

    let recipe: RecipeFile = serde_yaml::from_value(Value::Mapping(merge_sections(document)?))
        .map_err(|e| Error::InvalidMeal(e.to_string()))?;

    let mut ingredient_quantities = Vec::with_capacity(recipe.ingredients.len());
    for entry in recipe.ingredients.iter() {
        ingredient_quantities.push(parse_ingredient_entry(entry)?);
    }

    let properties = MealProperties::from_entries(recipe.properties.into_entries())?;

    let mut tags = Vec::with_capacity(recipe.tags.len());
    for tag in recipe.tags.iter() {
        let Ok(tag) = MealTag::from_str(tag.trim()) else {
            mealprep_shared::invalid_meal!("unknown tag \"{tag}\"");
        };
        tags.push(tag);
    }

    Meal::new(name, ingredient_quantities, properties, tags)
}

/// Flatten either top-level shape into one mapping with trimmed, lowercase
/// section names.
fn merge_sections(document: RecipeDocument) -> Result<Mapping> {
    let sections: Vec<Mapping> = match document {
        RecipeDocument::Sections(mapping) => vec![mapping],
        RecipeDocument::Entries(entries) => entries,
    };

    let mut merged = Mapping::new();
    for (key, value) in sections.into_iter().flatten() {
        let Some(section) = key.as_str() else {
            mealprep_shared::invalid_meal!("section names must be strings, got {key:?}");
        };

        let section = section.trim().to_lowercase();
        if merged.insert(Value::String(section.clone()), value).is_some() {
            mealprep_shared::invalid_meal!("the section \"{section}\" appears more than once");
        }
    }

    Ok(merged)
}

fn parse_ingredient_entry(entry: &IngredientEntry) -> Result<IngredientQuantity> {
    let mapping = match entry {
        IngredientEntry::Present(ingredient) => {
            return IngredientQuantity::new(ingredient.trim(), Unit::Bool, 1.0);
        }
        IngredientEntry::Measured(mapping) => mapping,
    };

    let mut iter = mapping.iter();
    let (Some((key, value)), None) = (iter.next(), iter.next()) else {
        mealprep_shared::invalid_meal!(
            "each ingredient entry must map exactly one ingredient to its amount"
        );
    };

    let Some(ingredient) = key.as_str().map(str::trim) else {
        mealprep_shared::invalid_meal!("ingredient names must be strings, got {key:?}");
    };

    let (unit, quantity) = parse_amount(value)
        .map_err(|reason| Error::InvalidMeal(format!("{ingredient}: {reason}")))?;

    IngredientQuantity::new(ingredient, unit, quantity)
}

/// `7` => (Number, 7), `true` => (Bool, 1), `"100g"` => (Gram, 100), `"2 jars"` => (Jar, 2)
fn parse_amount(value: &Value) -> std::result::Result<(Unit, f64), String> {
    match value {
        Value::Bool(true) => Ok((Unit::Bool, 1.0)),
        Value::Number(n) => n
            .as_f64()
            .map(|q| (Unit::Number, q))
            .ok_or_else(|| format!("unsupported number {n}")),
        Value::String(description) => parse_amount_description(description),
        other => Err(format!("unsupported amount {other:?}")),
    }
}

fn parse_amount_description(description: &str) -> std::result::Result<(Unit, f64), String> {
    let description = description.trim();
    let split = description
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(description.len());
    let (number, unit) = description.split_at(split);

    let quantity = number
        .parse::<f64>()
        .map_err(|_| format!("could not read a quantity from \"{description}\""))?;

    let unit = unit.trim();
    if unit.is_empty() {
        return Ok((Unit::Number, quantity));
    }

    Unit::from_identifier(unit)
        .map(|unit| (unit, quantity))
        .ok_or_else(|| format!("unknown unit \"{unit}\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MealMeat;

    const BOLOGNESE: &str = r#"
ingredients:
  - Beef Mince: 500g
  - Onion: 2
  - Chopped Tomatoes: 2 jars
  - Garlic: true
properties:
  meat: Beef
tags:
  - Pasta
"#;

    #[test]
    fn test_parse_recipe() {
        let meal = parse_recipe("Spaghetti Bolognese", BOLOGNESE).unwrap();

        assert_eq!(meal.name(), "Spaghetti Bolognese");
        assert_eq!(meal.meat(), MealMeat::Beef);
        assert!(meal.has_tag(MealTag::Pasta));
        assert!(!meal.has_tag(MealTag::Roast));

        let quantities = meal.ingredient_quantities();
        assert_eq!(quantities.len(), 4);
        assert_eq!(quantities[0].ingredient(), "Beef Mince");
        assert_eq!(quantities[0].unit(), Unit::Gram);
        assert_eq!(quantities[0].quantity(), 500.0);
        assert_eq!(quantities[1].unit(), Unit::Number);
        assert_eq!(quantities[2].unit(), Unit::Jar);
        assert_eq!(quantities[2].quantity(), 2.0);
        assert_eq!(quantities[3].unit(), Unit::Bool);
    }

    #[test]
    fn test_tags_are_optional() {
        let meal = parse_recipe(
            "Dal",
            "ingredients:\n  - Lentils: 250g\nproperties:\n  meat: None\n",
        )
        .unwrap();

        assert_eq!(meal.meat(), MealMeat::None);
        assert_eq!(meal.tags().count(), 0);
    }

    #[test]
    fn test_parse_recipe_entry_list() {
        let contents = "- ingredients:\n  - Bay Leaves\n  - Carrot: 2\n  - Guinness: 500ml\n- properties:\n  - Meat: Beef\n- tags:\n  - Winter\n";

        let meal = parse_recipe("Beef Stew", contents).unwrap();

        assert_eq!(meal.meat(), MealMeat::Beef);
        assert_eq!(meal.tags().collect::<Vec<_>>(), vec![MealTag::Winter]);

        let quantities = meal.ingredient_quantities();
        assert_eq!(quantities.len(), 3);
        assert_eq!(quantities[0].ingredient(), "Bay Leaves");
        assert_eq!(quantities[0].unit(), Unit::Bool);
        assert_eq!(quantities[0].quantity(), 1.0);
        assert_eq!(quantities[1].unit(), Unit::Number);
        assert_eq!(quantities[2].unit(), Unit::Millilitre);
        assert_eq!(quantities[2].quantity(), 500.0);
    }

    #[test]
    fn test_parse_recipe_mixed_shapes() {
        // mapping top level, bare ingredient, properties as a list, padded names
        let contents = "Ingredients:\n  - Salt\n  - Lentils: 250g\nproperties:\n  - ' meat ': ' none '\ntags:\n  - ' vegetarian'\n";

        let meal = parse_recipe("Dal", contents).unwrap();

        assert_eq!(meal.meat(), MealMeat::None);
        assert!(meal.has_tag(MealTag::Vegetarian));
        assert_eq!(meal.ingredient_quantities()[0].unit(), Unit::Bool);
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let contents = "- ingredients:\n  - Salt\n- properties:\n  - Meat: None\n- ingredients:\n  - Pepper\n";

        assert!(matches!(
            parse_recipe("Seasoning", contents),
            Err(Error::Recipe { name, .. }) if name == "Seasoning"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_name_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"Fish \xff Pie.yaml"));

        assert!(matches!(read_recipe(path), Err(Error::Recipe { .. })));
    }

    #[test]
    fn test_errors_name_the_meal() {
        let cases = [
            "properties:\n  meat: Beef\n",
            "ingredients: []\nproperties: {}\n",
            "ingredients: []\nproperties:\n  meat: Beef\ntags:\n  - Curry\n",
            "ingredients:\n  - Flour: 3 cups\nproperties:\n  meat: None\n",
            "ingredients:\n  - Flour: 3\n  - flour: 1\nproperties:\n  meat: None\n",
            "- not a mapping",
        ];

        for contents in cases {
            let err = parse_recipe("Broken Pie", contents).unwrap_err();
            match err {
                Error::Recipe { name, .. } => assert_eq!(name, "Broken Pie"),
                other => panic!("unexpected error {other:?} for {contents:?}"),
            }
        }
    }

    #[test]
    fn test_parse_amount_description() {
        assert_eq!(parse_amount_description("100g"), Ok((Unit::Gram, 100.0)));
        assert_eq!(parse_amount_description("0.5"), Ok((Unit::Number, 0.5)));
        assert_eq!(parse_amount_description("7 bags"), Ok((Unit::Bag, 7.0)));
        assert!(parse_amount_description("some").is_err());
    }
}
