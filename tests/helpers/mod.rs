//! Shared setup for command tests: a throwaway data directory with a small
//! recipe catalog and a config pointing at it.

#![allow(dead_code)]

use mealprep::config::Config;
use std::path::Path;

const RECIPES: &[(&str, &str, &[&str])] = &[
    ("Roast Beef", "Beef", &["Roast"]),
    ("Roast Chicken", "Chicken", &["Roast"]),
    ("Spaghetti Bolognese", "Beef", &["Pasta"]),
    ("Carbonara", "Pork", &["Pasta"]),
    ("Dal", "None", &["Indian", "Vegetarian"]),
    ("Fish Pie", "Fish", &[]),
    ("Pork Chops", "Pork", &[]),
    ("Turkey Burgers", "Turkey", &[]),
    ("Omelette", "None", &["Vegetarian"]),
    ("Lamb Tagine", "Lamb", &[]),
    ("Chilli", "Beef", &["Winter"]),
    ("Stir Fry", "Chicken", &[]),
];

pub fn setup_config(dir: &Path) -> anyhow::Result<Config> {
    let recipes_dir = dir.join("meals");
    std::fs::create_dir_all(&recipes_dir)?;

    for (name, meat, tags) in RECIPES {
        let mut contents = format!("ingredients:\n  - Onion: 1\n  - Salt: true\nproperties:\n  meat: {meat}\n");
        if !tags.is_empty() {
            contents.push_str("tags:\n");
            for tag in tags.iter() {
                contents.push_str(&format!("  - {tag}\n"));
            }
        }
        std::fs::write(recipes_dir.join(format!("{name}.yaml")), contents)?;
    }

    let mut config = Config::default();
    config.data.recipes_dir = recipes_dir;
    config.data.diary_file = dir.join("meal_diary.json");

    Ok(config)
}

pub fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("utf-8 output")
}
