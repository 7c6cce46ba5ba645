use std::io::Write;

use crate::config::Config;

pub fn list(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    let catalog = super::load_catalog(config)?;

    for meal in catalog.meals().iter() {
        let tags: Vec<String> = meal.tags().map(|t| t.to_string()).collect();
        match tags.is_empty() {
            true => writeln!(out, "{} ({})", meal.name(), meal.meat())?,
            false => writeln!(out, "{} ({}; {})", meal.name(), meal.meat(), tags.join(", "))?,
        }
    }

    Ok(())
}
