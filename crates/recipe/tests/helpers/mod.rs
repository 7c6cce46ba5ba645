use std::path::Path;

pub fn write_recipe(dir: &Path, name: &str, meat: &str, tags: &[&str]) -> anyhow::Result<()> {
    let mut contents = format!("ingredients:\n  - Onion: 1\nproperties:\n  meat: {meat}\n");
    if !tags.is_empty() {
        contents.push_str("tags:\n");
        for tag in tags {
            contents.push_str(&format!("  - {tag}\n"));
        }
    }

    std::fs::write(dir.join(format!("{name}.yaml")), contents)?;

    Ok(())
}

/// Same recipe in the list-of-sections layout, with bare ingredient names.
pub fn write_recipe_entries(dir: &Path, name: &str, meat: &str, tags: &[&str]) -> anyhow::Result<()> {
    let mut contents = format!("- ingredients:\n  - Bay Leaves\n  - Onion: 1\n- properties:\n  - Meat: {meat}\n");
    if !tags.is_empty() {
        contents.push_str("- tags:\n");
        for tag in tags {
            contents.push_str(&format!("  - {tag}\n"));
        }
    }

    std::fs::write(dir.join(format!("{name}.yaml")), contents)?;

    Ok(())
}
