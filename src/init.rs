use colored::*;
use std::{fs, path::Path};

pub const TEMPLATE: &str = r#"# natref Configuration File

# Signature language for the detail view: c, lua, js or cs
language = "lua"

# Page address permalinks are built on
permalink_base = "https://docs.fivem.net/natives/"

# Delay before typed filter text is applied, in milliseconds
debounce_ms = 200

# Maximum rows printed by list views
list_limit = 50

# Syntax highlighting theme
theme = "base16-ocean.dark"

# Datasets are loaded in parallel. For each one the local copy is tried
# first and the remote URL second. `natref fetch` refreshes the local copies.
[[datasets]]
name = "natives"
local = "data/natives.json"
remote = "https://runtime.fivem.net/doc/natives.json"

[[datasets]]
name = "cfx"
local = "data/natives_cfx.json"
remote = "https://runtime.fivem.net/doc/natives_cfx.json"
"#;

pub fn init_config(path: &Path, force: bool) -> Result<(), String> {
    if path.exists() && !force {
        return Err(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        ));
    }

    fs::write(path, TEMPLATE)
        .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;

    println!("{} Created {}", "✅".green(), path.display());
    println!("\n{}", "Configuration file created with defaults:".cyan());
    println!("  {} language = \"lua\"", "•".blue());
    println!("  {} datasets = natives, cfx (local first, remote fallback)", "•".blue());
    println!(
        "\n{}",
        format!("Edit {} to customize the viewer.", path.display()).cyan()
    );

    Ok(())
}
