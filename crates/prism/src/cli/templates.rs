//! The `prism templates` command.

use anyhow::Result;
use console::style;

use crate::cli;

/// Execute the templates command: list every template, built-in and user.
pub async fn execute() -> Result<()> {
    let registry = cli::load_registry();
    let mut templates = registry.list_all();
    templates.sort_by(|a, b| a.name.cmp(&b.name));

    println!(
        "{}",
        style(format!("{:<12}  {:<56}  {}", "NAME", "DESCRIPTION", "ALIASES")).bold()
    );
    for template in templates {
        println!(
            "{:<12}  {:<56}  {}",
            template.name,
            template.description,
            style(template.aliases.join(", ")).dim()
        );
    }

    eprintln!();
    eprintln!(
        "Use a name or alias as the prompt: prism edit remove-bg -i photo.jpg -o cut.png"
    );
    Ok(())
}
