//! Command implementations behind the clap dispatch in `main.rs`.

use crate::error::BudgetResult;
use crate::excel::TemplateBuilder;
use crate::rates::RateRegistry;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the generate command
pub fn generate(output: PathBuf, rates_file: Option<PathBuf>, verbose: bool) -> BudgetResult<()> {
    println!(
        "{}",
        "🧭 Fieldbudget - Generating cost template".bold().green()
    );
    println!("   Output: {}", output.display());
    println!();

    let mut registry = RateRegistry::with_defaults();
    if let Some(path) = rates_file {
        let count = registry.apply_overrides_file(&path)?;
        println!(
            "   Overrides: {} rate(s) from {}",
            count.to_string().bright_yellow(),
            path.display()
        );
    }

    if verbose {
        println!("{}", "📐 Building worksheets...".cyan());
        for param in registry.entries() {
            println!("   {} = {}", param.name, param.value);
        }
    }

    let builder = TemplateBuilder::new(registry);
    builder.save(&output)?;

    println!("{}", "✅ Template written!".bold().green());
    println!("   Fill in 'Inputs & Rates' first; every other sheet references it.");
    Ok(())
}

/// Execute the rates command: list the rate parameters an override file may set
pub fn rates(yaml: bool) -> BudgetResult<()> {
    let registry = RateRegistry::with_defaults();

    if yaml {
        // Ready-to-edit override file on stdout
        print!("{}", registry.overrides_template()?);
        return Ok(());
    }

    println!("{}", "🧭 Fieldbudget - Rate parameters".bold().green());
    println!();

    for param in registry.entries() {
        println!(
            "   {:<20} {:>10}  {}",
            param.name.bold(),
            param.value,
            param.label.as_str().dimmed()
        );
    }

    println!();
    println!("   Override with a YAML file: {}", "NAME: value".cyan());
    println!("   e.g.  fieldbudget generate --rates overrides.yaml");
    Ok(())
}
