//! `medcalc show` -- display one calculation descriptor.

use anyhow::{Result, bail};
use serde::Serialize;

use medcalc_core::Calculation;

use crate::cli::ShowArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table, render_bold, render_muted, render_warn};

#[derive(Serialize)]
struct ShowView<'a> {
    category_slug: &'a str,
    #[serde(flatten)]
    calculation: &'a Calculation,
    implemented: bool,
}

/// Execute the `medcalc show` command.
pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let engine = ctx.engine()?;
    let Some(category) = engine.catalog().category(&args.slug) else {
        bail!("category not found: {}", args.slug);
    };
    let Some(calc) = category.calculation(&args.name) else {
        bail!(
            "calculation '{}' not found in category '{}'\nHint: run 'medcalc list {}'",
            args.name,
            args.slug,
            args.slug
        );
    };
    let implemented = engine.registry().contains(&calc.name);

    if ctx.json {
        output_json(&ShowView {
            category_slug: &category.slug,
            calculation: calc,
            implemented,
        });
        return Ok(());
    }

    println!("{}", render_bold(&calc.name));
    println!("{}", render_muted(&format!("{} ({})", category.name, category.slug)));
    if !calc.description.is_empty() {
        println!("\n{}", calc.description);
    }
    println!(
        "\nResult unit: {}",
        calc.result_unit.as_deref().unwrap_or("(none)")
    );
    if !implemented {
        println!("{}", render_warn("No implementation is registered for this calculation."));
    }

    if calc.parameters.is_empty() {
        println!("\nNo parameters.");
        return Ok(());
    }

    println!();
    let rows: Vec<Vec<String>> = calc
        .parameters
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.param_type.to_string(),
                p.unit.clone().unwrap_or_default(),
                p.display_name().to_string(),
                p.options.join(" | "),
            ]
        })
        .collect();
    output_table(&["PARAMETER", "TYPE", "UNIT", "LABEL", "OPTIONS"], &rows);
    Ok(())
}
