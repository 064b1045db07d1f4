//! `medcalc list` -- list calculations.

use anyhow::{Result, bail};
use serde::Serialize;

use crate::cli::ListArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

#[derive(Serialize)]
struct CalculationRow<'a> {
    category_slug: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result_unit: Option<&'a str>,
    parameters: Vec<&'a str>,
    implemented: bool,
}

/// Execute the `medcalc list` command.
pub fn run(ctx: &RuntimeContext, args: &ListArgs) -> Result<()> {
    let engine = ctx.engine()?;
    let catalog = engine.catalog();

    if let Some(slug) = &args.slug {
        if catalog.category(slug).is_none() {
            bail!(
                "category not found: {}\nHint: run 'medcalc categories' to see available slugs",
                slug
            );
        }
    }

    let rows: Vec<CalculationRow<'_>> = catalog
        .calculations()
        .filter(|(cat, _)| args.slug.as_deref().is_none_or(|s| s == cat.slug))
        .map(|(cat, calc)| CalculationRow {
            category_slug: &cat.slug,
            name: &calc.name,
            result_unit: calc.result_unit.as_deref(),
            parameters: calc.parameter_names(),
            implemented: engine.registry().contains(&calc.name),
        })
        .collect();

    if ctx.json {
        output_json(&rows);
        return Ok(());
    }

    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let mut name = r.name.to_string();
            if !r.implemented {
                name.push_str(" (not implemented)");
            }
            vec![
                r.category_slug.to_string(),
                name,
                r.result_unit.unwrap_or("-").to_string(),
                r.parameters.join(", "),
            ]
        })
        .collect();
    output_table(&["CATEGORY", "NAME", "UNIT", "PARAMETERS"], &table);

    if !ctx.quiet {
        println!("\n{} calculation(s)", rows.len());
    }
    Ok(())
}
