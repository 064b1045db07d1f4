//! `medcalc categories` -- list calculation categories.

use anyhow::Result;
use serde::Serialize;

use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

#[derive(Serialize)]
struct CategoryView<'a> {
    slug: &'a str,
    name: &'a str,
    description: &'a str,
    calculations: usize,
}

/// Execute the `medcalc categories` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let engine = ctx.engine()?;
    let views: Vec<CategoryView<'_>> = engine
        .catalog()
        .categories
        .iter()
        .map(|c| CategoryView {
            slug: &c.slug,
            name: &c.name,
            description: &c.description,
            calculations: c.calculations.len(),
        })
        .collect();

    if ctx.json {
        output_json(&views);
        return Ok(());
    }

    if views.is_empty() {
        if !ctx.quiet {
            println!("No categories in catalog.");
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = views
        .iter()
        .map(|v| {
            vec![
                v.slug.to_string(),
                v.name.to_string(),
                v.calculations.to_string(),
            ]
        })
        .collect();
    output_table(&["SLUG", "NAME", "CALCULATIONS"], &rows);
    Ok(())
}
