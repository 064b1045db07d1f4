//! `medcalc search` -- substring search across calculations.

use anyhow::Result;

use medcalc_core::search::search;

use crate::cli::SearchArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

/// Execute the `medcalc search` command.
pub fn run(ctx: &RuntimeContext, args: &SearchArgs) -> Result<()> {
    let engine = ctx.engine()?;
    let hits = search(engine.catalog(), &args.query);

    if ctx.json {
        output_json(&hits);
        return Ok(());
    }

    if hits.is_empty() {
        if !ctx.quiet {
            println!("No calculations matching '{}'.", args.query);
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = hits
        .iter()
        .map(|h| vec![h.category_slug.clone(), h.name.clone()])
        .collect();
    output_table(&["CATEGORY", "NAME"], &rows);

    if !ctx.quiet {
        println!("\n{} match(es)", hits.len());
    }
    Ok(())
}
