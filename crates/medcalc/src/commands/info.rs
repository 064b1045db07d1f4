//! `medcalc info` -- show which catalog is being served.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::{output_json, render_accent};

/// Execute the `medcalc info` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let engine = ctx.engine()?;
    let catalog = engine.catalog();
    let integrity = engine.integrity();
    let fingerprint = catalog.fingerprint();

    if ctx.json {
        let info = serde_json::json!({
            "catalog": catalog.source,
            "fingerprint": fingerprint,
            "categories": catalog.categories.len(),
            "calculations": catalog.len(),
            "formulas": engine.registry().len(),
            "collisions": integrity.collisions.len(),
            "unimplemented": integrity.unimplemented.len(),
            "medcalc_dir": ctx.medcalc_dir,
        });
        output_json(&info);
        return Ok(());
    }

    println!("Catalog:       {}", render_accent(&catalog.source));
    println!("Fingerprint:   {}", fingerprint);
    println!("Categories:    {}", catalog.categories.len());
    println!("Calculations:  {}", catalog.len());
    println!("Formulas:      {}", engine.registry().len());
    println!(
        "Integrity:     {}",
        if integrity.is_clean() {
            "clean".to_string()
        } else {
            format!(
                "{} finding(s), run 'medcalc check'",
                integrity.findings().len()
            )
        }
    );
    match &ctx.medcalc_dir {
        Some(dir) => println!("Config dir:    {}", dir.display()),
        None => println!("Config dir:    (none)"),
    }
    Ok(())
}
