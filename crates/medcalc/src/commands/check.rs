//! `medcalc check` -- report drift between the catalog and the formulas.

use anyhow::{Result, bail};

use crate::context::RuntimeContext;
use crate::output::{ICON_PASS, ICON_WARN, output_json, render_pass, render_warn};

/// Execute the `medcalc check` command.
///
/// Prints the integrity report and fails when it has any finding.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let engine = ctx.engine()?;
    let report = engine.integrity();

    if ctx.json {
        output_json(report);
    } else if report.is_clean() {
        if !ctx.quiet {
            println!(
                "{} {} calculations, {} formulas, no findings",
                render_pass(ICON_PASS),
                engine.catalog().len(),
                engine.registry().len()
            );
        }
    } else {
        for line in report.findings() {
            println!("{} {}", render_warn(ICON_WARN), line);
        }
    }

    if !report.is_clean() {
        bail!(
            "catalog integrity check failed ({} finding(s))",
            report.findings().len()
        );
    }
    Ok(())
}
