//! `medcalc version` -- print the version and what is compiled in.

use anyhow::{Context, Result};
use medcalc_core::builtin_catalog;
use medcalc_formula::builtin_registry;
use serde::Serialize;

use crate::context::RuntimeContext;
use crate::output::{output_json, render_muted};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build identifier, overridable at build time with `MEDCALC_BUILD`.
const BUILD: &str = {
    match option_env!("MEDCALC_BUILD") {
        Some(b) => b,
        None => "dev",
    }
};

/// Hex digits of the catalog fingerprint shown in text output.
const SHORT_FINGERPRINT: usize = 12;

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: &'static str,
    build: &'static str,
    formulas: usize,
    builtin_calculations: usize,
    builtin_fingerprint: String,
}

impl VersionInfo {
    fn collect() -> Result<Self> {
        let catalog = builtin_catalog().context("built-in catalog is invalid")?;
        Ok(Self {
            version: VERSION,
            build: BUILD,
            formulas: builtin_registry().len(),
            builtin_calculations: catalog.len(),
            builtin_fingerprint: catalog.fingerprint(),
        })
    }

    fn line(&self) -> String {
        let short: String = self
            .builtin_fingerprint
            .chars()
            .take(SHORT_FINGERPRINT)
            .collect();
        format!(
            "medcalc version {} ({}) {} formulas, built-in catalog {}",
            self.version, self.build, self.formulas, short
        )
    }
}

/// Execute the `medcalc version` command.
///
/// Reports the built-in catalog, not the one `--catalog` or the config
/// would select; `medcalc info` covers that.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let info = VersionInfo::collect()?;
    if ctx.json {
        output_json(&info);
    } else {
        println!("{}", info.line());
        if !ctx.quiet {
            println!(
                "{}",
                render_muted(&format!(
                    "{} calculations in the built-in catalog",
                    info.builtin_calculations
                ))
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_builtin_formulas_and_fingerprint() {
        let info = VersionInfo::collect().unwrap();
        assert_eq!(info.version, VERSION);
        assert!(info.formulas > 0);
        assert_eq!(info.builtin_calculations, 121);
        assert_eq!(info.builtin_fingerprint.len(), 64);

        let line = info.line();
        assert!(line.starts_with("medcalc version "));
        assert!(line.ends_with(&info.builtin_fingerprint[..SHORT_FINGERPRINT]));
    }
}
