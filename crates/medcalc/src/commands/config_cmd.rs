//! `medcalc config` -- inspect or initialize configuration.

use anyhow::{Context, Result, bail};

use medcalc_config::config::CONFIG_FILE;
use medcalc_config::{ConfigError, MedcalcConfig, ensure_medcalc_dir, save_config};

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

const REDACTED: &str = "********";

/// Execute the `medcalc config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            let shown = redacted(&ctx.config);
            if ctx.json {
                output_json(&shown);
            } else {
                let yaml = serde_yaml::to_string(&shown).context("failed to render config")?;
                print!("{}", yaml);
            }
        }

        ConfigCommands::Init(init) => {
            let cwd = std::env::current_dir().context("cannot determine working directory")?;
            let dir = ensure_medcalc_dir(&cwd)
                .with_context(|| format!("failed to create .medcalc in {}", cwd.display()))?;
            let path = dir.join(CONFIG_FILE);
            if path.exists() && !init.force {
                bail!(
                    "{} already exists\nHint: pass --force to overwrite it",
                    path.display()
                );
            }
            save_config(&dir, &MedcalcConfig::default())
                .with_context(|| format!("failed to write {}", path.display()))?;

            if ctx.json {
                output_json(&serde_json::json!({ "path": path }));
            } else if !ctx.quiet {
                println!("Wrote {}", path.display());
            }
        }

        ConfigCommands::Path => {
            let dir = ctx
                .medcalc_dir
                .as_ref()
                .ok_or(ConfigError::MedcalcDirNotFound)?;
            if ctx.json {
                output_json(&serde_json::json!({ "path": dir }));
            } else {
                println!("{}", dir.display());
            }
        }
    }

    Ok(())
}

/// A copy of `config` safe to print.
fn redacted(config: &MedcalcConfig) -> MedcalcConfig {
    let mut shown = config.clone();
    if shown.explain.api_key.is_some() {
        shown.explain.api_key = Some(REDACTED.to_string());
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_is_never_printed() {
        let mut cfg = MedcalcConfig::default();
        cfg.explain.api_key = Some("secret-key".into());
        let shown = redacted(&cfg);
        assert_eq!(shown.explain.api_key.as_deref(), Some(REDACTED));
        assert_eq!(shown.explain.model, cfg.explain.model);

        assert!(redacted(&MedcalcConfig::default()).explain.api_key.is_none());
    }
}
