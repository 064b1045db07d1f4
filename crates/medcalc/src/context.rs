//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds everything a command handler needs: the
//! discovered `.medcalc/` directory, the loaded configuration, the resolved
//! global flags, and the catalog source to serve.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use medcalc_config::{MedcalcConfig, find_medcalc_dir, load_config};
use medcalc_core::load_catalog;
use medcalc_formula::Engine;
use tracing::debug;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Discovered `.medcalc/` directory, if any.
    pub medcalc_dir: Option<PathBuf>,

    /// Effective configuration (defaults, file, environment).
    pub config: MedcalcConfig,

    /// `--catalog` from the command line.
    pub catalog_override: Option<PathBuf>,

    /// Whether to produce JSON output (`--json` or `json: true` in config).
    pub json: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// The `.medcalc/` directory is discovered from the working directory
    /// (or `MEDCALC_DIR`), and its configuration is loaded.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine working directory")?;
        let medcalc_dir = find_medcalc_dir(&cwd);
        let config = load_config(medcalc_dir.as_deref()).context("failed to load configuration")?;
        debug!(dir = ?medcalc_dir, "configuration loaded");

        Ok(Self {
            medcalc_dir,
            json: global.json || config.json,
            config,
            catalog_override: global.catalog.clone(),
            quiet: global.quiet,
        })
    }

    /// The catalog document to serve: `--catalog`, then the configured path,
    /// then `None` for the built-in catalog.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_override
            .clone()
            .or_else(|| self.config.catalog_path(self.medcalc_dir.as_deref()))
    }

    /// Load the catalog and build the engine.
    ///
    /// Integrity findings are logged; with `integrity.deny_collisions` set,
    /// a registry collision is an error.
    pub fn engine(&self) -> Result<Engine> {
        let engine = match self.catalog_path() {
            Some(path) => {
                let catalog = load_catalog(&path)
                    .with_context(|| format!("failed to load catalog {}", path.display()))?;
                Engine::with_catalog(catalog)
            }
            None => Engine::builtin().context("built-in catalog is invalid")?,
        };

        let collisions = &engine.integrity().collisions;
        if self.config.integrity.deny_collisions && !collisions.is_empty() {
            let names: Vec<&str> = collisions.iter().map(|c| c.name.as_str()).collect();
            bail!(
                "calculation names registered more than once: {}\nHint: set integrity.deny_collisions to false to serve anyway",
                names.join(", ")
            );
        }

        Ok(engine)
    }
}
