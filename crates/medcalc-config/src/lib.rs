//! Configuration management for medcalc.
//!
//! This crate discovers `.medcalc/` directories in the filesystem and loads
//! layered configuration (defaults, `.medcalc/config.yaml`, `MEDCALC_*`
//! environment variables) into a typed [`config::MedcalcConfig`].

pub mod config;
pub mod medcalc_dir;

pub use config::{ConfigError, MedcalcConfig, load_config, save_config};
pub use medcalc_dir::{ensure_medcalc_dir, find_medcalc_dir};
