//! Clap CLI definitions for the `medcalc` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// medcalc -- clinical formula calculator.
#[derive(Parser, Debug)]
#[command(
    name = "medcalc",
    about = "Clinical formula calculator",
    long_about = "Look up and compute clinical formulas (dosages, scores, lab-derived values) from a declarative catalog.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Catalog document to serve instead of the configured or built-in one.
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List calculation categories.
    Categories,

    /// List calculations, optionally within one category.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a calculation's parameters and result unit.
    Show(ShowArgs),

    /// Search calculations by name or description.
    Search(SearchArgs),

    /// Run a calculation.
    #[command(alias = "run")]
    Calc(CalcArgs),

    /// Check the catalog against the built-in formulas.
    Check,

    /// Show which catalog is being served.
    Info,

    /// Inspect or initialize configuration.
    Config(ConfigArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

// ---------------------------------------------------------------------------
// Catalog browsing
// ---------------------------------------------------------------------------

/// Arguments for `medcalc list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Category slug (default: all categories).
    pub slug: Option<String>,
}

/// Arguments for `medcalc show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Category slug.
    pub slug: String,

    /// Exact calculation name.
    pub name: String,
}

/// Arguments for `medcalc search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Case-insensitive substring of a name or description.
    pub query: String,
}

// ---------------------------------------------------------------------------
// Calc
// ---------------------------------------------------------------------------

/// Arguments for `medcalc calc`.
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Category slug.
    pub slug: String,

    /// Exact calculation name.
    pub name: String,

    /// Input value, repeatable.
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Ask the explanation service to interpret the result.
    #[arg(long)]
    pub explain: bool,

    /// Extra clinical context for the explanation.
    #[arg(long, requires = "explain")]
    pub context: Option<String>,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Arguments for `medcalc config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration (API key redacted).
    Show,
    /// Create `.medcalc/config.yaml` in the current directory.
    Init(ConfigInitArgs),
    /// Print the path of the `.medcalc/` directory in use.
    Path,
}

/// Arguments for `medcalc config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `medcalc completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn calc_collects_repeated_params() {
        let cli = Cli::parse_from([
            "medcalc",
            "calc",
            "nutrition-fluid",
            "Body Mass Index (BMI)",
            "-p",
            "weight=70",
            "--param",
            "height=1.75",
            "--json",
        ]);
        assert!(cli.global.json);
        match cli.command {
            Some(Commands::Calc(args)) => {
                assert_eq!(args.name, "Body Mass Index (BMI)");
                assert_eq!(args.params, vec!["weight=70", "height=1.75"]);
                assert!(!args.explain);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn context_requires_explain() {
        let res = Cli::try_parse_from(["medcalc", "calc", "a", "b", "--context", "post-op"]);
        assert!(res.is_err());
    }
}
