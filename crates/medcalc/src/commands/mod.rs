//! Command handlers, one module per subcommand.

pub mod calc;
pub mod categories;
pub mod check;
pub mod completion;
pub mod config_cmd;
pub mod info;
pub mod list;
pub mod search;
pub mod show;
pub mod version;
