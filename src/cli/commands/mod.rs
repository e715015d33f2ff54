//! One module per `pwvault` subcommand.  Each exposes an `execute` fn
//! called from `main`.

pub mod add;
pub mod audit_cmd;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod generate;
pub mod get;
pub mod import_cmd;
pub mod init;
pub mod list;
pub mod rotate;
pub mod set;
