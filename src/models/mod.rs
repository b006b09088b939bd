mod config;
mod run_log;
mod table;

pub use config::Config;
pub use run_log::{LogEntry, LogLevel, RunLog};
pub use table::Table;
