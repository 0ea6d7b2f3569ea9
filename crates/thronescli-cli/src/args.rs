use crate::types::LogLevel;
use clap::{CommandFactory, Parser};
use thronescli_engine::{Schema, SearchArgs};

#[derive(Parser, Debug)]
#[command(name = "thronescli")]
#[command(about = "Search and browse the cards of A Game of Thrones LCG 2nd Ed", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub search: SearchArgs,

    #[arg(long, help = "Update card database")]
    pub update: bool,

    #[arg(long, default_value = "warn")]
    pub log_level: LogLevel,
}

/// The full command line: global flags plus the options generated from `schema`.
pub fn command(schema: &Schema) -> clap::Command {
    schema.augment(Cli::command())
}
