// thronescli: search the A Game of Thrones LCG 2nd Ed card database.
//
// The card schema in `model` drives everything else: the engine turns it
// into command line options, filters, sort keys and output, and the core
// crate supplies the cached card records.

mod args;
mod commands;
mod logging;
pub mod model;
pub mod types;

pub use args::{Cli, command};
pub use commands::run;
pub use logging::init_logging;
pub use model::card_schema;
pub use types::LogLevel;
