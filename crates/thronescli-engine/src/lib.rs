// Engine: turns a list of field definitions into command-line options,
// record filters, sort keys, count tables and text output.
// Nothing in here knows about cards; the CLI crate supplies the schema.

pub mod count;
pub mod error;
pub mod field;
pub mod filter;
pub mod markup;
pub mod options;
pub mod record;
pub mod render;
pub mod schema;
pub mod search;
pub mod sort;

pub use count::{CountTable, FieldCounts};
pub use error::{Error, Result};
pub use field::{ChoiceTable, FieldKind, FieldSpec, SortValue, SubFlag};
pub use filter::{Directive, Filter, Test};
pub use options::{MatchMode, Options, Pattern, SearchArgs, ViewMode, any_given};
pub use record::{FieldValue, MissingField, Record};
pub use render::{Painter, Renderer};
pub use schema::{Exclusion, OptionSpec, Role, Schema};
pub use search::Search;
pub use sort::sort_records;

// Re-exported so schemas can style fields without a direct dependency
pub use owo_colors::Style;
