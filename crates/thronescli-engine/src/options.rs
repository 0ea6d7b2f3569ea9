//! Parsed, validated user request.

use crate::error::{Error, Result};
use crate::field::{FieldKind, SubFlag, single_match};
use crate::filter::{Directive, Test};
use crate::schema::{OptionSpec, Role, Schema};
use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, Args};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// Global search flags shared by every schema.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    #[arg(
        value_name = "SEARCH",
        help = "Match against name, text or traits. Several words are joined with spaces"
    )]
    pub search: Vec<String>,

    #[arg(long, help = "Use case sensitive matching")]
    pub case: bool,

    #[arg(long, help = "Use exact matching")]
    pub exact: bool,

    #[arg(short = 'r', long, help = "Use regular expression matching")]
    pub regex: bool,

    #[arg(
        long,
        help = "Treat multiple options of the same type as inclusive rather than exclusive (or-logic instead of and-logic)"
    )]
    pub inclusive: bool,

    #[arg(
        short,
        long,
        action = ArgAction::Count,
        group = "view_mode",
        help = "Show verbose details. Repeat for more details"
    )]
    pub verbose: u8,

    #[arg(long, group = "view_mode", help = "Show brief one-line output (default)")]
    pub brief: bool,

    #[arg(long, group = "view_mode", help = "Show only names")]
    pub name_only: bool,

    #[arg(long, help = "Show count breakdowns only")]
    pub count_only: bool,

    #[arg(long, value_name = "FIELD", help = "Sort results by the given field")]
    pub sort: Vec<String>,

    #[arg(long, value_name = "FIELD", help = "Show count breakdown for the given field")]
    pub count: Vec<String>,

    #[arg(long, value_name = "FIELD", help = "Show the given field in brief output")]
    pub show: Vec<String>,
}

/// Output detail level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Brief,
    NameOnly,
    Verbose(u8),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchMode {
    pub case: bool,
    pub exact: bool,
}

/// A text filter argument, literal or compiled.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Already lower-cased unless matching is case sensitive
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    pub fn new(option: &str, value: &str, regex: bool, case: bool) -> Result<Self> {
        if regex {
            RegexBuilder::new(value)
                .case_insensitive(!case)
                .build()
                .map(Pattern::Regex)
                .map_err(|source| Error::InvalidRegex {
                    option: option.to_string(),
                    source,
                })
        } else if case {
            Ok(Pattern::Literal(value.to_string()))
        } else {
            Ok(Pattern::Literal(value.to_lowercase()))
        }
    }

    pub fn matches(&self, haystack: &str, mode: MatchMode) -> bool {
        match self {
            Pattern::Regex(re) => match re.find(haystack) {
                Some(m) if mode.exact => m.start() == 0 && m.end() == haystack.len(),
                Some(_) => true,
                None => false,
            },
            Pattern::Literal(needle) => {
                let haystack = if mode.case {
                    Cow::Borrowed(haystack)
                } else {
                    Cow::Owned(haystack.to_lowercase())
                };
                if mode.exact {
                    haystack == needle.as_str()
                } else {
                    haystack.contains(needle.as_str())
                }
            }
        }
    }
}

/// The user request, built once per invocation.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub mode: MatchMode,
    pub inclusive: bool,
    pub view: ViewMode,
    pub count_only: bool,
    pub sort: Vec<usize>,
    pub count: Vec<usize>,
    pub show: Vec<usize>,
    pub directives: Vec<Directive>,
}

impl Options {
    /// Validate `args` and the schema's field options found in `matches`.
    pub fn from_matches(schema: &Schema, args: &SearchArgs, matches: &ArgMatches) -> Result<Self> {
        let mut directives = Vec::new();

        if !args.search.is_empty() {
            let terms = args.search.join(" ");
            directives.push(Directive::Search(Pattern::new(
                "search", &terms, args.regex, args.case,
            )?));
        }

        for opt in schema.options() {
            if let Some(test) = option_test(schema, opt, args, matches)? {
                directives.push(Directive::Field {
                    field: opt.field,
                    role: opt.role,
                    test,
                });
            }
        }

        add_implied(schema, args, &mut directives)?;

        // Exclusions run even when their flag is off; that is when they exclude.
        for (index, exclusion) in schema.exclusions().iter().enumerate() {
            directives.push(Directive::Exclude {
                exclusion: index,
                include: flag(matches, &exclusion.flag),
            });
        }

        let resolve_all = |option: &str, names: &[String]| -> Result<Vec<usize>> {
            names
                .iter()
                .map(|name| schema.resolve_field(option, name))
                .collect()
        };

        let view = if args.name_only {
            ViewMode::NameOnly
        } else if args.verbose > 0 {
            ViewMode::Verbose(args.verbose)
        } else {
            ViewMode::Brief
        };

        let options = Options {
            mode: MatchMode {
                case: args.case,
                exact: args.exact,
            },
            inclusive: args.inclusive,
            view,
            count_only: args.count_only,
            sort: resolve_all("sort", &args.sort)?,
            count: resolve_all("count", &args.count)?,
            show: resolve_all("show", &args.show)?,
            directives,
        };

        tracing::debug!(
            directives = options.directives.len(),
            sort = options.sort.len(),
            count = options.count.len(),
            "parsed search options"
        );

        Ok(options)
    }
}

/// True when any argument came from the command line rather than a default.
pub fn any_given(matches: &ArgMatches) -> bool {
    matches
        .ids()
        .any(|id| matches.value_source(id.as_str()) == Some(ValueSource::CommandLine))
}

fn option_test(
    schema: &Schema,
    opt: &OptionSpec,
    args: &SearchArgs,
    matches: &ArgMatches,
) -> Result<Option<Test>> {
    let field = schema.field(opt.field);
    let test = match (&field.kind, opt.role) {
        (FieldKind::Flag, Role::Match) => flag(matches, &opt.id).then_some(Test::Is(true)),
        (FieldKind::Flag, _) => flag(matches, &opt.id).then_some(Test::Is(false)),
        (FieldKind::Count, Role::Match) => {
            let values = ints(matches, &opt.id);
            (!values.is_empty()).then_some(Test::Equals(values))
        }
        (FieldKind::Count, Role::Greater) => int(matches, &opt.id).map(Test::Greater),
        (FieldKind::Count, Role::Less) => int(matches, &opt.id).map(Test::Less),
        (FieldKind::Count, _) => None,
        _ => text_test(schema, opt, &strings(matches, &opt.id), args)?,
    };
    Ok(test)
}

/// Build the test for a value-taking text, choice or composite option.
fn text_test(
    schema: &Schema,
    opt: &OptionSpec,
    values: &[String],
    args: &SearchArgs,
) -> Result<Option<Test>> {
    if values.is_empty() {
        return Ok(None);
    }
    let negated = opt.role == Role::Isnt;
    let field = schema.field(opt.field);

    let test = match &field.kind {
        FieldKind::Choice(table) => {
            let resolved = values
                .iter()
                .map(|value| {
                    table
                        .resolve(value)
                        .map(str::to_string)
                        .ok_or_else(|| Error::invalid_argument(&field.optname, value, table.aliases()))
                })
                .collect::<Result<Vec<_>>>()?;
            if negated {
                Test::NoneOf(resolved)
            } else {
                Test::OneOf(resolved)
            }
        }
        FieldKind::Composite(flags) => {
            let mut resolved = Vec::new();
            for value in values {
                resolved.extend(resolve_sub_flags(&field.optname, value, flags)?);
            }
            if negated {
                Test::Lacks(resolved)
            } else {
                Test::Has(resolved)
            }
        }
        _ => {
            let patterns = values
                .iter()
                .map(|value| Pattern::new(&opt.long, value, args.regex, args.case))
                .collect::<Result<Vec<_>>>()?;
            if negated {
                Test::Isnt(patterns)
            } else {
                Test::Match(patterns)
            }
        }
    };
    Ok(Some(test))
}

/// Resolve a sub-flag name, or a run of sub-flag initials such as `mi`.
fn resolve_sub_flags(option: &str, arg: &str, flags: &[SubFlag]) -> Result<Vec<&'static str>> {
    let lower = arg.to_lowercase();
    let initial = |c: char| flags.iter().find(|f| f.name.starts_with(c)).map(|f| f.name);

    if !lower.is_empty() && lower.chars().all(|c| initial(c).is_some()) {
        return Ok(lower.chars().filter_map(initial).collect());
    }

    single_match(&lower, flags.iter().map(|f| (f.name, f.name)))
        .map(|name| vec![name])
        .ok_or_else(|| Error::invalid_argument(option, arg, flags.iter().map(|f| f.name)))
}

/// Fields may imply a value for another option, such as restricting a
/// character-only field to characters. The implied values of all filtered
/// fields are merged into one directive, unless the user gave that option.
fn add_implied(schema: &Schema, args: &SearchArgs, directives: &mut Vec<Directive>) -> Result<()> {
    let mut implied: Vec<(&OptionSpec, Vec<String>)> = Vec::new();

    for directive in directives.iter() {
        let Directive::Field { field, .. } = directive else {
            continue;
        };
        let Some((option, value)) = schema.field(*field).implied else {
            continue;
        };
        let Some(spec) = schema.option(option) else {
            continue;
        };
        let given = directives.iter().any(|d| {
            matches!(d, Directive::Field { field, role: Role::Match, .. } if *field == spec.field)
        });
        if given {
            continue;
        }
        match implied.iter_mut().find(|(opt, _)| opt.id == spec.id) {
            Some((_, values)) if !values.iter().any(|v| v == value) => values.push(value.to_string()),
            Some(_) => {}
            None => implied.push((spec, vec![value.to_string()])),
        }
    }

    for (spec, values) in implied {
        let Some(test) = text_test(schema, spec, &values, args)? else {
            continue;
        };
        tracing::debug!(option = %spec.long, ?values, "adding implied filter");
        directives.push(Directive::Field {
            field: spec.field,
            role: spec.role,
            test,
        });
    }
    Ok(())
}

fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches
        .try_get_one::<bool>(id)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .try_get_many::<String>(id)
        .ok()
        .flatten()
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn ints(matches: &ArgMatches, id: &str) -> Vec<i64> {
    matches
        .try_get_many::<i64>(id)
        .ok()
        .flatten()
        .map(|values| values.copied().collect())
        .unwrap_or_default()
}

fn int(matches: &ArgMatches, id: &str) -> Option<i64> {
    matches.try_get_one::<i64>(id).ok().flatten().copied()
}
