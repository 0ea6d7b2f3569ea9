//! The ordered field registry and the command line options generated from it.

use crate::error::{Error, Result};
use crate::field::{FieldKind, FieldSpec, single_match};
use clap::{Arg, ArgAction, Command};

/// What an option does with its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// `--X`: match, equal, or (for flags) be true
    Match,
    /// `--X-isnt`: must not match
    Isnt,
    /// `--X-gt`
    Greater,
    /// `--X-lt`
    Less,
    /// `--non-X`: flag is false
    Not,
}

/// One generated option, bound to the field that handles it.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub id: String,
    pub long: String,
    pub short: Option<char>,
    pub field: usize,
    pub role: Role,
    pub help: String,
}

/// Records normally hidden unless the user asks for them with `--include-X`.
#[derive(Debug, Clone)]
pub struct Exclusion {
    pub flag: String,
    pub key: &'static str,
    pub values: Vec<String>,
    pub help: String,
}

impl Exclusion {
    pub fn new(name: &str, key: &'static str, values: &[&str], help: &str) -> Self {
        Self {
            flag: format!("include-{}", name),
            key,
            values: values.iter().map(|v| v.to_string()).collect(),
            help: help.to_string(),
        }
    }
}

/// Ordered collection of fields describing one record type.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    options: Vec<OptionSpec>,
    exclusions: Vec<Exclusion>,
    search: Vec<usize>,
}

impl Schema {
    /// The first field is the title field shown on every output line.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let options = fields
            .iter()
            .enumerate()
            .flat_map(|(index, field)| generate_options(index, field))
            .collect();
        Self {
            fields,
            options,
            exclusions: Vec::new(),
            search: Vec::new(),
        }
    }

    /// Fields matched by free-text search terms, by option name.
    pub fn search_fields(mut self, optnames: &[&str]) -> Self {
        self.search = optnames
            .iter()
            .filter_map(|name| self.fields.iter().position(|f| f.optname == *name))
            .collect();
        self
    }

    pub fn exclude(mut self, exclusion: Exclusion) -> Self {
        self.exclusions.push(exclusion);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> &FieldSpec {
        &self.fields[index]
    }

    pub fn title(&self) -> &FieldSpec {
        &self.fields[0]
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    pub fn search(&self) -> &[usize] {
        &self.search
    }

    pub fn option(&self, long: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|opt| opt.long == long)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.optname.as_str()).collect()
    }

    /// Resolve a field name given to `--sort`, `--count` or `--show`.
    pub fn resolve_field(&self, option: &str, arg: &str) -> Result<usize> {
        single_match(
            arg,
            self.fields
                .iter()
                .enumerate()
                .map(|(i, f)| (f.optname.as_str(), i)),
        )
        .ok_or_else(|| Error::invalid_argument(option, arg, self.field_names()))
    }

    /// Add one option per generated field option and exclusion to `cmd`.
    pub fn augment(&self, mut cmd: Command) -> Command {
        for opt in &self.options {
            let mut arg = Arg::new(opt.id.clone())
                .long(opt.long.clone())
                .help(opt.help.clone())
                .help_heading("Field Options");
            if let Some(short) = opt.short {
                arg = arg.short(short);
            }
            arg = match (&self.fields[opt.field].kind, opt.role) {
                (FieldKind::Flag, _) => arg.action(ArgAction::SetTrue),
                (FieldKind::Count, Role::Match) => arg
                    .action(ArgAction::Append)
                    .value_name("N")
                    .value_parser(clap::value_parser!(i64)),
                (FieldKind::Count, _) => arg
                    .action(ArgAction::Set)
                    .value_name("N")
                    .value_parser(clap::value_parser!(i64)),
                (FieldKind::Choice(_) | FieldKind::Composite(_), _) => {
                    arg.action(ArgAction::Append).value_name("CHOICE")
                }
                _ => arg.action(ArgAction::Append).value_name("TEXT"),
            };
            cmd = cmd.arg(arg);
        }
        for exclusion in &self.exclusions {
            cmd = cmd.arg(
                Arg::new(exclusion.flag.clone())
                    .long(exclusion.flag.clone())
                    .help(exclusion.help.clone())
                    .action(ArgAction::SetTrue),
            );
        }
        cmd
    }
}

fn generate_options(index: usize, field: &FieldSpec) -> Vec<OptionSpec> {
    let name = &field.optname;
    let real = &field.realname;
    let option = |suffix: &str, role: Role, short: Option<char>, help: String| OptionSpec {
        id: format!("field-{}{}", name, suffix),
        long: format!("{}{}", name, suffix),
        short,
        field: index,
        role,
        help,
    };
    let base_help = |default: String| field.help.clone().unwrap_or(default);

    match &field.kind {
        FieldKind::Text | FieldKind::Markup | FieldKind::Delimited { .. } => vec![
            option(
                "",
                Role::Match,
                field.optalias,
                base_help(format!("Filter on matching {}.", real)),
            ),
            option(
                "-isnt",
                Role::Isnt,
                None,
                format!("Filter on non-matching {}.", real),
            ),
        ],
        FieldKind::Count => vec![
            option(
                "",
                Role::Match,
                field.optalias,
                base_help(format!("Filter on given {}.", real)),
            ),
            option(
                "-gt",
                Role::Greater,
                None,
                format!("Filter on {} greater than N.", real),
            ),
            option(
                "-lt",
                Role::Less,
                None,
                format!("Filter on {} less than N.", real),
            ),
        ],
        FieldKind::Flag => vec![
            option(
                "",
                Role::Match,
                field.optalias,
                base_help(format!("Filter on {}.", real)),
            ),
            OptionSpec {
                id: format!("field-non-{}", name),
                long: format!("non-{}", name),
                short: None,
                field: index,
                role: Role::Not,
                help: format!("Filter on Non-{}.", real),
            },
        ],
        FieldKind::Choice(table) => {
            let choices = table.aliases().collect::<Vec<_>>().join(", ");
            vec![
                option(
                    "",
                    Role::Match,
                    field.optalias,
                    base_help(format!("Filter on given {}. One of: {}.", real, choices)),
                ),
                option(
                    "-isnt",
                    Role::Isnt,
                    None,
                    format!("Filter on other than given {}.", real),
                ),
            ]
        }
        FieldKind::Composite(flags) => {
            let names = flags.iter().map(|f| f.name).collect::<Vec<_>>().join(", ");
            let letters: String = flags
                .iter()
                .filter_map(|f| f.name.chars().next())
                .collect::<String>()
                .to_uppercase();
            vec![
                option(
                    "",
                    Role::Match,
                    field.optalias,
                    base_help(format!(
                        "Filter on having given {}. One of: {}, or a combination of the letters '{}'.",
                        real, names, letters
                    )),
                ),
                option(
                    "-isnt",
                    Role::Isnt,
                    None,
                    format!("Filter on not having given {}.", real),
                ),
            ]
        }
    }
}
