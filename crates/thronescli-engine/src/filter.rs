//! Predicate engine: every active directive must accept a record.

use crate::options::{MatchMode, Options, Pattern};
use crate::record::{FieldValue, Record};
use crate::schema::{Role, Schema};

/// Per-invocation instance of a filter with concrete arguments.
#[derive(Debug, Clone)]
pub enum Directive {
    /// Free-text terms matched against any of the schema's search fields
    Search(Pattern),
    Field { field: usize, role: Role, test: Test },
    /// Hides records listed by an exclusion unless `include` is set
    Exclude { exclusion: usize, include: bool },
}

#[derive(Debug, Clone)]
pub enum Test {
    Match(Vec<Pattern>),
    Isnt(Vec<Pattern>),
    Equals(Vec<i64>),
    Greater(i64),
    Less(i64),
    Is(bool),
    OneOf(Vec<String>),
    NoneOf(Vec<String>),
    Has(Vec<&'static str>),
    Lacks(Vec<&'static str>),
}

/// Evaluates the directives of one invocation.
pub struct Filter<'a> {
    schema: &'a Schema,
    directives: &'a [Directive],
    mode: MatchMode,
    inclusive: bool,
}

impl<'a> Filter<'a> {
    pub fn new(schema: &'a Schema, options: &'a Options) -> Self {
        Self {
            schema,
            directives: &options.directives,
            mode: options.mode,
            inclusive: options.inclusive,
        }
    }

    /// Conjunction of all directives.
    pub fn accepts(&self, record: &Record) -> bool {
        self.directives.iter().all(|d| self.check(d, record))
    }

    /// Evaluate a single directive against `record`.
    pub fn check(&self, directive: &Directive, record: &Record) -> bool {
        match directive {
            Directive::Search(pattern) => self.schema.search().iter().any(|&field| {
                let test = Test::Match(vec![pattern.clone()]);
                self.check_field(field, &test, record)
            }),
            Directive::Field { field, test, .. } => self.check_field(*field, test, record),
            Directive::Exclude { exclusion, include } => {
                if *include {
                    return true;
                }
                let exclusion = &self.schema.exclusions()[*exclusion];
                match record.str(exclusion.key) {
                    Some(value) => !exclusion.values.iter().any(|v| v == value),
                    None => true,
                }
            }
        }
    }

    fn check_field(&self, index: usize, test: &Test, record: &Record) -> bool {
        let field = self.schema.field(index);
        let Ok(value) = field.fetch(record) else {
            return false;
        };

        // Positive tests may be or-ed per field; negative ones only globally
        let positive = self.inclusive || field.inclusive;
        let negative = self.inclusive;
        let mode = self.mode;

        match test {
            Test::Match(patterns) => {
                let haystacks = field.haystacks(&value);
                combine(positive, patterns.iter(), |p| {
                    haystacks.iter().any(|h| p.matches(h, mode))
                })
            }
            Test::Isnt(patterns) => {
                let haystacks = field.haystacks(&value);
                combine(negative, patterns.iter(), |p| {
                    !haystacks.iter().any(|h| p.matches(h, mode))
                })
            }
            Test::Equals(numbers) => match value.as_int() {
                Some(n) => combine(positive, numbers.iter(), |&v| n == v),
                None => false,
            },
            Test::Greater(v) => value.as_int().is_some_and(|n| n > *v),
            Test::Less(v) => value.as_int().is_some_and(|n| n < *v),
            Test::Is(expected) => value == FieldValue::Bool(*expected),
            Test::OneOf(choices) => match value.as_text() {
                Some(text) => combine(positive, choices.iter(), |c| c.eq_ignore_ascii_case(text)),
                None => false,
            },
            Test::NoneOf(choices) => match value.as_text() {
                Some(text) => combine(negative, choices.iter(), |c| !c.eq_ignore_ascii_case(text)),
                None => false,
            },
            Test::Has(names) => flags_test(&value, names, positive, true),
            Test::Lacks(names) => flags_test(&value, names, negative, false),
        }
    }
}

fn combine<T>(any: bool, mut items: impl Iterator<Item = T>, f: impl FnMut(T) -> bool) -> bool {
    if any { items.any(f) } else { items.all(f) }
}

fn flags_test(value: &FieldValue, names: &[&'static str], any: bool, wanted: bool) -> bool {
    let FieldValue::Flags(flags) = value else {
        return false;
    };
    combine(any, names.iter(), |name| {
        flags
            .iter()
            .any(|(flag, on)| flag == name && *on == wanted)
    })
}
