//! Rule predicates and first-match evaluation.

use super::{Category, CategoryResult};

/// A test against a normalized pattern or domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The command itself, or the command followed by arguments
    /// (`git push` matches `git push` and `git push origin`, not `git pushx`).
    Command(&'static str),
    StartsWith(&'static str),
    EndsWith(&'static str),
    Exact(&'static str),
    OneOf(&'static [&'static str]),
    /// The last `/`-separated segment is one of the given names.
    Basename(&'static [&'static str]),
}

impl Predicate {
    pub fn test(&self, subject: &str) -> bool {
        match *self {
            Predicate::Command(command) => {
                subject == command
                    || subject
                        .strip_prefix(command)
                        .is_some_and(|rest| rest.starts_with(' '))
            }
            Predicate::StartsWith(prefix) => subject.starts_with(prefix),
            Predicate::EndsWith(suffix) => subject.ends_with(suffix),
            Predicate::Exact(value) => subject == value,
            Predicate::OneOf(values) => values.contains(&subject),
            Predicate::Basename(names) => {
                let base = subject.rsplit('/').next().unwrap_or(subject);
                names.contains(&base)
            }
        }
    }
}

/// A predicate and the reason reported when it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub predicate: Predicate,
    pub reason: &'static str,
}

impl Rule {
    pub const fn new(predicate: Predicate, reason: &'static str) -> Self {
        Self { predicate, reason }
    }
}

/// One category's ordered rules.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub category: Category,
    pub rules: &'static [Rule],
}

/// Evaluates `tables` in order and returns the first matching rule's result.
pub fn first_match(tables: &[Table], subject: &str) -> Option<CategoryResult> {
    tables.iter().find_map(|table| {
        table
            .rules
            .iter()
            .find(|rule| rule.predicate.test(subject))
            .map(|rule| CategoryResult::new(table.category, rule.reason))
    })
}
