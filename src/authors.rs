//! APA-style author list formatting.
//!
//! Author strings from profile sources are free text such as
//! `"John Smith, Jane Doe"` or `"Smith, John"`. [`format_authors`] turns them
//! into `"Smith, J. & Doe, J."`-style lists.
//!
//! The splitter is deliberately naive: it cuts on every comma, semicolon and
//! `and` followed by whitespace, so strings like `"Smith, John and Jane Doe"`
//! come out mis-split. Consumers rely on this exact output shape.

use crate::regex::Regex;
use std::sync::LazyLock;

/// Text rendered when no author could be formatted.
pub const UNKNOWN_AUTHORS: &str = "Unknown Authors";

static SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;]|and\s+").unwrap());

/// Number of authors listed before truncating with "et al."
const MAX_LISTED: usize = 3;

/// Formats a raw author string as an APA author list.
///
/// Returns `None` when the input is empty, is the `"Unknown Authors"`
/// placeholder, or yields no names.
///
/// # Examples
///
/// ```
/// use citelist::authors::format_authors;
///
/// assert_eq!(format_authors("John Smith").as_deref(), Some("Smith, J."));
/// assert_eq!(
///     format_authors("John Smith, Jane Doe").as_deref(),
///     Some("Smith, J. & Doe, J.")
/// );
/// ```
pub fn format_authors(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw == UNKNOWN_AUTHORS {
        return None;
    }

    let names: Vec<String> = if is_single_inverted_name(raw) {
        vec![format_single_author(raw)]
    } else {
        SEPARATOR_REGEX
            .split(raw)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(format_single_author)
            .filter(|name| !name.is_empty())
            .collect()
    };

    join_authors(&names)
}

/// Checks whether the whole string is one person written as
/// `Lastname, Given`.
///
/// Requires exactly one comma, no other separators, a single-word given name
/// and a family name that is one word or starts with a lowercase particle
/// (`"van Dijk"`). `"John Smith, Jane Doe"` and `"Jane Mary, Doe"` are two
/// people.
fn is_single_inverted_name(raw: &str) -> bool {
    if raw.contains(';') || SEPARATOR_REGEX.find_iter(raw).count() != 1 {
        return false;
    }
    match raw.split_once(',') {
        Some((family, given)) => {
            let family = family.trim();
            let given = given.trim();
            !family.is_empty()
                && is_single_word(given)
                && (is_single_word(family) || starts_with_particle(family))
        }
        None => false,
    }
}

fn is_single_word(s: &str) -> bool {
    s.split_whitespace().count() == 1
}

fn starts_with_particle(family: &str) -> bool {
    family.chars().next().is_some_and(char::is_lowercase)
}

/// Formats one name as `Lastname, F.`.
fn format_single_author(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return String::new();
    }

    if let Some((family, given)) = name.split_once(',')
        && !given.contains(',')
    {
        let family = family.trim();
        let given = given.trim();
        return if given.chars().count() <= 2 {
            format!("{family}, {given}")
        } else {
            let initial = given.chars().next().map(String::from).unwrap_or_default();
            format!("{family}, {initial}.")
        };
    }

    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.split_last() {
        None => String::new(),
        Some((family, [])) => family.to_string(),
        Some((family, given)) => {
            let initials: String = given
                .iter()
                .filter_map(|part| part.chars().next())
                .map(|c| format!("{}.", c.to_uppercase()))
                .collect();
            format!("{family}, {initials}")
        }
    }
}

/// Joins formatted names with APA punctuation.
fn join_authors(names: &[String]) -> Option<String> {
    match names {
        [] => None,
        [only] => Some(only.clone()),
        [first, second] => Some(format!("{first} & {second}")),
        [first, second, third] => Some(format!("{first}, {second} & {third}")),
        _ => Some(format!("{} et al.", names[..MAX_LISTED].join(", "))),
    }
}
