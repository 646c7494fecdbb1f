use crate::regex::Regex;
use std::sync::LazyLock;

/// Host marker identifying DOI resolver links.
pub(crate) const DOI_HOST: &str = "doi.org";

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Removes markup tags and collapses whitespace runs into single spaces.
///
/// # Arguments
///
/// * `text` - The raw text to clean
pub fn clean_text(text: &str) -> String {
    let stripped = TAG_REGEX.replace_all(text, "");
    WHITESPACE_REGEX
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Extracts a DOI from a resolver link such as `https://doi.org/10.1/xyz`.
///
/// Returns the text after the last `doi.org/`, or `None` when the link
/// does not point at a DOI resolver.
pub fn doi_from_link(link: &str) -> Option<String> {
    if !link.contains(DOI_HOST) {
        return None;
    }
    let suffix = link.rsplit("doi.org/").next().unwrap_or(link);
    if suffix.is_empty() {
        None
    } else {
        Some(suffix.to_string())
    }
}

/// Parses a year string as an integer, tolerating surrounding whitespace.
pub fn parse_year(year: &str) -> Option<i64> {
    year.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("", "")]
    #[case("Plain title", "Plain title")]
    #[case("  padded\t title \n", "padded title")]
    #[case("A <i>sub</i>title", "A subtitle")]
    #[case("CO<sub>2</sub> uptake", "CO2 uptake")]
    #[case("<b></b>", "")]
    #[case("line\n\n  break", "line break")]
    fn test_clean_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean_text(input), expected);
    }

    #[rstest]
    #[case("https://doi.org/10.1000/test", Some("10.1000/test"))]
    #[case("http://dx.doi.org/10.1000/a/b", Some("10.1000/a/b"))]
    #[case("https://arxiv.org/abs/2101.00001", None)]
    #[case("https://doi.org/", None)]
    #[case("", None)]
    fn test_doi_from_link(#[case] link: &str, #[case] expected: Option<&str>) {
        assert_eq!(doi_from_link(link).as_deref(), expected);
    }

    #[rstest]
    #[case("2020", Some(2020))]
    #[case(" 2021 ", Some(2021))]
    #[case("-5", Some(-5))]
    #[case("Unknown Year", None)]
    #[case("2020a", None)]
    #[case("", None)]
    fn test_parse_year(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_year(input), expected);
    }
}
