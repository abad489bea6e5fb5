//! # Wildcard event patterns.
//!
//! A pattern is an event name containing one or more `*`. Each `*` matches
//! any substring (including the empty one); every other character matches
//! itself. Matching is anchored at both ends and case-sensitive.
//!
//! ```text
//! "order.*"   matches  "order.created", "order."       not "order", "orders.x"
//! "a.*.c"     matches  "a.x.c", "a..c"                 not "a.x.y"
//! "*"         matches  everything
//! ```

use regex::Regex;

/// Returns `true` if `event` must be stored as a wildcard pattern.
#[inline]
pub(crate) fn is_wildcard(event: &str) -> bool {
    event.contains('*')
}

/// Compiled wildcard pattern.
#[derive(Clone, Debug)]
pub(crate) struct Pattern {
    source: String,
    re: Regex,
}

impl Pattern {
    /// Compiles `source`. Literal segments are escaped; only the regex size limit can fail.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let body = source
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let re = Regex::new(&format!("^(?s:{body})$"))?;
        Ok(Self {
            source: source.to_string(),
            re,
        })
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if `event` matches the whole pattern.
    pub fn matches(&self, event: &str) -> bool {
        self.re.is_match(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(source: &str) -> Pattern {
        Pattern::new(source).unwrap()
    }

    #[test]
    fn test_trailing_wildcard() {
        let pat = p("A.*");
        assert!(pat.matches("A.x"));
        assert!(pat.matches("A."));
        assert!(pat.matches("A.x.y"));
        assert!(!pat.matches("A"));
        assert!(!pat.matches("B.x"));
        assert!(!pat.matches("AAx"));
    }

    #[test]
    fn test_inner_wildcard_is_anchored() {
        let pat = p("a.*.c");
        assert!(pat.matches("a.x.c"));
        assert!(pat.matches("a..c"));
        assert!(!pat.matches("a.x.y"));
        assert!(!pat.matches("xa.x.c"));
    }

    #[test]
    fn test_multiple_and_leading_wildcards() {
        let pat = p("*.created.*");
        assert!(pat.matches("order.created.v1"));
        assert!(!pat.matches("order.updated.v1"));

        assert!(p("*").matches(""));
        assert!(p("*").matches("anything at all"));
    }

    #[test]
    fn test_case_sensitive_and_literal_metachars() {
        assert!(!p("Order.*").matches("order.created"));
        assert!(p("price($)*").matches("price($)usd"));
        assert!(!p("a+*").matches("aa"));
    }

    #[test]
    fn test_is_wildcard() {
        assert!(is_wildcard("a.*"));
        assert!(!is_wildcard("a.b"));
        assert_eq!(p("x*").as_str(), "x*");
    }
}
