//! Shared chumsky parser utilities for label scanning

use chumsky::prelude::*;

/// Parse optional whitespace including newlines.
///
/// Uses explicit character matching to avoid the "repeated combinator making no progress"
/// issue that can occur with `chumsky::text::whitespace().repeated()`.
pub fn optional_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t\n\r\u{a0}").repeated().ignored()
}

/// Parse a run of word characters (`[A-Za-z0-9_]`), at least one long.
pub fn word<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .to_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_whitespace() {
        let parser = optional_whitespace().then(just("test")).then_ignore(end());
        assert!(parser.parse("test").into_result().is_ok());
        assert!(parser.parse("  test").into_result().is_ok());
        assert!(parser.parse("\t\n test").into_result().is_ok());
    }

    #[test]
    fn test_word() {
        let parser = word().then_ignore(end());
        assert_eq!(parser.parse("Interface").into_result(), Ok("Interface"));
        assert_eq!(parser.parse("snake_case1").into_result(), Ok("snake_case1"));
        assert!(parser.parse("two words").into_result().is_err());
        assert!(parser.parse("").into_result().is_err());
    }
}
