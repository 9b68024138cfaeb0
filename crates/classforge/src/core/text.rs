//! Shared text utilities for label analysis
//!
//! Word-level helpers treat `[A-Za-z0-9_]` as word characters, so a keyword
//! inside a longer identifier (`staticCount`, `defaultValue`) never matches.

use std::fmt;

use serde::Serialize;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split text into alternating runs of word and non-word characters
fn runs(text: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, c) in text.char_indices() {
        let word = is_word_char(c);
        match current {
            Some(kind) if kind == word => {}
            Some(kind) => {
                runs.push((kind, &text[start..idx]));
                start = idx;
                current = Some(word);
            }
            None => current = Some(word),
        }
    }
    if let Some(kind) = current {
        runs.push((kind, &text[start..]));
    }
    runs
}

/// Word tokens of a text, split on every non-word character
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    runs(text)
        .into_iter()
        .filter_map(|(is_word, run)| is_word.then_some(run))
}

/// Returns true if `word` appears as a whole word (case-sensitive)
pub fn contains_word(text: &str, word: &str) -> bool {
    words(text).any(|w| w == word)
}

/// Remove every whole-word occurrence of the given words
///
/// With `ignore_case` the comparison is ASCII case-insensitive.
pub fn remove_words(text: &str, targets: &[&str], ignore_case: bool) -> String {
    remove_words_where(text, |word| {
        targets.iter().any(|t| {
            if ignore_case {
                word.eq_ignore_ascii_case(t)
            } else {
                word == *t
            }
        })
    })
}

/// Remove every whole word for which `predicate` holds
pub fn remove_words_where(text: &str, predicate: impl Fn(&str) -> bool) -> String {
    runs(text)
        .into_iter()
        .filter(|(is_word, run)| !(*is_word && predicate(run)))
        .map(|(_, run)| run)
        .collect()
}

/// Keep only identifier-safe characters (`[A-Za-z0-9_$]`)
pub fn sanitize_identifier(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect()
}

/// Text has at least one letter and no lowercase letters
pub fn is_upper_case(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase)
}

/// Lowercase the first character
pub fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first character
pub fn uppercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Construct keywords recognized in class labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    Interface,
    Enum,
    Record,
    Abstract,
}

impl Keyword {
    pub const ALL: [Keyword; 4] = [
        Keyword::Interface,
        Keyword::Enum,
        Keyword::Record,
        Keyword::Abstract,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Interface => "interface",
            Keyword::Enum => "enum",
            Keyword::Record => "record",
            Keyword::Abstract => "abstract",
        }
    }

    /// Known misspellings: one adjacent transposition, one missing or one
    /// doubled character
    fn typos(self) -> &'static [&'static str] {
        match self {
            Keyword::Interface => &["interfac", "inteface", "iterface", "interrface", "intreface"],
            Keyword::Enum => &["emun", "enmu", "enu"],
            Keyword::Record => &["recrod", "reocrd", "recod", "recor"],
            Keyword::Abstract => &["abstarct", "abstact", "asbtract"],
        }
    }

    /// Exact (case-insensitive) or tolerated-typo match of a single token
    pub fn matches(self, token: &str) -> bool {
        let token = token.to_ascii_lowercase();
        if token == self.as_str() {
            return true;
        }
        // Too short to be a deliberate keyword
        if token.len() < 3 {
            return false;
        }
        self.typos().contains(&token.as_str())
    }

    /// First keyword the token matches
    pub fn from_token(token: &str) -> Option<Keyword> {
        Keyword::ALL.into_iter().find(|k| k.matches(token))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        let tokens: Vec<_> = words("<<Interface>> Drawable-v2").collect();
        assert_eq!(tokens, vec!["Interface", "Drawable", "v2"]);
        assert_eq!(words("").count(), 0);
        assert_eq!(words("+-#").count(), 0);
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("+static count: int", "static"));
        assert!(!contains_word("+staticCount: int", "static"));
        assert!(!contains_word("+Static count", "static"));
    }

    #[test]
    fn test_remove_words() {
        assert_eq!(remove_words("static final MAX", &["static", "final"], false), "  MAX");
        assert_eq!(remove_words("finalScore", &["final"], false), "finalScore");
        assert_eq!(
            remove_words("Abstract Class Shape", &["abstract", "class"], true),
            "  Shape"
        );
    }

    #[test]
    fn test_remove_words_where() {
        let stripped = remove_words_where("Interfac Drawable", |w| Keyword::from_token(w).is_some());
        assert_eq!(stripped.trim(), "Drawable");
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("My Class!"), "MyClass");
        assert_eq!(sanitize_identifier("$value_1"), "$value_1");
        assert_eq!(sanitize_identifier("<<>>"), "");
        assert_eq!(sanitize_identifier("Café"), "Caf");
    }

    #[test]
    fn test_is_upper_case() {
        assert!(is_upper_case("MAX_SIZE"));
        assert!(is_upper_case("PI"));
        assert!(!is_upper_case("Pi"));
        assert!(!is_upper_case("123"));
        assert!(!is_upper_case(""));
    }

    #[test]
    fn test_case_first() {
        assert_eq!(lowercase_first("Name"), "name");
        assert_eq!(uppercase_first("name"), "Name");
        assert_eq!(lowercase_first(""), "");
    }

    #[test]
    fn test_keyword_exact_match_any_case() {
        assert!(Keyword::Interface.matches("Interface"));
        assert!(Keyword::Enum.matches("ENUM"));
        assert!(Keyword::Record.matches("record"));
        assert!(!Keyword::Record.matches("records"));
    }

    #[test]
    fn test_keyword_typos() {
        for typo in ["interfac", "inteface", "iterface", "Interrface"] {
            assert_eq!(Keyword::from_token(typo), Some(Keyword::Interface), "{typo}");
        }
        assert_eq!(Keyword::from_token("emun"), Some(Keyword::Enum));
        assert_eq!(Keyword::from_token("recrod"), Some(Keyword::Record));
        assert_eq!(Keyword::from_token("abstarct"), Some(Keyword::Abstract));
        assert_eq!(Keyword::from_token("shape"), None);
        assert_eq!(Keyword::from_token("en"), None);
    }
}
