//! Tokenizers for the package manager's line-oriented output
//!
//! Each function looks at literal text and returns a typed result; none of
//! them run commands or log.

pub mod cellar;
pub mod latest;
pub mod listing;

pub use cellar::{cellar_entry, cellar_version, starts_with_root};
pub use latest::{candidate_text, latest_from_info, match_latest, LatestMatch, LatestRule};
pub use listing::parse_listing_line;

/// A package name and version recovered from one line of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageLine<'a> {
    pub name: &'a str,
    pub version: &'a str,
}

/// Leading run of a version-shaped token: starts with a digit and stops at
/// whitespace, `(`, `)`, `;` or a comma that ends the token.
///
/// Commas inside a version (`5.7.1.543,5.7.1`) are kept; only a comma
/// followed by whitespace or the end of text separates, as in `1.0, HEAD`.
pub(crate) fn version_token(text: &str) -> Option<&str> {
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let mut chars = text.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        let ends = match c {
            '(' | ')' | ';' => true,
            ',' => chars.peek().map_or(true, |(_, next)| next.is_whitespace()),
            c => c.is_whitespace(),
        };
        if ends {
            return Some(&text[..index]);
        }
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_token_stops_at_separators() {
        assert_eq!(version_token("2.1 (bottled)"), Some("2.1"));
        assert_eq!(version_token("1.0.2, HEAD"), Some("1.0.2"));
        assert_eq!(version_token("89.0b3"), Some("89.0b3"));
        assert_eq!(version_token("1.0,"), Some("1.0"));
        assert_eq!(version_token("latest"), None);
        assert_eq!(version_token(""), None);
    }

    #[test]
    fn test_version_token_keeps_inner_commas() {
        assert_eq!(
            version_token("5.7.1.543,5.7.1 (auto_updates)"),
            Some("5.7.1.543,5.7.1")
        );
        assert_eq!(version_token("3.2,1.0, HEAD"), Some("3.2,1.0"));
    }
}
