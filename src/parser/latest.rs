//! `<name>: <free text>` lines from the info command
//!
//! Rules are tried in priority order against the whole trailing text, so a
//! line carrying both `(bottled)` and `, HEAD` resolves through the
//! bottled rule.

use super::version_token;

const STABLE: &str = "stable ";
const BOTTLED: &str = "(bottled)";
const HEAD: &str = ", HEAD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatestRule {
    /// `stable <version> (bottled)`
    StableBottled,
    /// `stable <version>, HEAD`
    StableWithHead,
    /// `stable <version>`
    Stable,
    /// first version-shaped token anywhere in the text
    Bare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestMatch<'a> {
    pub rule: LatestRule,
    pub version: &'a str,
}

/// Trailing text of a candidate line. The name comparison ignores ASCII
/// case and the separator is a colon plus one whitespace character.
pub fn candidate_text<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let head = line.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    let rest = line[name.len()..].strip_prefix(':')?;
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(chars.as_str()),
        _ => None,
    }
}

/// Versions that directly follow a `stable ` marker, with the text after each
fn stable_versions<'a>(text: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    text.match_indices(STABLE).filter_map(move |(index, _)| {
        let after = &text[index + STABLE.len()..];
        version_token(after).map(|version| (version, &after[version.len()..]))
    })
}

fn is_bottled(rest: &str) -> bool {
    rest.starts_with(char::is_whitespace) && rest.trim_start().starts_with(BOTTLED)
}

pub fn match_latest(text: &str) -> Option<LatestMatch<'_>> {
    let rules: [(LatestRule, fn(&str) -> bool); 3] = [
        (LatestRule::StableBottled, is_bottled),
        (LatestRule::StableWithHead, |rest| rest.starts_with(HEAD)),
        (LatestRule::Stable, |_| true),
    ];

    for (rule, accepts) in rules {
        if let Some((version, _)) = stable_versions(text).find(|(_, rest)| accepts(rest)) {
            return Some(LatestMatch { rule, version });
        }
    }

    text.char_indices()
        .find(|(_, c)| c.is_ascii_digit())
        .and_then(|(index, _)| version_token(&text[index..]))
        .map(|version| LatestMatch {
            rule: LatestRule::Bare,
            version,
        })
}

/// First candidate line that yields a version wins
pub fn latest_from_info<'a>(output: &'a str, name: &str) -> Option<LatestMatch<'a>> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| candidate_text(line, name))
        .find_map(match_latest)
}
