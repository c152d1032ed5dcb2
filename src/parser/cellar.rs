//! `<root>/<name>/<version>` path lines

use super::PackageLine;

fn trimmed_root(root: &str) -> &str {
    root.trim_end_matches('/')
}

/// True when `line` is a path below `root`
pub fn starts_with_root(line: &str, root: &str) -> bool {
    line.strip_prefix(trimmed_root(root))
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Split a path line into the package segment and the segment after it.
///
/// The version ends at the next path separator or whitespace, so
/// `/usr/local/Caskroom/firefox/89.0/Firefox.app` yields `89.0`.
pub fn cellar_entry<'a>(line: &'a str, root: &str) -> Option<PackageLine<'a>> {
    let rest = line.strip_prefix(trimmed_root(root))?.strip_prefix('/')?;

    let (name, rest) = rest.split_once('/')?;
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }

    let end = rest
        .find(|c: char| c == '/' || c.is_whitespace())
        .unwrap_or(rest.len());
    let version = &rest[..end];
    if version.is_empty() {
        return None;
    }

    Some(PackageLine { name, version })
}

pub fn cellar_version<'a>(line: &'a str, root: &str) -> Option<&'a str> {
    cellar_entry(line, root).map(|entry| entry.version)
}
