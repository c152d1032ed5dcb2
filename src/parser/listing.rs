//! Lines from the list command

use super::{cellar::cellar_entry, PackageLine};

/// Parse one listing line.
///
/// Cellar paths are tried first when the installation root is known;
/// anything else falls back to the `<name> <version...>` shape.
pub fn parse_listing_line<'a>(line: &'a str, root: Option<&str>) -> Option<PackageLine<'a>> {
    if let Some(entry) = root.and_then(|root| cellar_entry(line, root)) {
        return Some(entry);
    }

    let line = line.trim();
    let (name, version) = line.split_once(char::is_whitespace)?;
    let version = version.trim();
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some(PackageLine { name, version })
}
