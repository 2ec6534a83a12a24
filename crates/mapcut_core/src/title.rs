use serde::{Deserialize, Serialize};

/// De jure title tiers, lowest first. Nesting in a well-formed landed-titles
/// tree is strictly decreasing: a child title's tier is always below its
/// parent's, though ranks may be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Barony,
    County,
    Duchy,
    Kingdom,
    Empire,
}

/// Tier encoded by a title identifier's prefix, or `None` if the string is
/// not title-shaped.
pub fn tier(s: &str) -> Option<Tier> {
    let mut chars = s.chars();
    let t = match chars.next()? {
        'b' => Tier::Barony,
        'c' => Tier::County,
        'd' => Tier::Duchy,
        'k' => Tier::Kingdom,
        'e' => Tier::Empire,
        _ => return None,
    };
    if chars.next() != Some('_') {
        return None;
    }
    let rest = &s[2..];
    if rest.is_empty() {
        return None;
    }
    if !rest
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '\''))
    {
        return None;
    }
    Some(t)
}

pub fn looks_like_title(s: &str) -> bool {
    tier(s).is_some()
}
