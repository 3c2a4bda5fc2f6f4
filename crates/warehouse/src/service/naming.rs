//! Explorer-style disambiguation of product names: `Foo`, `Foo (1)`, `Foo (2)`, ...

use std::collections::HashSet;

/// Parses a trailing `(<digits>)` token, e.g. `Foo (12)` yields `12`.
fn trailing_counter(name: &str) -> Option<u64> {
    let inner = name.strip_suffix(')')?;
    let open = inner.rfind('(')?;
    let digits = &inner[open + 1..];

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Picks the name to store for `base`, given every existing name that
/// starts with it.
///
/// With no matches the name is used as is. Otherwise the highest trailing
/// counter across all matches is bumped by one, so the first collision
/// yields `(1)` even when none of the matches carries a counter. Counters
/// too large to parse are skipped when picking the highest, then stepped
/// over if the bumped name happens to be one of them.
pub fn unique_name<'a, I>(base: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    if taken.is_empty() {
        return base.to_string();
    }

    let highest = taken
        .iter()
        .filter_map(|name| trailing_counter(name))
        .max()
        .unwrap_or(0);

    // u64::MAX + 1 must still be representable
    let mut next = u128::from(highest) + 1;
    loop {
        let candidate = format!("{base} ({next})");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        next += 1;
    }
}
