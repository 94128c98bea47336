//! Merging the install directory into a Windows `Path` value
//!
//! The value is a `;`-separated list. Membership is decided per item, not by
//! substring, so `%USERPROFILE%\.adb-env-old` does not count as the install
//! directory while `%userprofile%\.ADB-ENV\` does.

/// Windows path-list separator
pub const SEPARATOR: char = ';';

/// Split a Path value into its non-empty items
pub fn split_path(value: &str) -> Vec<String> {
    value
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join items back into a Path value
pub fn join_path(items: &[String]) -> String {
    items.join(";")
}

fn normalize(item: &str) -> String {
    item.trim()
        .trim_matches('"')
        .trim_end_matches(['\\', '/'])
        .to_lowercase()
}

fn is_same_entry(item: &str, entries: &[&str]) -> bool {
    let item = normalize(item);
    !item.is_empty() && entries.iter().any(|entry| normalize(entry) == item)
}

/// Whether any item of `value` is one of `entries`
///
/// `entries` lists every spelling of the same directory (the unexpanded
/// `%USERPROFILE%` form and the absolute form).
pub fn contains_entry(value: &str, entries: &[&str]) -> bool {
    value
        .split(SEPARATOR)
        .any(|item| is_same_entry(item, entries))
}

/// Append `entry` to `value` unless already present.
///
/// Returns the new value, or `None` when nothing has to change. Existing items
/// are left byte-for-byte as they were.
pub fn append_entry(value: &str, entry: &str) -> Option<String> {
    append_entry_with_aliases(value, entry, &[])
}

/// Like [`append_entry`], also treating `aliases` as already present spellings
pub fn append_entry_with_aliases(value: &str, entry: &str, aliases: &[&str]) -> Option<String> {
    let mut spellings = Vec::with_capacity(aliases.len() + 1);
    spellings.push(entry);
    spellings.extend_from_slice(aliases);

    if contains_entry(value, &spellings) {
        return None;
    }

    if value.is_empty() || value.ends_with(SEPARATOR) {
        Some(format!("{}{}", value, entry))
    } else {
        Some(format!("{}{}{}", value, SEPARATOR, entry))
    }
}

/// Remove every item matching one of `entries`.
///
/// Returns the new value, or `None` when no item matched. The remaining
/// items (blank ones included) are kept byte-for-byte.
pub fn remove_entry(value: &str, entries: &[&str]) -> Option<String> {
    if !contains_entry(value, entries) {
        return None;
    }

    let kept: Vec<&str> = value
        .split(SEPARATOR)
        .filter(|item| !is_same_entry(item, entries))
        .collect();
    Some(kept.join(";"))
}
