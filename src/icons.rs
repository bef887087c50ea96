//! Built-in favicon identifiers.
//!
//! Entries that arrive without a fetched favicon fall back to
//! [`BOOKMARK_DEFAULT`]. The named lookup covers the small set of icons the
//! menu can render without any external fetch.

/// Placeholder favicon applied to every entry until a real one is pushed
/// through favicon propagation.
pub const BOOKMARK_DEFAULT: &str = "chrome://mozapps/skin/places/defaultFavicon.svg";

const BUILTIN: &[(&str, &str)] = &[
    ("bookmark", BOOKMARK_DEFAULT),
    ("folder", "chrome://global/skin/icons/folder.svg"),
    ("tag", "chrome://browser/skin/tag.svg"),
    ("history", "chrome://browser/skin/history.svg"),
];

/// Look up a built-in icon by name.
pub fn builtin(name: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, icon)| *icon)
}
