//! Section path conventions shared by the loader, classifier and engine
//!
//! Sections are slash-delimited paths relative to the store root. Option
//! keys live inside a section, so a fully qualified store key is
//! `root / section / option`.

/// Separator between path segments
pub const SEPARATOR: char = '/';

/// Prefix marking a desired-state section as an exclusion rule
pub const EXCLUDE_MARKER: char = '-';

/// Split a section name into its path segments.
///
/// Empty segments are kept, so `a//b` has three segments and `/` has two.
pub fn segments(section: &str) -> impl Iterator<Item = &str> {
    section.split(SEPARATOR)
}

/// If `section` is an exclusion rule, return the excluded section name.
pub fn excluded_section(section: &str) -> Option<&str> {
    section.strip_prefix(EXCLUDE_MARKER)
}

/// Join a section and an option for display, e.g. `clear/foo/bar/blah`.
///
/// A section that already ends in the separator is not doubled, and an
/// empty section yields the bare option name.
pub fn display_key(section: &str, option: &str) -> String {
    if section.is_empty() {
        option.to_string()
    } else if section.ends_with(SEPARATOR) {
        format!("{section}{option}")
    } else {
        format!("{section}{SEPARATOR}{option}")
    }
}

/// Build the fully qualified store key for `option` in `section` under `root`.
///
/// The three parts are joined with the separator and runs of separators
/// are collapsed, so the result always has a single leading `/` and no
/// doubled separators regardless of how `root` and `section` are written.
///
/// ```
/// use dconf_core::path::store_key;
///
/// assert_eq!(store_key("/", "org/gnome", "k"), "/org/gnome/k");
/// assert_eq!(store_key("/the/root/", "a", "k"), "/the/root/a/k");
/// assert_eq!(store_key("/the/root", "/", "k"), "/the/root/k");
/// ```
pub fn store_key(root: &str, section: &str, option: &str) -> String {
    let mut key = String::new();
    for part in [root, section, option] {
        for segment in part.split(SEPARATOR).filter(|s| !s.is_empty()) {
            key.push(SEPARATOR);
            key.push_str(segment);
        }
    }
    key
}
