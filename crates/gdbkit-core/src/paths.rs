//! Separator-agnostic path helpers.
//!
//! Host paths are plain strings that may come from either Windows (`\`) or
//! POSIX (`/`) tooling, so they are split on both separators and joined with
//! whichever separator the base path already uses.

/// Split a path into its non-empty components.
pub fn segments(path: &str) -> Vec<&str> {
    path.split(['\\', '/']).filter(|s| !s.is_empty()).collect()
}

/// Last component of a path, or the empty string.
pub fn last_segment(path: &str) -> &str {
    segments(path).last().copied().unwrap_or("")
}

/// The trailing `n` components, in original order.
pub fn tail_segments(path: &str, n: usize) -> Vec<&str> {
    let segs = segments(path);
    let start = segs.len().saturating_sub(n);
    segs[start..].to_vec()
}

/// Separator used by `path`: backslash if it contains one, otherwise slash.
pub fn separator_of(path: &str) -> char {
    if path.contains('\\') {
        '\\'
    } else {
        '/'
    }
}

/// Join `name` onto `base` using the base's separator style.
pub fn join(base: &str, name: &str) -> String {
    let sep = separator_of(base);
    if base.is_empty() {
        return name.to_string();
    }
    if base.ends_with(['\\', '/']) {
        format!("{}{}", base, name)
    } else {
        format!("{}{}{}", base, sep, name)
    }
}
