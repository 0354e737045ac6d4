//! Path-derived naming for imported layouts and maps
//!
//! An imported layout is renamed to `"<original> (<parent>--<file>)"`. Maps
//! inside it get the same group, plus whatever disambiguator the host tacked
//! onto the layout name when it collided with an existing one.
//!
//! A name is read with the grammar
//!
//! ```text
//! name          := base [ "(" group ")" ] [ disambiguator ]
//! disambiguator := digit+
//! ```
//!
//! where the group is the last parenthesised run in the name.

use serde::{Deserialize, Serialize};

use crate::models::LEGACY_EXTENSION;
use crate::paths;

/// Separator placed between the two path segments of a group
pub const GROUP_JOINER: &str = "--";

/// How the tail of an existing layout name is carried onto map names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TailPolicy {
    /// Everything after the last `)` unless the name ends in `.<ext>)`.
    /// A name without any `)` carries the whole name.
    #[default]
    Legacy,
    /// Only a digit-only disambiguator following the last group
    Grammar,
}

/// A name split according to the naming grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedName<'a> {
    pub base: &'a str,
    pub group: Option<&'a str>,
    pub disambiguator: Option<&'a str>,
}

/// Split `name` into base, last group and trailing disambiguator.
pub fn parse_name(name: &str) -> ParsedName<'_> {
    let Some(close) = name.rfind(')') else {
        return ParsedName { base: name, group: None, disambiguator: None };
    };
    let Some(open) = name[..close].rfind('(') else {
        return ParsedName { base: name, group: None, disambiguator: None };
    };

    let trailing = &name[close + 1..];
    let disambiguator = (!trailing.is_empty() && trailing.bytes().all(|b| b.is_ascii_digit()))
        .then_some(trailing);

    ParsedName {
        base: name[..open].trim_end(),
        group: Some(&name[open + 1..close]),
        disambiguator,
    }
}

/// Builds `(parent--file)` suffixes for imported layouts and maps
#[derive(Debug, Clone)]
pub struct SuffixDeriver {
    extension: String,
    policy: TailPolicy,
}

impl Default for SuffixDeriver {
    fn default() -> Self {
        Self::new(LEGACY_EXTENSION, TailPolicy::Legacy)
    }
}

impl SuffixDeriver {
    pub fn new(extension: impl Into<String>, policy: TailPolicy) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_string(),
            policy,
        }
    }

    pub fn policy(&self) -> TailPolicy {
        self.policy
    }

    /// `(parent--file)` for `path`, followed by the tail of `existing`.
    ///
    /// A path with a single segment yields `(file)`.
    pub fn derive(&self, path: &str, existing: Option<&str>) -> String {
        let joined = paths::tail_segments(path, 2).join(GROUP_JOINER);
        let tail = existing.map(|name| self.tail(name)).unwrap_or("");
        format!("({}){}", joined, tail)
    }

    /// The part of an existing name that is carried onto derived names
    pub fn tail<'a>(&self, existing: &'a str) -> &'a str {
        match self.policy {
            TailPolicy::Legacy => {
                let terminal = format!(".{})", self.extension);
                if existing.ends_with(&terminal) {
                    ""
                } else {
                    existing.rsplit(')').next().unwrap_or("")
                }
            }
            TailPolicy::Grammar => parse_name(existing).disambiguator.unwrap_or(""),
        }
    }

    /// `original + " " + suffix`
    pub fn rename(&self, original: &str, path: &str, existing: Option<&str>) -> String {
        format!("{} {}", original, self.derive(path, existing))
    }
}

/// Suffix for `path` with the default extension and legacy tail rule
pub fn derive_suffix(path: &str, existing: Option<&str>) -> String {
    SuffixDeriver::default().derive(path, existing)
}
