//! Named minimum-width thresholds.
//!
//! A [`ThresholdSet`] remembers the order names were supplied in. That order
//! only matters for breakpoints sharing a threshold value: the stable sort in
//! [`ThresholdSet::ordered`] keeps them in supply order.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::BreakpointConfig;
use crate::error::{BreakpointError, Result};
use crate::resolver::flag_key;

/// Fallback for the triad when the set has no `md` entry.
pub const MD_FALLBACK: u32 = 768;
/// Fallback for the triad when the set has no `lg` entry.
pub const LG_FALLBACK: u32 = 1024;

const DEFAULT_BREAKPOINTS: [(&str, u32); 6] = [
    ("xs", 0),
    ("sm", 576),
    ("md", 768),
    ("lg", 992),
    ("xl", 1200),
    ("xxl", 1400),
];

static DEFAULTS: Lazy<ThresholdSet> = Lazy::new(|| ThresholdSet {
    entries: DEFAULT_BREAKPOINTS
        .iter()
        .map(|(name, min)| ((*name).to_string(), *min))
        .collect(),
});

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L}\p{N}_-]+$").unwrap());

/// Names must be distinct after flag-key derivation: `md` and `Md` both map
/// to `isMd`.
fn collides(entries: &IndexMap<String, u32>, name: &str) -> bool {
    let key = flag_key(name);
    entries.keys().any(|existing| flag_key(existing) == key)
}

fn validate_name(name: &str) -> Result<()> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(BreakpointError::InvalidName(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdSet {
    entries: IndexMap<String, u32>,
}

impl ThresholdSet {
    /// Builds a set from explicit entries, without merging defaults.
    ///
    /// Entries may be in any order and may share threshold values. Fails on
    /// an empty input, a repeated name (including names that only differ in
    /// the case of their first letter), or a name with characters other than letters,
    /// digits, `_` and `-`.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut map = IndexMap::new();
        for (name, min) in entries {
            let name = name.into();
            validate_name(&name)?;
            if collides(&map, &name) {
                return Err(BreakpointError::DuplicateName(name));
            }
            map.insert(name, min);
        }

        if map.is_empty() {
            return Err(BreakpointError::EmptyThresholds);
        }

        tracing::debug!(breakpoints = map.len(), "Built threshold set");
        Ok(ThresholdSet { entries: map })
    }

    /// xs=0, sm=576, md=768, lg=992, xl=1200, xxl=1400.
    pub fn defaults() -> Self {
        DEFAULTS.clone()
    }

    /// Shallow-merges `config` over the defaults.
    ///
    /// An override for a default name replaces its value in place; new names
    /// are appended in the order the config lists them.
    pub fn with_overrides(config: &BreakpointConfig) -> Result<Self> {
        let mut set = Self::defaults();
        for (name, min) in config.iter() {
            validate_name(name)?;
            if !set.entries.contains_key(name) && collides(&set.entries, name) {
                return Err(BreakpointError::DuplicateName(name.to_string()));
            }
            set.entries.insert(name.to_string(), min);
        }

        tracing::debug!(
            breakpoints = set.entries.len(),
            overrides = config.len(),
            "Merged breakpoint overrides over defaults"
        );
        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in supply order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, min)| (name.as_str(), *min))
    }

    /// Entries sorted ascending by threshold; ties keep supply order.
    pub fn ordered(&self) -> Vec<(&str, u32)> {
        let mut ordered: Vec<(&str, u32)> = self.iter().collect();
        ordered.sort_by_key(|&(_, min)| min);
        ordered
    }

    pub(crate) fn md_value(&self) -> u32 {
        self.get("md").unwrap_or(MD_FALLBACK)
    }

    pub(crate) fn lg_value(&self) -> u32 {
        self.get("lg").unwrap_or(LG_FALLBACK)
    }
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self::defaults()
    }
}
