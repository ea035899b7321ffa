use indexmap::IndexMap;

use crate::thresholds::ThresholdSet;
use crate::types::ResolvedState;

/// `"md"` → `"isMd"`. Only the first character is case-mapped.
pub fn flag_key(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("is{}{}", first.to_uppercase(), chars.as_str()),
        None => "is".to_string(),
    }
}

/// `[min, upper)`, with no upper bound for the last interval.
fn interval_contains(width: u32, min: u32, upper: Option<u32>) -> bool {
    width >= min && upper.map_or(true, |upper| width < upper)
}

pub fn resolve(thresholds: &ThresholdSet, width: u32) -> ResolvedState {
    let ordered = thresholds.ordered();

    let mut current: Option<&str> = None;
    let mut flags = IndexMap::with_capacity(ordered.len());
    for (i, &(name, min)) in ordered.iter().enumerate() {
        let upper = ordered.get(i + 1).map(|&(_, next)| next);
        let active = interval_contains(width, min, upper);
        if active && current.is_none() {
            current = Some(name);
        }
        flags.insert(flag_key(name), active);
    }

    // Below the smallest threshold the smallest breakpoint still reports as current.
    let current = current
        .or_else(|| ordered.first().map(|&(name, _)| name))
        .unwrap_or_default()
        .to_string();

    let md = thresholds.md_value();
    let lg = thresholds.lg_value();

    ResolvedState {
        width,
        current,
        flags,
        is_mobile: width < md,
        is_tablet: width >= md && width < lg,
        is_desktop: width >= lg,
    }
}
