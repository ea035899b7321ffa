//! Resolution output.
//!
//! `ResolvedState` serializes to the flat object shape UI code expects:
//!
//! ```json
//! {
//!   "width": 800,
//!   "current": "md",
//!   "isMobile": false,
//!   "isTablet": true,
//!   "isDesktop": false,
//!   "isXs": false,
//!   "isSm": false,
//!   "isMd": true,
//!   "isLg": false,
//!   "isXl": false,
//!   "isXxl": false
//! }
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::resolver::flag_key;

/// The mobile/tablet/desktop triad as a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedState {
    pub width: u32,
    /// Name of the matched breakpoint. Below the smallest threshold this is
    /// still the smallest breakpoint's name; see [`Self::is_below_range`].
    pub current: String,
    /// `isXs`-style key → whether that breakpoint's interval holds `width`,
    /// ascending by threshold.
    pub flags: IndexMap<String, bool>,
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_desktop: bool,
}

impl ResolvedState {
    /// Flag for a breakpoint by name (`"md"`), not by key.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flag_by_key(&flag_key(name))
    }

    pub fn flag_by_key(&self, key: &str) -> Option<bool> {
        self.flags.get(key).copied()
    }

    /// True when `width` sits below every threshold, so no interval matched
    /// and `current` is only the fallback.
    pub fn is_below_range(&self) -> bool {
        !self.flags.values().any(|active| *active)
    }

    pub fn device_class(&self) -> DeviceClass {
        if self.is_mobile {
            DeviceClass::Mobile
        } else if self.is_tablet {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }
}

impl Serialize for ResolvedState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5 + self.flags.len()))?;
        map.serialize_entry("width", &self.width)?;
        map.serialize_entry("current", &self.current)?;
        map.serialize_entry("isMobile", &self.is_mobile)?;
        map.serialize_entry("isTablet", &self.is_tablet)?;
        map.serialize_entry("isDesktop", &self.is_desktop)?;
        for (key, active) in &self.flags {
            map.serialize_entry(key, active)?;
        }
        map.end()
    }
}
