//! Breakpoint override configuration.
//!
//! An override is a partial `name -> min width` map, merged over the defaults
//! by [`ThresholdSet::with_overrides`](crate::ThresholdSet::with_overrides).
//! On disk it is a flat JSON object:
//!
//! ```json
//! { "md": 800, "xxxl": 1920 }
//! ```
//!
//! [`load_config`] is strict. [`load_config_or_default`] is best-effort:
//! missing, empty, or corrupt files yield an empty override so the defaults
//! still apply.

use fs_err as fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointConfig {
    overrides: IndexMap<String, u32>,
}

impl BreakpointConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one override.
    pub fn with(mut self, name: impl Into<String>, min_width: u32) -> Self {
        self.overrides.insert(name.into(), min_width);
        self
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.overrides.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.overrides.iter().map(|(name, min)| (name.as_str(), *min))
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for BreakpointConfig {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        BreakpointConfig {
            overrides: iter
                .into_iter()
                .map(|(name, min)| (name.into(), min))
                .collect(),
        }
    }
}

pub fn parse_config(content: &str) -> Result<BreakpointConfig> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_config(path: &Path) -> Result<BreakpointConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn load_config_or_default(path: &Path) -> BreakpointConfig {
    if !path.exists() {
        return BreakpointConfig::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read breakpoint config, using defaults");
            return BreakpointConfig::default();
        }
    };

    if content.trim().is_empty() {
        tracing::warn!(path = %path.display(), "Empty breakpoint config, using defaults");
        return BreakpointConfig::default();
    }

    match parse_config(&content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to parse breakpoint config, using defaults"
            );
            BreakpointConfig::default()
        }
    }
}
