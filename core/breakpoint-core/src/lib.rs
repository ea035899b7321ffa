//! Viewport breakpoint resolution.
//!
//! Maps a viewport width onto a set of named minimum-width thresholds
//! (`xs`, `sm`, `md`, ...) and derives per-breakpoint flags plus the fixed
//! mobile/tablet/desktop triad.
//!
//! ```
//! use breakpoint_core::{resolve, ThresholdSet};
//!
//! let state = resolve(&ThresholdSet::defaults(), 800);
//! assert_eq!(state.current, "md");
//! assert!(state.is_tablet);
//! assert_eq!(state.flag("md"), Some(true));
//! ```

pub mod config;
pub mod error;
pub mod resolver;
pub mod thresholds;
pub mod types;

pub use config::BreakpointConfig;
pub use error::{BreakpointError, Result};
pub use resolver::{flag_key, resolve};
pub use thresholds::ThresholdSet;
pub use types::{DeviceClass, ResolvedState};
