//! Reactive glue around [`breakpoint_core::resolve`].
//!
//! A [`WidthSource`] pushes viewport widths; a [`BreakpointHook`] turns each
//! one into a fresh [`ResolvedState`](breakpoint_core::ResolvedState) and hands
//! it to its sinks.
//!
//! ```
//! use breakpoint_core::BreakpointConfig;
//! use breakpoint_hook::{BreakpointHook, ManualWidthSource};
//!
//! let viewport = ManualWidthSource::with_width(400);
//! let hook = BreakpointHook::new(viewport.clone(), &BreakpointConfig::default()).unwrap();
//! assert!(hook.state().is_mobile);
//!
//! viewport.set_width(1280);
//! assert_eq!(hook.state().current, "xl");
//! ```

mod hook;
pub mod logging;
mod source;

pub use hook::{BreakpointHook, SinkId};
pub use source::{clamp_width, ManualWidthSource, SubscriptionId, WidthCallback, WidthSource};
