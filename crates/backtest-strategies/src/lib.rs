//! Strategy implementations.
//!
//! This crate provides reference implementations of the strategy contract:
//! - Null (never acts)
//! - Scripted (replays a fixed schedule)

mod null;
mod registry;
mod scripted;

pub use null::NullStrategy;
pub use registry::{StrategyInfo, StrategyRegistry};
pub use scripted::{ScriptedConfig, ScriptedStrategy};
