//! Signal and trade records.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Action;

/// A signal emitted by the signaler at one step.
///
/// Signals are advisory: they never move a position by themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signal {
    /// Signalled direction or exit
    pub action: Action,
    /// Step at which the signal was emitted
    pub step: usize,
}

impl Signal {
    pub fn new(action: Action, step: usize) -> Self {
        Self { action, step }
    }
}

/// Which strategy operation produced a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    Entry,
    Exit,
    Stop,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeKind::Entry => write!(f, "ENTRY"),
            TradeKind::Exit => write!(f, "EXIT"),
            TradeKind::Stop => write!(f, "STOP"),
        }
    }
}

/// An executed order. Always a full position: an entry opens one unit of
/// exposure and a sell closes all of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trade {
    /// Executed order
    pub order: Action,
    /// Step at which the order was executed
    pub step: usize,
    /// Operation that produced the order
    pub kind: TradeKind,
}

impl Trade {
    pub fn new(order: Action, step: usize, kind: TradeKind) -> Self {
        Self { order, step, kind }
    }
}
