//! Action tokens and the strategy operations that emit them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Action token returned by every strategy operation.
///
/// `None` is the explicit "no action" sentinel. It is never recorded and is
/// never confused with a failure, which travels as an `Err` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Buy long
    Long,
    /// Sell short
    Short,
    /// Close the open position
    Sell,
    /// No action this step
    #[default]
    None,
}

impl Action {
    /// Check if this is the "no action" sentinel.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }

    /// Check if this action opens a position.
    #[inline]
    pub fn is_entry(&self) -> bool {
        matches!(self, Action::Long | Action::Short)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Long => write!(f, "long"),
            Action::Short => write!(f, "short"),
            Action::Sell => write!(f, "sell"),
            Action::None => write!(f, "none"),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" => Ok(Action::Long),
            "short" => Ok(Action::Short),
            "sell" | "exit" => Ok(Action::Sell),
            "none" | "" => Ok(Action::None),
            other => Err(format!("Unknown action: {}", other)),
        }
    }
}

/// The four operations of the strategy contract, in the order the engine
/// calls them on every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Signaler,
    Entryer,
    Exiter,
    Stopper,
}

impl Operation {
    /// All operations in call order.
    pub const ALL: [Operation; 4] = [
        Operation::Signaler,
        Operation::Entryer,
        Operation::Exiter,
        Operation::Stopper,
    ];

    /// Check whether this operation may return the given action.
    pub fn permits(&self, action: Action) -> bool {
        match self {
            Operation::Signaler => true,
            Operation::Entryer => matches!(action, Action::Long | Action::Short | Action::None),
            Operation::Exiter | Operation::Stopper => {
                matches!(action, Action::Sell | Action::None)
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Signaler => write!(f, "signaler"),
            Operation::Entryer => write!(f, "entryer"),
            Operation::Exiter => write!(f, "exiter"),
            Operation::Stopper => write!(f, "stopper"),
        }
    }
}
