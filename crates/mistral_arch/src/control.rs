//! Flip-flop control signals and control sets.
//!
//! Flip-flops packed into the same LAB half share their clock, enable and
//! clear/load controls. Two flip-flops may share only if every control signal
//! is identical, including its inversion. Disconnected signals get no
//! wildcard treatment: a disconnected clock only matches another disconnected
//! clock.

use crate::ids::NetId;
use serde::{Deserialize, Serialize};

/// One control input of a flip-flop: the driving net, if any, and whether it
/// is inverted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct ControlSig {
    /// Driving net. Owned by the netlist.
    pub net: Option<NetId>,
    /// Whether the signal is used inverted.
    pub inverted: bool,
}

impl ControlSig {
    /// A non-inverted signal driven by `net`.
    pub fn new(net: NetId) -> Self {
        Self {
            net: Some(net),
            inverted: false,
        }
    }

    /// A signal driven by `net` with explicit polarity.
    pub fn with_polarity(net: Option<NetId>, inverted: bool) -> Self {
        Self { net, inverted }
    }

    /// A disconnected, non-inverted signal.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Returns `true` if a net drives this signal.
    pub fn connected(&self) -> bool {
        self.net.is_some()
    }
}

/// The full set of control signals of a flip-flop.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct FfControlSet {
    /// Clock.
    pub clk: ControlSig,
    /// Clock enable.
    pub ena: ControlSig,
    /// Asynchronous clear.
    pub aclr: ControlSig,
    /// Synchronous clear.
    pub sclr: ControlSig,
    /// Synchronous load.
    pub sload: ControlSig,
}

impl FfControlSet {
    /// Returns `true` if flip-flops with these two control sets may share
    /// control routing. This is exact equality.
    pub fn can_share(&self, other: &Self) -> bool {
        self == other
    }
}
