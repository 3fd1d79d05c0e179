//! Opaque handles for architecture resources and netlist entities.
//!
//! [`BelId`] names a placement site and is allocated by the architecture
//! model. [`WireId`] names a routing node and is a foreign key handed out by
//! the device geometry. [`PipId`] names a routing edge by packing its two
//! endpoint wires into one `u64`. [`CellId`] and [`NetId`] are handles into
//! the netlist, which this crate references but never owns.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable handle for a bel (placement site of one primitive instance).
    BelId
);

define_id!(
    /// Opaque, copyable handle for a routing node, as numbered by the device geometry.
    WireId
);

define_id!(
    /// Handle for a netlist cell.
    CellId
);

define_id!(
    /// Handle for a netlist net.
    NetId
);

impl WireId {
    /// The "no routing node" value. The device geometry never hands it out.
    pub const INVALID: WireId = WireId(0);

    /// Returns `true` unless this is [`WireId::INVALID`].
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Opaque handle for a routing edge (pip) between two routing nodes.
///
/// Bit layout, stable for serialization: bits 63..32 hold the source
/// [`WireId`], bits 31..0 hold the destination [`WireId`]. An edge is fully
/// determined by its endpoints, and decoding never needs a lookup.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipId(u64);

impl PipId {
    /// Packs a source and destination wire into an edge key.
    pub fn new(src: WireId, dst: WireId) -> Self {
        Self(((src.as_raw() as u64) << 32) | dst.as_raw() as u64)
    }

    /// Returns the source wire.
    pub fn src(self) -> WireId {
        WireId::from_raw((self.0 >> 32) as u32)
    }

    /// Returns the destination wire.
    pub fn dst(self) -> WireId {
        WireId::from_raw(self.0 as u32)
    }

    /// Creates a pip ID from its raw packed value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw packed value.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.src(), self.dst())
    }
}
