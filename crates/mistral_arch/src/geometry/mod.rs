//! The device-geometry seam.
//!
//! The physical port database of a Cyclone V die is large and lives outside
//! this crate. The architecture builder only needs to ask it a few questions:
//! how big the grid is, which hard blocks sit at a coordinate, which routing
//! node a block port is attached to, and which routing edges exist.
//! [`DeviceGeometry`] is that narrow interface; [`SyntheticGeometry`] is an
//! in-memory implementation for tests and tooling.

pub mod synthetic;

pub use synthetic::SyntheticGeometry;

use crate::delay::Delay;
use crate::ids::WireId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of hard block the device geometry places at a coordinate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum BlockType {
    /// DSP slice.
    Dsp,
    /// Horizontal clock mux hosting the clock buffers.
    CmuxHg,
    /// HPS MPU general-purpose interface.
    HpsMpuGeneralPurpose,
    /// Control block (oscillator and friends).
    Ctrl,
}

/// Port category within a block, as the device database names them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum PortType {
    /// DSP accumulate control.
    Accumulate,
    /// DSP asynchronous clear.
    Aclr,
    /// Clock input (DSP clocks, clock-buffer input).
    ClkIn,
    /// DSP operand data input.
    DataIn,
    /// DSP clock enable.
    Enable,
    /// DSP load-constant control.
    LoadConst,
    /// DSP negate control.
    Negate,
    /// DSP result output.
    Result,
    /// DSP subtract control.
    Sub,
    /// DSP inputs with no known function.
    UnkIn,
    /// Clock-buffer output.
    ClkOut,
    /// HPS general-purpose input.
    GpIn,
    /// HPS general-purpose output.
    GpOut,
    /// Oscillator enable.
    OscEna,
    /// Oscillator clock output.
    OscClkOut,
    /// Oscillator secondary clock output.
    OscClkOut1,
}

/// A fully-specified port lookup.
///
/// `block_index` selects one of several instances of a block at the same
/// coordinate (or one operand bank of a DSP); `port_index` selects a bit of a
/// port array. `None` means the block or port is not indexed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct PortQuery {
    /// Block kind.
    pub block: BlockType,
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Block instance or bank index.
    pub block_index: Option<u32>,
    /// Port category.
    pub port: PortType,
    /// Bit index within the port array.
    pub port_index: Option<u32>,
}

impl PortQuery {
    /// A query for an unindexed port on an unindexed block.
    pub fn new(block: BlockType, x: i32, y: i32, port: PortType) -> Self {
        Self {
            block,
            x,
            y,
            block_index: None,
            port,
            port_index: None,
        }
    }

    /// Sets the block instance index.
    pub fn block_index(mut self, index: u32) -> Self {
        self.block_index = Some(index);
        self
    }

    /// Sets the port array index.
    pub fn port_index(mut self, index: u32) -> Self {
        self.port_index = Some(index);
        self
    }
}

impl fmt::Display for PortQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.block)?;
        if let Some(bi) = self.block_index {
            write!(f, "[{bi}]")?;
        }
        write!(f, " at X{}Y{} port {:?}", self.x, self.y, self.port)?;
        if let Some(pi) = self.port_index {
            write!(f, "[{pi}]")?;
        }
        Ok(())
    }
}

/// Read-only view of the device port database.
///
/// Implementations must be deterministic: the same query always answers with
/// the same routing node, and distinct ports never share one.
pub trait DeviceGeometry {
    /// Number of columns in the grid.
    fn width(&self) -> i32;

    /// Number of rows in the grid.
    fn height(&self) -> i32;

    /// Hard blocks present at a coordinate, in a stable order.
    fn blocks_at(&self, x: i32, y: i32) -> Vec<BlockType>;

    /// Resolves a port to its routing node, or `None` if the device has no
    /// such port at that coordinate.
    fn port(&self, query: &PortQuery) -> Option<WireId>;

    /// Every routing edge of the fabric as `(source, destination)` pairs.
    fn routing_edges(&self) -> Vec<(WireId, WireId)> {
        Vec::new()
    }

    /// Intrinsic delay of a routing edge, when the database knows it.
    fn edge_delay(&self, _src: WireId, _dst: WireId) -> Option<Delay> {
        None
    }
}
