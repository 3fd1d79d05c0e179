//! Architecture model for Intel Cyclone V devices.
//!
//! This crate turns a device's physical port database into the graph the
//! place-and-route engine works on: bels (placement sites) with their pins,
//! routing nodes, and routing edges. It also holds the per-cell records that
//! packing and placement cache for fast validity checks.
//!
//! # Usage
//!
//! ```
//! use mistral_arch::geometry::{BlockType, SyntheticGeometry};
//! use mistral_arch::{build_arch, BuildPolicy};
//! use mistral_diagnostics::DiagnosticSink;
//!
//! let geometry = SyntheticGeometry::new(4, 4).with_block(1, 1, BlockType::Dsp);
//! let sink = DiagnosticSink::new();
//! let model = build_arch(&geometry, &BuildPolicy::default(), &sink);
//! assert_eq!(model.bel_count(), 1);
//! assert_eq!(model.bel_pin_count(), 207);
//! ```
//!
//! # Architecture
//!
//! - [`geometry`] is the seam to the device database.
//! - [`primitives`] instantiates the fixed hard blocks into an [`ArchModel`].
//! - [`store`] owns the [`ArchCellInfo`] records of netlist cells.
//! - [`control`] defines flip-flop control sets and when they may share.

#![warn(missing_docs)]

pub mod cell_info;
pub mod constids;
pub mod control;
pub mod delay;
pub mod geometry;
pub mod ids;
pub mod model;
pub mod policy;
pub mod primitives;
pub mod store;

pub use cell_info::{
    ArchCellInfo, ArchNetInfo, ArchPinInfo, CellPinState, CombInfo, FfInfo, LUT_INPUT_SLOTS,
};
pub use constids::{prime_interner, ConstId};
pub use control::{ControlSig, FfControlSet};
pub use delay::Delay;
pub use geometry::{BlockType, DeviceGeometry, PortQuery, PortType};
pub use ids::{BelId, CellId, NetId, PipId, WireId};
pub use model::{ArchModel, BelInfo, BelPin, BelPinInfo, PipInfo, PortDir, WireInfo};
pub use policy::BuildPolicy;
pub use primitives::{build_arch, is_clkbuf_cell, is_comb_cell, is_dff_cell, ArchBuilder};
pub use store::CellInfoStore;
