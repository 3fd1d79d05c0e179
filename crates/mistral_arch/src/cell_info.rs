//! Per-cell architecture data cached for packing and validity checks.
//!
//! Validity checks run in the placer's inner loop, so the nets a cell touches
//! are cached on the cell rather than looked up through the netlist each
//! time. A cell is classified once, when it is bound, as combinational,
//! flip-flop, or other; only the matching payload exists afterwards.
//!
//! The caches are plain data. Nothing invalidates them when the netlist
//! changes: whoever rewires a cell refreshes its record.

use crate::control::{ControlSig, FfControlSet};
use crate::ids::NetId;
use crate::primitives::{is_comb_cell, is_dff_cell};
use mistral_common::Ident;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of LUT input slots in an ALM half (`A` through `F` plus the
/// shared `E1`/`F1` slot).
pub const LUT_INPUT_SLOTS: usize = 7;

/// How a logical cell pin is driven.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum CellPinState {
    /// Driven by a routed signal.
    #[default]
    Sig,
    /// Tied to constant zero.
    Zero,
    /// Tied to constant one.
    One,
    /// Driven by the inverse of its routed signal.
    Inv,
}

/// Architecture data for one logical cell pin.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ArchPinInfo {
    /// Implicit constant or inversion applied to the pin.
    pub state: CellPinState,
    /// Physical bel pins this logical pin maps to, in order.
    pub bel_pins: Vec<Ident>,
}

/// Architecture data for one net.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ArchNetInfo {
    /// Whether the net is routed on the global clock network.
    pub is_global: bool,
}

/// Cached connectivity of a combinational cell (LUT, arithmetic or MLAB).
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct CombInfo {
    /// Nets on the LUT input slots; `None` for unused or constant inputs.
    pub lut_in: [Option<NetId>; LUT_INPUT_SLOTS],
    /// Net on the combinational output.
    pub comb_out: Option<NetId>,
    /// Number of LUT inputs the cell type has.
    pub lut_input_count: u32,
    /// Number of LUT inputs driven by a net.
    pub used_lut_input_count: u32,
    /// Size of the truth table in bits.
    pub lut_bits_count: u32,
    /// Inputs that may be shared across ALMs of one carry chain when
    /// checking LAB routeability.
    pub chain_shared_input_count: u32,
    /// Cell is an arithmetic (carry) cell.
    pub is_carry: bool,
    /// Cell uses the shared-arithmetic mode.
    pub is_shared: bool,
    /// Cell uses the extended-LUT mode.
    pub is_extended: bool,
    /// Cell starts a carry chain.
    pub carry_start: bool,
    /// Cell ends a carry chain.
    pub carry_end: bool,
    /// MLAB write-port group. Cells with compatible write ports share a
    /// group; `None` for cells that are not MLABs.
    pub mlab_group: Option<u32>,
    /// MLAB write clock.
    pub wclk: ControlSig,
    /// MLAB write enable.
    pub we: ControlSig,
}

impl CombInfo {
    /// Rewrites the cached LUT inputs and both input counts.
    ///
    /// `inputs` yields one entry per LUT input of the cell type, `None` for an
    /// input that is unconnected or tied to a constant.
    ///
    /// # Panics
    ///
    /// Panics if more than [`LUT_INPUT_SLOTS`] inputs are given.
    pub fn refresh_inputs<I>(&mut self, inputs: I)
    where
        I: IntoIterator<Item = Option<NetId>>,
    {
        self.lut_in = [None; LUT_INPUT_SLOTS];
        let mut count = 0;
        let mut used = 0;
        for (i, net) in inputs.into_iter().enumerate() {
            assert!(
                i < LUT_INPUT_SLOTS,
                "a LUT has at most {LUT_INPUT_SLOTS} inputs"
            );
            self.lut_in[i] = net;
            count += 1;
            if net.is_some() {
                used += 1;
            }
        }
        self.lut_input_count = count;
        self.used_lut_input_count = used;
    }

    /// Net on a LUT input slot; `None` for slots past [`LUT_INPUT_SLOTS`].
    pub fn input(&self, slot: usize) -> Option<NetId> {
        self.lut_in.get(slot).copied().flatten()
    }

    /// LUT inputs of the cell type that no net occupies.
    ///
    /// Zero when the counts were written inconsistently (more used inputs
    /// than the cell type has).
    pub fn free_input_slots(&self) -> u32 {
        self.lut_input_count.saturating_sub(self.used_lut_input_count)
    }
}

/// Cached connectivity of a flip-flop cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct FfInfo {
    /// Clock, enable and clear/load controls.
    pub ctrlset: FfControlSet,
    /// Synchronous load data.
    pub sdata: Option<NetId>,
    /// Data input.
    pub datain: Option<NetId>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
enum CellClass {
    Comb(CombInfo),
    Ff(FfInfo),
    Other,
}

/// Architecture record for one netlist cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArchCellInfo {
    class: CellClass,
    pin_data: HashMap<Ident, ArchPinInfo>,
}

impl ArchCellInfo {
    /// Creates the record for a cell of the given type. The classification
    /// is fixed for the lifetime of the record.
    pub fn classify(cell_type: Ident) -> Self {
        let class = if is_comb_cell(cell_type) {
            CellClass::Comb(CombInfo::default())
        } else if is_dff_cell(cell_type) {
            CellClass::Ff(FfInfo::default())
        } else {
            CellClass::Other
        };
        Self {
            class,
            pin_data: HashMap::new(),
        }
    }

    /// Returns `true` for combinational cells.
    pub fn is_comb(&self) -> bool {
        matches!(self.class, CellClass::Comb(_))
    }

    /// Returns `true` for flip-flop cells.
    pub fn is_ff(&self) -> bool {
        matches!(self.class, CellClass::Ff(_))
    }

    /// Combinational payload.
    ///
    /// # Panics
    ///
    /// Panics if the cell is not combinational.
    pub fn comb(&self) -> &CombInfo {
        match &self.class {
            CellClass::Comb(info) => info,
            other => panic!("combinational data requested for a {} cell", other.kind()),
        }
    }

    /// Mutable combinational payload.
    ///
    /// # Panics
    ///
    /// Panics if the cell is not combinational.
    pub fn comb_mut(&mut self) -> &mut CombInfo {
        match &mut self.class {
            CellClass::Comb(info) => info,
            other => panic!("combinational data requested for a {} cell", other.kind()),
        }
    }

    /// Flip-flop payload.
    ///
    /// # Panics
    ///
    /// Panics if the cell is not a flip-flop.
    pub fn ff(&self) -> &FfInfo {
        match &self.class {
            CellClass::Ff(info) => info,
            other => panic!("flip-flop data requested for a {} cell", other.kind()),
        }
    }

    /// Mutable flip-flop payload.
    ///
    /// # Panics
    ///
    /// Panics if the cell is not a flip-flop.
    pub fn ff_mut(&mut self) -> &mut FfInfo {
        match &mut self.class {
            CellClass::Ff(info) => info,
            other => panic!("flip-flop data requested for a {} cell", other.kind()),
        }
    }

    /// State of a logical pin; [`CellPinState::Sig`] when never set.
    pub fn pin_state(&self, pin: Ident) -> CellPinState {
        self.pin_data
            .get(&pin)
            .map_or(CellPinState::Sig, |info| info.state)
    }

    /// Sets the state of a logical pin.
    pub fn set_pin_state(&mut self, pin: Ident, state: CellPinState) {
        self.pin_info_mut(pin).state = state;
    }

    /// Pin data, if any was recorded.
    pub fn pin_info(&self, pin: Ident) -> Option<&ArchPinInfo> {
        self.pin_data.get(&pin)
    }

    /// Pin data, created empty on first access.
    pub fn pin_info_mut(&mut self, pin: Ident) -> &mut ArchPinInfo {
        self.pin_data.entry(pin).or_default()
    }
}

impl CellClass {
    fn kind(&self) -> &'static str {
        match self {
            CellClass::Comb(_) => "combinational",
            CellClass::Ff(_) => "flip-flop",
            CellClass::Other => "non-logic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constids::ConstId;

    fn net(raw: u32) -> NetId {
        NetId::from_raw(raw)
    }

    #[test]
    fn classification_follows_cell_type() {
        assert!(ArchCellInfo::classify(ConstId::MistralAlut6.ident()).is_comb());
        assert!(ArchCellInfo::classify(ConstId::MistralMlab.ident()).is_comb());
        assert!(ArchCellInfo::classify(ConstId::MistralFf.ident()).is_ff());
        let dsp = ArchCellInfo::classify(ConstId::CyclonevDsp.ident());
        assert!(!dsp.is_comb() && !dsp.is_ff());
    }

    #[test]
    fn comb_defaults() {
        let info = ArchCellInfo::classify(ConstId::MistralAlut4.ident());
        let comb = info.comb();
        assert_eq!(comb.mlab_group, None);
        assert_eq!(comb.lut_in, [None; LUT_INPUT_SLOTS]);
        assert!(!comb.wclk.connected());
    }

    #[test]
    fn three_of_six_inputs_used() {
        let mut info = ArchCellInfo::classify(ConstId::MistralAlut6.ident());
        info.comb_mut()
            .refresh_inputs([Some(net(1)), None, Some(net(2)), None, Some(net(3)), None]);
        let comb = info.comb();
        assert_eq!(comb.lut_input_count, 6);
        assert_eq!(comb.used_lut_input_count, 3);
        assert_eq!(comb.free_input_slots(), 3);
        assert_eq!(comb.input(2), Some(net(2)));
        assert_eq!(comb.input(6), None);
    }

    #[test]
    fn counts_set_directly() {
        let mut comb = CombInfo::default();
        comb.lut_input_count = 6;
        comb.used_lut_input_count = 3;
        assert_eq!(comb.free_input_slots(), 3);

        comb.lut_input_count = 3;
        comb.used_lut_input_count = 4;
        assert_eq!(comb.free_input_slots(), 0);
    }

    #[test]
    fn out_of_range_slot_is_empty() {
        let mut comb = CombInfo::default();
        comb.refresh_inputs((1..=7).map(|n| Some(net(n))));
        assert_eq!(comb.input(6), Some(net(7)));
        assert_eq!(comb.input(LUT_INPUT_SLOTS), None);
        assert_eq!(comb.input(usize::MAX), None);
    }

    #[test]
    #[should_panic(expected = "flip-flop data requested for a combinational cell")]
    fn comb_record_rejects_ff_access() {
        let mut info = ArchCellInfo::classify(ConstId::MistralAlut6.ident());
        info.comb_mut().refresh_inputs([Some(net(1)), Some(net(2)), Some(net(3)), None, None, None]);
        let _ = info.ff();
    }

    #[test]
    #[should_panic(expected = "combinational data requested for a flip-flop cell")]
    fn ff_record_rejects_comb_access() {
        let mut info = ArchCellInfo::classify(ConstId::MistralFf.ident());
        let _ = info.comb_mut();
    }

    #[test]
    #[should_panic(expected = "non-logic cell")]
    fn other_record_has_no_payload() {
        let info = ArchCellInfo::classify(ConstId::MistralClkena.ident());
        let _ = info.ff();
    }

    #[test]
    #[should_panic(expected = "at most 7 inputs")]
    fn too_many_inputs_panics() {
        let mut comb = CombInfo::default();
        comb.refresh_inputs(std::iter::repeat(None).take(8));
    }

    #[test]
    fn refresh_replaces_previous_inputs() {
        let mut comb = CombInfo::default();
        comb.refresh_inputs((1..=6).map(|n| Some(net(n))));
        assert_eq!(comb.free_input_slots(), 0);

        comb.refresh_inputs([Some(net(9)), None]);
        assert_eq!(comb.lut_input_count, 2);
        assert_eq!(comb.used_lut_input_count, 1);
        assert_eq!(comb.input(0), Some(net(9)));
        assert_eq!(comb.input(3), None);
    }

    #[test]
    fn pin_state_defaults_to_signal() {
        let mut info = ArchCellInfo::classify(ConstId::MistralFf.ident());
        let ena = ConstId::Ena.ident();
        assert_eq!(info.pin_state(ena), CellPinState::Sig);
        assert!(info.pin_info(ena).is_none());

        info.set_pin_state(ena, CellPinState::One);
        assert_eq!(info.pin_state(ena), CellPinState::One);
        assert_eq!(info.pin_state(ConstId::Clk.ident()), CellPinState::Sig);
    }

    #[test]
    fn pin_info_keeps_bel_pins_and_state_together() {
        let mut info = ArchCellInfo::classify(ConstId::MistralAlut2.ident());
        let a = ConstId::A.ident();
        info.pin_info_mut(a).bel_pins.push(ConstId::F.ident());
        info.set_pin_state(a, CellPinState::Inv);
        let pin = info.pin_info(a).unwrap();
        assert_eq!(pin.bel_pins, vec![ConstId::F.ident()]);
        assert_eq!(pin.state, CellPinState::Inv);
    }

    #[test]
    fn ff_payload_is_plain_data() {
        let mut info = ArchCellInfo::classify(ConstId::MistralFf.ident());
        let ff = info.ff_mut();
        ff.ctrlset.clk = ControlSig::new(net(4));
        ff.datain = Some(net(7));
        assert_eq!(info.ff().ctrlset.clk.net, Some(net(4)));
        assert_eq!(info.ff().sdata, None);
    }
}
