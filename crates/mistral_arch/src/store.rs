//! Ownership of the per-cell and per-net architecture records.

use crate::cell_info::{ArchCellInfo, ArchNetInfo, CellPinState};
use crate::ids::{CellId, NetId};
use mistral_common::Ident;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Architecture records for the cells and nets of one netlist.
///
/// A record exists from [`bind`](Self::bind) until [`unbind`](Self::unbind).
/// Passes that mutate records take the store mutably, so at most one of them
/// runs at a time.
#[derive(Debug, Default)]
pub struct CellInfoStore {
    cells: HashMap<CellId, ArchCellInfo>,
    nets: HashMap<NetId, ArchNetInfo>,
}

impl CellInfoStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and classifies the record for a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell already has a record.
    pub fn bind(&mut self, cell: CellId, cell_type: Ident) -> &mut ArchCellInfo {
        match self.cells.entry(cell) {
            Entry::Occupied(_) => panic!("cell {cell} is already bound"),
            Entry::Vacant(slot) => slot.insert(ArchCellInfo::classify(cell_type)),
        }
    }

    /// Removes and returns the record for a cell.
    pub fn unbind(&mut self, cell: CellId) -> Option<ArchCellInfo> {
        self.cells.remove(&cell)
    }

    /// Returns the record for a cell.
    pub fn get(&self, cell: CellId) -> Option<&ArchCellInfo> {
        self.cells.get(&cell)
    }

    /// Returns the record for a cell mutably.
    pub fn get_mut(&mut self, cell: CellId) -> Option<&mut ArchCellInfo> {
        self.cells.get_mut(&cell)
    }

    /// Number of bound cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell is bound.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// State of a cell pin; [`CellPinState::Sig`] for unset pins and
    /// unbound cells.
    pub fn pin_state(&self, cell: CellId, pin: Ident) -> CellPinState {
        self.cells
            .get(&cell)
            .map_or(CellPinState::Sig, |info| info.pin_state(pin))
    }

    /// Marks a net as routed on the global clock network.
    pub fn mark_global(&mut self, net: NetId) {
        self.nets.entry(net).or_default().is_global = true;
    }

    /// Returns `true` if the net was marked global.
    pub fn is_global(&self, net: NetId) -> bool {
        self.net_info(net).is_global
    }

    /// Architecture data for a net; defaults for nets never touched.
    pub fn net_info(&self, net: NetId) -> ArchNetInfo {
        self.nets.get(&net).copied().unwrap_or_default()
    }

    /// Returns `true` if two flip-flops have identical control sets.
    ///
    /// # Panics
    ///
    /// Panics if either cell is unbound or not a flip-flop.
    pub fn ff_control_sets_match(&self, a: CellId, b: CellId) -> bool {
        let ff = |cell: CellId| match self.cells.get(&cell) {
            Some(info) => info.ff().ctrlset,
            None => panic!("cell {cell} is not bound"),
        };
        ff(a).can_share(&ff(b))
    }
}
