//! The routing-resource graph and bel catalog.
//!
//! An [`ArchModel`] is filled in once by the primitive builder and is
//! read-only afterwards: every mutating method is crate-private, so code
//! outside this crate can only query it. It is `Send + Sync` and may be shared
//! between any number of reader threads once built.

use crate::constids::{intern_const_ids, prime_interner};
use crate::delay::Delay;
use crate::ids::{BelId, PipId, WireId};
use mistral_common::{ContentHash, ContentHasher, Ident, Interner, Loc, MistralResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Signal direction of a bel pin.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PortDir {
    /// Driven from the routing fabric.
    In,
    /// Drives the routing fabric.
    Out,
}

impl PortDir {
    fn tag(self) -> u8 {
        match self {
            PortDir::In => 0,
            PortDir::Out => 1,
        }
    }
}

/// One pin of a bel and the routing node it is attached to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BelPinInfo {
    /// Pin name, e.g. `dataina[3]`.
    pub name: Ident,
    /// Signal direction.
    pub dir: PortDir,
    /// Routing node the pin connects to. Never [`WireId::INVALID`].
    pub wire: WireId,
}

/// A bel: one placement site for one primitive instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BelInfo {
    /// Instance name, unique within its tile.
    pub name: Ident,
    /// Bel type, which is also its placement bucket.
    pub bel_type: Ident,
    /// Grid position; `z` is the creation order within the tile.
    pub loc: Loc,
    /// Sub-index of the hardware block this bel was instantiated from.
    pub block_index: Option<u32>,
    pins: Vec<BelPinInfo>,
    pin_lookup: HashMap<Ident, usize>,
}

impl BelInfo {
    /// Pins in creation order.
    pub fn pins(&self) -> &[BelPinInfo] {
        &self.pins
    }

    /// Looks up a pin by name.
    pub fn pin(&self, name: Ident) -> Option<&BelPinInfo> {
        self.pin_lookup.get(&name).map(|&i| &self.pins[i])
    }
}

/// A reference from a routing node back to a bel pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BelPin {
    /// The bel.
    pub bel: BelId,
    /// The pin name on that bel.
    pub pin: Ident,
}

/// Connectivity of one routing node.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WireInfo {
    /// Bel pins attached to this node.
    pub bel_pins: Vec<BelPin>,
    /// Edges leaving this node.
    pub downhill: Vec<PipId>,
    /// Edges entering this node.
    pub uphill: Vec<PipId>,
}

/// Data attached to a routing edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipInfo {
    /// Intrinsic delay of the edge.
    pub delay: Delay,
}

/// The architecture model: bels, bel pins, routing nodes, and routing edges.
#[derive(Debug)]
pub struct ArchModel {
    interner: Interner,
    bels: Vec<BelInfo>,
    bels_by_tile: BTreeMap<(i32, i32), Vec<BelId>>,
    bel_by_name: HashMap<(i32, i32, Ident), BelId>,
    wires: BTreeMap<WireId, WireInfo>,
    pips: BTreeMap<PipId, PipInfo>,
}

impl ArchModel {
    /// Creates an empty model with a fresh interner primed with the constant ids.
    pub fn new() -> Self {
        let interner = Interner::new();
        intern_const_ids(&interner);
        Self::from_primed(interner)
    }

    /// Creates an empty model around an existing interner.
    ///
    /// # Errors
    ///
    /// Fails if the interner already holds names that displace the constant ids.
    pub fn with_interner(interner: Interner) -> MistralResult<Self> {
        prime_interner(&interner)?;
        Ok(Self::from_primed(interner))
    }

    fn from_primed(interner: Interner) -> Self {
        Self {
            interner,
            bels: Vec::new(),
            bels_by_tile: BTreeMap::new(),
            bel_by_name: HashMap::new(),
            wires: BTreeMap::new(),
            pips: BTreeMap::new(),
        }
    }

    /// The interner holding every bel, pin and cell-type name of this model.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Interns a name.
    pub fn id(&self, name: &str) -> Ident {
        self.interner.get_or_intern(name)
    }

    /// Interns an array element name such as `result[5]`.
    pub fn indexed_id(&self, base: &str, index: u32) -> Ident {
        self.interner.get_or_intern_indexed(base, index)
    }

    /// Resolves a name.
    pub fn name(&self, ident: Ident) -> &str {
        self.interner.resolve(ident)
    }

    /// Registers a bel at a tile and returns its new handle.
    ///
    /// # Panics
    ///
    /// Panics if a bel with the same name already exists in the tile.
    pub(crate) fn add_bel(&mut self, x: i32, y: i32, name: Ident, bel_type: Ident) -> BelId {
        let id = BelId::from_raw(self.bels.len() as u32);
        if let Some(existing) = self.bel_by_name.insert((x, y, name), id) {
            panic!(
                "duplicate bel {} at X{x}Y{y} (already registered as bel {existing})",
                self.name(name)
            );
        }
        let tile = self.bels_by_tile.entry((x, y)).or_default();
        let z = tile.len() as i32;
        tile.push(id);
        self.bels.push(BelInfo {
            name,
            bel_type,
            loc: Loc::new(x, y, z),
            block_index: None,
            pins: Vec::new(),
            pin_lookup: HashMap::new(),
        });
        id
    }

    pub(crate) fn set_block_index(&mut self, bel: BelId, index: u32) {
        self.bels[bel.as_raw() as usize].block_index = Some(index);
    }

    /// Binds a bel pin to a routing node.
    ///
    /// # Panics
    ///
    /// Panics if the wire is invalid or the bel already has a pin of that name.
    pub(crate) fn add_bel_pin(&mut self, bel: BelId, pin: Ident, dir: PortDir, wire: WireId) {
        assert!(
            wire.is_valid(),
            "bel pin {} bound to the invalid routing node",
            self.name(pin)
        );
        let info = &mut self.bels[bel.as_raw() as usize];
        if info.pin_lookup.insert(pin, info.pins.len()).is_some() {
            panic!(
                "duplicate pin {} on bel {}",
                self.interner.resolve(pin),
                self.interner.resolve(info.name)
            );
        }
        info.pins.push(BelPinInfo {
            name: pin,
            dir,
            wire,
        });
        self.wires.entry(wire).or_default().bel_pins.push(BelPin { bel, pin });
    }

    /// Registers a routing edge.
    ///
    /// # Panics
    ///
    /// Panics if the edge already exists or either endpoint is invalid.
    pub(crate) fn add_pip(&mut self, src: WireId, dst: WireId, delay: Delay) -> PipId {
        assert!(
            src.is_valid() && dst.is_valid(),
            "routing edge {src}->{dst} touches the invalid routing node"
        );
        let pip = PipId::new(src, dst);
        if self.pips.insert(pip, PipInfo { delay }).is_some() {
            panic!("duplicate routing edge {pip}");
        }
        self.wires.entry(src).or_default().downhill.push(pip);
        self.wires.entry(dst).or_default().uphill.push(pip);
        pip
    }

    /// Returns a bel.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this model.
    pub fn bel(&self, bel: BelId) -> &BelInfo {
        &self.bels[bel.as_raw() as usize]
    }

    /// All bels in handle order.
    pub fn bels(&self) -> impl Iterator<Item = (BelId, &BelInfo)> + '_ {
        self.bels
            .iter()
            .enumerate()
            .map(|(i, info)| (BelId::from_raw(i as u32), info))
    }

    /// Number of bels.
    pub fn bel_count(&self) -> usize {
        self.bels.len()
    }

    /// Bels of one tile, in `z` order.
    pub fn bels_at(&self, x: i32, y: i32) -> &[BelId] {
        self.bels_by_tile
            .get(&(x, y))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Finds a bel by tile and name.
    pub fn bel_by_name(&self, x: i32, y: i32, name: Ident) -> Option<BelId> {
        self.bel_by_name.get(&(x, y, name)).copied()
    }

    /// Pins of a bel in creation order.
    pub fn bel_pins(&self, bel: BelId) -> &[BelPinInfo] {
        self.bel(bel).pins()
    }

    /// The routing node a bel pin is attached to.
    pub fn bel_pin_wire(&self, bel: BelId, pin: Ident) -> Option<WireId> {
        self.bel(bel).pin(pin).map(|p| p.wire)
    }

    /// Total number of bel pins across all bels.
    pub fn bel_pin_count(&self) -> usize {
        self.bels.iter().map(|b| b.pins.len()).sum()
    }

    /// Bel pins attached to a routing node.
    pub fn wire_bel_pins(&self, wire: WireId) -> &[BelPin] {
        self.wires
            .get(&wire)
            .map(|w| w.bel_pins.as_slice())
            .unwrap_or(&[])
    }

    /// All routing nodes known to the model, in ascending order.
    pub fn wires(&self) -> impl Iterator<Item = WireId> + '_ {
        self.wires.keys().copied()
    }

    /// Number of routing nodes known to the model.
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Intrinsic delay of a routing node. Nodes carry no delay at this layer.
    pub fn wire_delay(&self, _wire: WireId) -> Delay {
        Delay::ZERO
    }

    /// Returns a routing edge, if it exists.
    pub fn pip(&self, pip: PipId) -> Option<&PipInfo> {
        self.pips.get(&pip)
    }

    /// All routing edges, in ascending key order.
    pub fn pips(&self) -> impl Iterator<Item = PipId> + '_ {
        self.pips.keys().copied()
    }

    /// Number of routing edges.
    pub fn pip_count(&self) -> usize {
        self.pips.len()
    }

    /// Edges leaving a routing node.
    pub fn pips_downhill(&self, wire: WireId) -> &[PipId] {
        self.wires
            .get(&wire)
            .map(|w| w.downhill.as_slice())
            .unwrap_or(&[])
    }

    /// Edges entering a routing node.
    pub fn pips_uphill(&self, wire: WireId) -> &[PipId] {
        self.wires
            .get(&wire)
            .map(|w| w.uphill.as_slice())
            .unwrap_or(&[])
    }

    /// Delay of a routing edge.
    ///
    /// # Panics
    ///
    /// Panics if the edge is not part of the model.
    pub fn pip_delay(&self, pip: PipId) -> Delay {
        match self.pips.get(&pip) {
            Some(info) => info.delay,
            None => panic!("unknown routing edge {pip}"),
        }
    }

    /// Hashes every bel, bel pin binding and routing edge.
    ///
    /// Names are hashed as strings, so two models built over the same
    /// geometry fingerprint equal even if their interners differ.
    pub fn binding_fingerprint(&self) -> ContentHash {
        let mut hasher = ContentHasher::new();
        for bel in &self.bels {
            hasher
                .write_i32(bel.loc.x)
                .write_i32(bel.loc.y)
                .write_i32(bel.loc.z)
                .write_str(self.name(bel.name))
                .write_str(self.name(bel.bel_type))
                .write_u32(bel.block_index.unwrap_or(u32::MAX));
            for pin in &bel.pins {
                hasher
                    .write_str(self.name(pin.name))
                    .write_bytes(&[pin.dir.tag()])
                    .write_u32(pin.wire.as_raw());
            }
        }
        for (pip, info) in &self.pips {
            hasher.write_u64(pip.as_raw()).write_i32(info.delay.as_ps());
        }
        hasher.finish()
    }
}

impl Default for ArchModel {
    fn default() -> Self {
        Self::new()
    }
}
