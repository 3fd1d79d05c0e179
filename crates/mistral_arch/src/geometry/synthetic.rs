//! In-memory device geometry.
//!
//! Blocks are placed explicitly; every port of a placed block resolves, except
//! ports removed with [`SyntheticGeometry::without_port`]. Routing nodes are
//! numbered from 1 in the order ports are first queried, so repeated queries
//! are stable and distinct ports never collide.

use super::{BlockType, DeviceGeometry, PortQuery};
use crate::delay::Delay;
use crate::ids::WireId;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug)]
struct WireAllocator {
    wires: HashMap<PortQuery, WireId>,
    next: u32,
}

/// A fake device database backed by plain maps.
#[derive(Debug)]
pub struct SyntheticGeometry {
    width: i32,
    height: i32,
    blocks: BTreeMap<(i32, i32), Vec<BlockType>>,
    absent: HashSet<PortQuery>,
    allocator: Mutex<WireAllocator>,
    edges: Vec<(WireId, WireId)>,
    delays: HashMap<(WireId, WireId), Delay>,
}

impl SyntheticGeometry {
    /// Creates an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            blocks: BTreeMap::new(),
            absent: HashSet::new(),
            allocator: Mutex::new(WireAllocator {
                wires: HashMap::new(),
                next: 1,
            }),
            edges: Vec::new(),
            delays: HashMap::new(),
        }
    }

    /// Places a block at a coordinate.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn with_block(mut self, x: i32, y: i32, block: BlockType) -> Self {
        assert!(
            self.in_grid(x, y),
            "X{x}Y{y} is outside the {}x{} grid",
            self.width,
            self.height
        );
        self.blocks.entry((x, y)).or_default().push(block);
        self
    }

    /// Makes a port of a placed block unresolvable.
    pub fn without_port(mut self, query: PortQuery) -> Self {
        self.absent.insert(query);
        self
    }

    /// Adds a routing edge, optionally with a known delay.
    pub fn add_edge(&mut self, src: WireId, dst: WireId, delay: Option<Delay>) {
        self.edges.push((src, dst));
        if let Some(delay) = delay {
            self.delays.insert((src, dst), delay);
        }
    }

    /// Number of distinct routing nodes handed out so far.
    pub fn wire_count(&self) -> usize {
        self.allocator.lock().unwrap().wires.len()
    }

    fn in_grid(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }
}

impl DeviceGeometry for SyntheticGeometry {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn blocks_at(&self, x: i32, y: i32) -> Vec<BlockType> {
        self.blocks.get(&(x, y)).cloned().unwrap_or_default()
    }

    fn port(&self, query: &PortQuery) -> Option<WireId> {
        let placed = self
            .blocks
            .get(&(query.x, query.y))
            .is_some_and(|blocks| blocks.contains(&query.block));
        if !placed || self.absent.contains(query) {
            return None;
        }
        let mut alloc = self.allocator.lock().unwrap();
        if let Some(&wire) = alloc.wires.get(query) {
            return Some(wire);
        }
        let wire = WireId::from_raw(alloc.next);
        alloc.next += 1;
        alloc.wires.insert(*query, wire);
        Some(wire)
    }

    fn routing_edges(&self) -> Vec<(WireId, WireId)> {
        self.edges.clone()
    }

    fn edge_delay(&self, src: WireId, dst: WireId) -> Option<Delay> {
        self.delays.get(&(src, dst)).copied()
    }
}
