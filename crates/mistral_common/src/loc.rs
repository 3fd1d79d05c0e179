//! Device grid locations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the device grid.
///
/// `x` and `y` address a tile; `z` orders the bels created inside that tile.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Loc {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Index of the bel within its tile.
    pub z: i32,
}

impl Loc {
    /// Creates a location.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the tile coordinate, dropping `z`.
    pub fn tile(self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{}Y{}/{}", self.x, self.y, self.z)
    }
}
