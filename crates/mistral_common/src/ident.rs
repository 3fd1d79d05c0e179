//! Interned names of bels, pins and cell types.

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An interned name.
///
/// Comparing or hashing an `Ident` never touches the string, so pin-state and
/// cell-type checks in the placer's inner loop stay cheap. Values are dense
/// indices handed out by one [`Interner`] in interning order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

impl Ident {
    /// Wraps a raw index. Used by constant tables and deserialization.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// The raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `into_usize` and `try_from_usize` are inverse on every value that
// fits in a `u32`, and `try_from_usize` rejects the rest.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Self)
    }
}

/// Name table shared by the architecture model and its readers.
///
/// Backed by [`lasso::ThreadedRodeo`], so names can be interned through a
/// shared reference from any thread.
pub struct Interner {
    names: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            names: ThreadedRodeo::new(),
        }
    }

    /// Interns a name.
    pub fn get_or_intern(&self, name: &str) -> Ident {
        self.names.get_or_intern(name)
    }

    /// Interns an array element name such as `dataina[3]`.
    pub fn get_or_intern_indexed(&self, base: &str, index: u32) -> Ident {
        self.get_or_intern(&format!("{base}[{index}]"))
    }

    /// Looks a name up without interning it.
    pub fn get(&self, name: &str) -> Option<Ident> {
        self.names.get(name)
    }

    /// The string behind an identifier.
    ///
    /// # Panics
    ///
    /// Panics if `ident` did not come from this table.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.names.resolve(&ident)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no name was interned yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interner({} names)", self.len())
    }
}
