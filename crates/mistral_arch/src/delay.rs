//! Additive timing values attached to routing resources.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A propagation delay in picoseconds.
///
/// This layer does not model rise/fall or process corners separately: every
/// corner accessor returns the same scalar. The representation is integral and
/// addition wraps on overflow, so composition is exactly associative and
/// commutative over every value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Delay(i32);

impl Delay {
    /// The additive identity.
    pub const ZERO: Self = Self(0);

    /// Creates a delay from picoseconds.
    pub const fn from_ps(ps: i32) -> Self {
        Self(ps)
    }

    /// Returns the delay in picoseconds.
    pub const fn as_ps(self) -> i32 {
        self.0
    }

    /// Fast-corner delay.
    pub fn min_delay(self) -> Self {
        self
    }

    /// Slow-corner delay.
    pub fn max_delay(self) -> Self {
        self
    }

    /// Fast-corner rising-edge delay.
    pub fn min_rise_delay(self) -> Self {
        self
    }

    /// Slow-corner rising-edge delay.
    pub fn max_rise_delay(self) -> Self {
        self
    }

    /// Fast-corner falling-edge delay.
    pub fn min_fall_delay(self) -> Self {
        self
    }

    /// Slow-corner falling-edge delay.
    pub fn max_fall_delay(self) -> Self {
        self
    }
}

impl Add for Delay {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.wrapping_add(other.0))
    }
}

impl AddAssign for Delay {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.wrapping_add(other.0);
    }
}

impl Sum for Delay {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
