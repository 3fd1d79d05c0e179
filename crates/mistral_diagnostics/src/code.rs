//! Diagnostic codes and the codes the architecture core emits.
//!
//! A code is a category letter followed by a three-digit number. Codes are
//! stable: tools filter and count diagnostics by code, never by message text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which family a diagnostic code belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// `W`: a questionable setting was accepted.
    Warning,
    /// `A`: a report about what the architecture build did.
    Arch,
}

impl Category {
    /// The code prefix letter.
    pub const fn prefix(self) -> char {
        match self {
            Category::Warning => 'W',
            Category::Arch => 'A',
        }
    }
}

/// A stable diagnostic identifier such as `A001`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Family of the code.
    pub category: Category,
    /// Number within the family.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

/// `A001`: counts of bels, pins, routing nodes and edges after a build.
pub const BUILD_SUMMARY: DiagnosticCode = DiagnosticCode::new(Category::Arch, 1);

/// `A002`: which clock-buffer sub-indices were instantiated.
pub const CLKBUF_NARROWING: DiagnosticCode = DiagnosticCode::new(Category::Arch, 2);

/// `W101`: a clock-buffer sub-index not known to route on hardware is enabled.
pub const CLKBUF_SUB_INDEX_UNVERIFIED: DiagnosticCode = DiagnosticCode::new(Category::Warning, 101);
