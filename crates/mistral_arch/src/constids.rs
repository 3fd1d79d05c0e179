//! Closed table of names the architecture refers to by constant.
//!
//! The table is generated by [`const_ids!`] so that each name exists exactly
//! once, as both an enum variant and a string. Interning the table in
//! declaration order into a fresh [`Interner`] makes `ConstId as u32` equal to
//! the [`Ident`] the interner hands out, so constant names compare against
//! runtime-interned names without any lookup.

use mistral_common::{Ident, InternalError, Interner, MistralResult};

macro_rules! const_ids {
    ($($variant:ident => $name:literal,)*) => {
        /// A name known to the architecture at compile time.
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[repr(u32)]
        pub enum ConstId {
            /// The empty name. Always interned first.
            None,
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl ConstId {
            /// Every constant, in interning order.
            pub const ALL: &'static [ConstId] = &[ConstId::None, $(ConstId::$variant,)*];

            /// Returns the string this constant stands for.
            pub fn as_str(self) -> &'static str {
                match self {
                    ConstId::None => "",
                    $(ConstId::$variant => $name,)*
                }
            }

            /// Finds the constant for a string, if there is one.
            pub fn lookup(name: &str) -> Option<ConstId> {
                match name {
                    "" => Some(ConstId::None),
                    $($name => Some(ConstId::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

const_ids! {
    // bel types and names
    CyclonevDsp => "cyclonev_dsp",
    CyclonevHpsInterfaceMpuGeneralPurpose => "cyclonev_hps_interface_mpu_general_purpose",
    CyclonevOscillator => "cyclonev_oscillator",
    MistralClkena => "MISTRAL_CLKENA",
    MistralClkbuf => "MISTRAL_CLKBUF",

    // single bel pins
    Accumulate => "accumulate",
    Loadconst => "loadconst",
    Negate => "negate",
    Sub => "sub",
    Oscena => "oscena",
    Clkout => "clkout",
    Clkout1 => "clkout1",

    // cell types
    MistralAlut6 => "MISTRAL_ALUT6",
    MistralAlut5 => "MISTRAL_ALUT5",
    MistralAlut4 => "MISTRAL_ALUT4",
    MistralAlut3 => "MISTRAL_ALUT3",
    MistralAlut2 => "MISTRAL_ALUT2",
    MistralNot => "MISTRAL_NOT",
    MistralBuf => "MISTRAL_BUF",
    MistralAlutArith => "MISTRAL_ALUT_ARITH",
    MistralMlab => "MISTRAL_MLAB",
    MistralFf => "MISTRAL_FF",

    // cell pins
    A => "A",
    B => "B",
    C => "C",
    D => "D",
    E => "E",
    F => "F",
    Q => "Q",
    Ci => "CI",
    Co => "CO",
    Clk => "CLK",
    Ena => "ENA",
    Aclr => "ACLR",
    Sclr => "SCLR",
    Sload => "SLOAD",
    Sdata => "SDATA",
    Datain => "DATAIN",
    Wclk => "WCLK",
    We => "WE",
}

impl ConstId {
    /// Returns the identifier this constant has in a primed interner.
    pub fn ident(self) -> Ident {
        Ident::from_raw(self as u32)
    }

    /// Maps an identifier back to a constant, if it falls inside the table.
    pub fn from_ident(ident: Ident) -> Option<ConstId> {
        Self::ALL.get(ident.as_raw() as usize).copied()
    }
}

/// Interns the constant table in declaration order.
///
/// On a fresh interner this always yields `ConstId as u32 == Ident`.
pub(crate) fn intern_const_ids(interner: &Interner) {
    for id in ConstId::ALL {
        interner.get_or_intern(id.as_str());
    }
}

/// Interns the constant table and checks that every constant landed on its
/// own index.
///
/// Succeeds on a fresh interner and on one that was already primed. Fails if
/// unrelated names were interned first.
pub fn prime_interner(interner: &Interner) -> MistralResult<()> {
    for &id in ConstId::ALL {
        let got = interner.get_or_intern(id.as_str());
        if got != id.ident() {
            return Err(InternalError::new(format!(
                "constant id {:?} interned at {} instead of {}",
                id.as_str(),
                got.as_raw(),
                id as u32
            )));
        }
    }
    Ok(())
}
