//! Shared foundational types for the Mistral architecture core.
//!
//! This crate provides interned identifiers, device grid locations, content
//! hashing for binding fingerprints, and the internal error type.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod loc;
pub mod result;

pub use hash::{ContentHash, ContentHasher};
pub use ident::{Ident, Interner};
pub use loc::Loc;
pub use result::{InternalError, MistralResult};
