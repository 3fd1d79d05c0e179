//! Structured diagnostics for architecture construction.
//!
//! Builders and policy loaders report what they did (and what they chose not
//! to model) as [`Diagnostic`] values with a severity, a code, and an optional
//! device grid location. The thread-safe [`DiagnosticSink`] collects them for
//! the enclosing tool to render.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod sink;

pub use code::{
    Category, DiagnosticCode, BUILD_SUMMARY, CLKBUF_NARROWING, CLKBUF_SUB_INDEX_UNVERIFIED,
};
pub use diagnostic::{Diagnostic, Severity};
pub use sink::DiagnosticSink;
