//! Collection point for diagnostics emitted during a build.

use crate::code::DiagnosticCode;
use crate::diagnostic::{Diagnostic, Severity};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Collects diagnostics from any thread.
///
/// Per-severity counts are kept outside the lock and survive
/// [`take_all`](Self::take_all), so a caller can drain and render the
/// diagnostics and still ask afterwards whether anything failed.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    counts: [AtomicUsize; 3],
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.counts[diag.severity as usize].fetch_add(1, Ordering::Relaxed);
        self.diagnostics.lock().unwrap().push(diag);
    }

    /// Number of diagnostics of one severity emitted so far.
    pub fn count(&self, severity: Severity) -> usize {
        self.counts[severity as usize].load(Ordering::Relaxed)
    }

    /// Number of errors emitted so far.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Returns `true` if any error was emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Drains the collected diagnostics.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock().unwrap())
    }

    /// Copies the collected diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }

    /// Copies the collected diagnostics carrying one code.
    pub fn with_code(&self, code: DiagnosticCode) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.code == code)
            .cloned()
            .collect()
    }
}
