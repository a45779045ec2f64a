//! Rendering diagnostics for people.

mod terminal;

pub use terminal::TerminalEmitter;

use crate::Diagnostic;

/// A sink that reports diagnostics somewhere.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Write out anything still buffered.
    fn flush(&mut self);
}
