// LaTeX template rendering: preamble-safe substitution plus brace repair.
// Everything here is synchronous and allocation-only; handlers call it inline.

pub mod diagnostics;
pub mod handlers;
pub mod repair;
pub mod sanitizer;
pub mod substitute;

// Re-export the public API consumed by handlers and the template store.
pub use diagnostics::Diagnostic;
pub use sanitizer::{render, render_with_diagnostics};
