//! Emulates a probed compiler's front-end behavior on top of a generic
//! parsing engine: its command line is translated into an engine invocation,
//! the engine's predefined-macro text is patched to match the probed
//! compiler, and each planned translation-unit job either preprocesses its
//! input or parses it and serializes the result.

pub mod action;
pub mod builtin;
pub mod diag;
pub mod engine;
pub mod options;
pub mod output;
pub mod predefines;
pub mod run;
pub mod translate;

mod scan;
