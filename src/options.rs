use std::path::PathBuf;

/// Settings captured from the command line and from probing the emulated
/// compiler. Built once, read-only for the rest of the run.
#[derive(Debug, Default)]
pub struct Options {
    /// Emulate the probed compiler described by the fields below.
    pub have_cc: bool,
    /// Target triple of the emulated compiler, when known.
    pub triple: Option<String>,
    /// System include directories detected from the emulated compiler.
    pub includes: Vec<String>,
    /// Macro definition text captured from the emulated compiler.
    pub predefines: String,
    /// Stop after preprocessing instead of parsing.
    pub pp_only: bool,
    /// Serialize the parsed translation unit instead of discarding it.
    pub dump: bool,
    /// Restrict the dump to these symbols and their dependencies.
    pub start_names: Vec<String>,
    /// Explicit output target; only legal for a single translation unit.
    pub output_file: Option<String>,
    /// Fallback when the engine's own resource directory discovery fails.
    pub resource_dir: Option<PathBuf>,
}
