use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "ccdump", version)]
pub(crate) struct Cli {
    /// Emulate the compiler described by the --cc-* options
    #[clap(long)]
    pub emulate: bool,
    /// Target triple detected from the emulated compiler
    #[clap(long = "cc-triple")]
    pub cc_triple: Option<String>,
    /// System include directory detected from the emulated compiler
    #[clap(long = "cc-isystem")]
    pub cc_isystem: Vec<String>,
    /// File holding the emulated compiler's predefined macros (e.g. captured
    /// with `cc -dM -E`)
    #[clap(long = "cc-predefines")]
    pub cc_predefines: Option<PathBuf>,
    /// Only run the preprocessor on the inputs
    #[clap(short = 'E')]
    pub preprocess: bool,
    /// Write a structured dump of each translation unit instead of
    /// discarding the parse
    #[clap(long)]
    pub dump: bool,
    /// Dump only these symbols and their dependencies
    #[clap(long = "start", value_delimiter = ',')]
    pub start: Vec<String>,
    /// The output file; only valid with a single input file
    #[clap(short, long)]
    pub output: Option<String>,
    /// Fallback for the engine's resource directory
    #[clap(long = "resource-dir")]
    pub resource_dir: Option<PathBuf>,
    /// Arguments forwarded to the engine driver (input files, -I, -D, ...)
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    pub engine_args: Vec<String>,
}
