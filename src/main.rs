mod cli;

use ccdump::builtin::BuiltinEngine;
use ccdump::options::Options;
use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();

    let predefines = match &cli.cc_predefines {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("error: cannot read '{}': {err}", path.display());
                std::process::exit(1);
            }
        },
        None => String::new(),
    };

    let opts = Options {
        have_cc: cli.emulate,
        triple: cli.cc_triple,
        includes: cli.cc_isystem,
        predefines,
        pp_only: cli.preprocess,
        dump: cli.dump,
        start_names: cli.start,
        output_file: cli.output,
        resource_dir: cli.resource_dir,
    };

    std::process::exit(ccdump::run::run(&BuiltinEngine, &cli.engine_args, &opts));
}
