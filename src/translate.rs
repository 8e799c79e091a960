use crate::options::Options;

/// Rewrite the incoming argument list so the engine's own header search and
/// macro predefinitions are replaced by the values captured from the emulated
/// compiler. Without emulation the arguments pass through unchanged.
pub fn translate_args(args: &[String], opts: &Options) -> Vec<String> {
    let mut res = args.to_vec();

    if !opts.have_cc {
        return res;
    }

    // Configure the target to match that of the given compiler.
    if let Some(triple) = &opts.triple {
        res.push("-target".to_string());
        res.push(triple.clone());
    }

    // Suppress the engine's own header search paths and use the detected
    // ones instead, in the order they were captured.
    res.push("-nostdinc".to_string());
    for dir in &opts.includes {
        res.push("-isystem".to_string());
        res.push(dir.clone());
    }

    // Suppress the engine's predefines; the authoritative set is spliced in
    // later by the predefine patch.
    res.push("-undef".to_string());

    res
}
