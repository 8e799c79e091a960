/// Line marker opening the engine's built-in macro definitions.
pub const BUILTIN_MARKER: &str = "# 1 \"<built-in>\" 3\n";
/// Line marker opening the macro definitions that came from the command line.
pub const COMMAND_LINE_MARKER: &str = "# 1 \"<command line>\" 1\n";

/// Substitute the emulated compiler's macro definitions into the engine's
/// predefine text block.
///
/// The engine forces some of its own predefines even when `-undef` is given.
/// When both anchor markers are present, everything between them is replaced
/// by `emulated`, so macros from the command line keep overriding both the
/// built-in and the emulated sets. When either marker is missing the emulated
/// text is appended to the whole block instead.
pub fn update_predefines(predefines: &str, emulated: &str) -> String {
    let start = predefines.find(BUILTIN_MARKER);
    let end = predefines.find(COMMAND_LINE_MARKER);
    if let (Some(start), Some(end)) = (start, end) {
        let keep = start + BUILTIN_MARKER.len();
        format!("{}{}{}", &predefines[..keep], emulated, &predefines[end..])
    } else {
        format!("{predefines}{emulated}")
    }
}
