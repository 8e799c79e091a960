use ccdump::predefines::{update_predefines, BUILTIN_MARKER, COMMAND_LINE_MARKER};

const EMULATED: &str = "#define __GNUC__ 9\n#define __linux__ 1\n";

fn engine_block() -> String {
    format!(
        "# 1 \"input.c\"\n\
         {BUILTIN_MARKER}\
         #define __engine_builtin__ 1\n\
         #define __STDC__ 1\n\
         {COMMAND_LINE_MARKER}\
         #define FROM_CLI 1\n"
    )
}

#[test]
fn splice_is_prefix_plus_emulated_plus_suffix() {
    let original = engine_block();
    let patched = update_predefines(&original, EMULATED);

    let prefix_end = original.find(BUILTIN_MARKER).unwrap() + BUILTIN_MARKER.len();
    let suffix_start = original.find(COMMAND_LINE_MARKER).unwrap();
    let expected = format!(
        "{}{}{}",
        &original[..prefix_end],
        EMULATED,
        &original[suffix_start..]
    );
    assert_eq!(patched, expected);
}

#[test]
fn splice_replaces_engine_builtin_definitions() {
    let patched = update_predefines(&engine_block(), EMULATED);
    assert!(!patched.contains("__engine_builtin__"));
    assert!(patched.contains("__GNUC__"));
}

#[test]
fn command_line_definitions_keep_highest_precedence() {
    let patched = update_predefines(&engine_block(), EMULATED);
    let emulated_at = patched.find("__GNUC__").unwrap();
    let cli_at = patched.find("FROM_CLI").unwrap();
    assert!(emulated_at < cli_at);
}

#[test]
fn line_markers_survive_patching() {
    let patched = update_predefines(&engine_block(), EMULATED);
    assert!(patched.contains(BUILTIN_MARKER));
    assert!(patched.contains(COMMAND_LINE_MARKER));
}

#[test]
fn missing_builtin_marker_appends() {
    let original = format!("{COMMAND_LINE_MARKER}#define FROM_CLI 1\n");
    let patched = update_predefines(&original, EMULATED);
    assert_eq!(patched, format!("{original}{EMULATED}"));
}

#[test]
fn missing_command_line_marker_appends() {
    let original = format!("{BUILTIN_MARKER}#define __engine_builtin__ 1\n");
    let patched = update_predefines(&original, EMULATED);
    assert_eq!(patched, format!("{original}{EMULATED}"));
}

#[test]
fn missing_both_markers_appends_and_keeps_original() {
    let original = "#define LONE 1\n";
    let patched = update_predefines(original, EMULATED);
    assert_eq!(patched, format!("{original}{EMULATED}"));
    assert!(patched.contains("LONE"));
}

#[test]
fn empty_block_becomes_emulated_text() {
    assert_eq!(update_predefines("", EMULATED), EMULATED);
}
