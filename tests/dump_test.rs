use ccdump::builtin::BuiltinEngine;
use ccdump::options::Options;
use ccdump::predefines::{BUILTIN_MARKER, COMMAND_LINE_MARKER};
use ccdump::run::run;
use std::fs;
use std::path::{Path, PathBuf};

fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ccdump-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

const GEOMETRY: &str = "\
struct point { int x; int y; };
struct line { struct point a; struct point b; };
struct other { int z; };
typedef struct point point_t;
struct line make_line(struct point a, struct point b);
";

#[test]
fn dump_writes_output_named_after_the_input() {
    let dir = test_dir("named");
    let input = write_file(&dir, "geometry.h", GEOMETRY);
    let opts = Options {
        dump: true,
        ..Options::default()
    };

    assert_eq!(run(&BuiltinEngine, &[input], &opts), 0);

    let xml = fs::read_to_string(dir.join("geometry.xml")).unwrap();
    assert!(xml.contains("<TranslationUnit"));
    assert!(xml.contains("<Struct name=\"point\">"));
    assert!(xml.contains("<Typedef name=\"point_t\">"));
    assert!(xml.contains("<Function name=\"make_line\">"));
}

#[test]
fn start_symbols_restrict_the_dump_transitively() {
    let dir = test_dir("start");
    let input = write_file(&dir, "geometry.h", GEOMETRY);
    let opts = Options {
        dump: true,
        start_names: vec!["make_line".to_string()],
        output_file: Some(dir.join("filtered.xml").to_str().unwrap().to_string()),
        ..Options::default()
    };

    assert_eq!(run(&BuiltinEngine, &[input], &opts), 0);

    let xml = fs::read_to_string(dir.join("filtered.xml")).unwrap();
    assert!(xml.contains("name=\"make_line\""));
    assert!(xml.contains("name=\"line\""));
    assert!(xml.contains("name=\"point\""));
    assert!(!xml.contains("name=\"other\""));
    assert!(!xml.contains("name=\"point_t\""));
}

#[test]
fn one_malformed_input_does_not_block_its_siblings() {
    let dir = test_dir("isolation");
    let good = write_file(&dir, "good.h", "struct ok { int field; };\n");
    let bad = write_file(&dir, "bad.h", "struct broken { int field;\n");
    let opts = Options {
        dump: true,
        ..Options::default()
    };

    assert_eq!(run(&BuiltinEngine, &[bad, good], &opts), 1);

    let xml = fs::read_to_string(dir.join("good.xml")).unwrap();
    assert!(xml.contains("<Struct name=\"ok\">"));
}

#[test]
fn reruns_are_byte_identical() {
    let dir = test_dir("determinism");
    let input = write_file(&dir, "geometry.h", GEOMETRY);
    let opts = Options {
        dump: true,
        ..Options::default()
    };

    assert_eq!(run(&BuiltinEngine, &[input.clone()], &opts), 0);
    let first = fs::read(dir.join("geometry.xml")).unwrap();
    assert_eq!(run(&BuiltinEngine, &[input], &opts), 0);
    let second = fs::read(dir.join("geometry.xml")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn explicit_output_with_two_inputs_writes_nothing() {
    let dir = test_dir("conflict");
    let a = write_file(&dir, "a.h", "int a;\n");
    let b = write_file(&dir, "b.h", "int b;\n");
    let out = dir.join("out.xml");
    let opts = Options {
        dump: true,
        output_file: Some(out.to_str().unwrap().to_string()),
        ..Options::default()
    };

    assert_eq!(run(&BuiltinEngine, &[a, b], &opts), 1);
    assert!(!out.exists());
    assert!(!dir.join("a.xml").exists());
    assert!(!dir.join("b.xml").exists());
}

#[test]
fn show_jobs_creates_no_output_files() {
    let dir = test_dir("showjobs");
    let input = write_file(&dir, "a.h", "int a;\n");
    let opts = Options {
        dump: true,
        ..Options::default()
    };

    assert_eq!(run(&BuiltinEngine, &[input, "-###".to_string()], &opts), 0);
    assert!(!dir.join("a.xml").exists());
}

#[test]
fn syntax_only_run_creates_no_output_files() {
    let dir = test_dir("syntax");
    let input = write_file(&dir, "a.h", "int a;\n");

    assert_eq!(run(&BuiltinEngine, &[input], &Options::default()), 0);
    assert!(!dir.join("a.xml").exists());
}

#[test]
fn malformed_input_fails_syntax_only() {
    let dir = test_dir("syntaxbad");
    let input = write_file(&dir, "bad.h", "struct broken {\n");

    assert_eq!(run(&BuiltinEngine, &[input], &Options::default()), 1);
}

#[test]
fn missing_input_fails_during_planning() {
    let dir = test_dir("missing");
    let input = dir.join("absent.h").to_str().unwrap().to_string();

    assert_eq!(run(&BuiltinEngine, &[input], &Options::default()), 1);
}

#[test]
fn emulated_predefines_are_spliced_into_preprocessed_output() {
    let dir = test_dir("emulation");
    let input = write_file(&dir, "a.c", "int value;\n");
    let out = dir.join("a.i");
    let opts = Options {
        have_cc: true,
        triple: Some("x86_64-linux-gnu".to_string()),
        predefines: "#define __GNUC__ 9\n#define __linux__ 1\n".to_string(),
        pp_only: true,
        output_file: Some(out.to_str().unwrap().to_string()),
        ..Options::default()
    };

    assert_eq!(
        run(&BuiltinEngine, &[input, "-DFROM_CLI=1".to_string()], &opts),
        0
    );

    let text = fs::read_to_string(&out).unwrap();
    let builtin_at = text.find(BUILTIN_MARKER).unwrap();
    let emulated_at = text.find("__GNUC__").unwrap();
    let command_line_at = text.find(COMMAND_LINE_MARKER).unwrap();
    let cli_define_at = text.find("FROM_CLI").unwrap();
    assert!(builtin_at < emulated_at);
    assert!(emulated_at < command_line_at);
    assert!(command_line_at < cli_define_at);
    // The engine's own optional predefines were suppressed and replaced.
    assert!(!text.contains("__ccdump__"));
    assert!(text.contains("int value;"));
}

#[test]
fn preprocessed_output_keeps_the_main_file_marker() {
    let dir = test_dir("ppmarker");
    let input = write_file(&dir, "a.c", "int value;\n");
    let out = dir.join("a.i");
    let opts = Options {
        pp_only: true,
        output_file: Some(out.to_str().unwrap().to_string()),
        ..Options::default()
    };

    assert_eq!(run(&BuiltinEngine, &[input.clone()], &opts), 0);
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains(&format!("# 1 \"{input}\"")));
}
