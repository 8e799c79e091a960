use crate::engine::{Decl, TranslationUnit};
use std::collections::HashSet;
use std::io::{self, Write};

/// Serialize a completed translation unit. An empty start list emits every
/// declaration; otherwise only the named symbols and the transitive closure
/// of their references are emitted, in source order either way.
pub fn output_xml(
    tu: &TranslationUnit,
    out: &mut dyn Write,
    start_names: &[String],
) -> io::Result<()> {
    writeln!(out, "<?xml version=\"1.0\"?>")?;
    writeln!(out, "<TranslationUnit file=\"{}\">", escape(&tu.main_file))?;

    for decl in select_decls(tu, start_names) {
        let element = decl.kind.element();
        if decl.refs.is_empty() {
            writeln!(out, "  <{element} name=\"{}\"/>", escape(&decl.name))?;
        } else {
            writeln!(out, "  <{element} name=\"{}\">", escape(&decl.name))?;
            for name in &decl.refs {
                writeln!(out, "    <Ref name=\"{}\"/>", escape(name))?;
            }
            writeln!(out, "  </{element}>")?;
        }
    }

    writeln!(out, "</TranslationUnit>")
}

fn select_decls<'t>(tu: &'t TranslationUnit, start_names: &[String]) -> Vec<&'t Decl> {
    if start_names.is_empty() {
        return tu.decls.iter().collect();
    }

    let mut selected: HashSet<&str> = HashSet::new();
    let mut worklist: Vec<&str> = Vec::new();
    for name in start_names {
        if selected.insert(name) {
            worklist.push(name);
        }
    }

    while let Some(name) = worklist.pop() {
        for decl in tu.decls.iter().filter(|d| d.name == name) {
            for referenced in &decl.refs {
                if selected.insert(referenced) {
                    worklist.push(referenced);
                }
            }
        }
    }

    tu.decls
        .iter()
        .filter(|decl| selected.contains(decl.name.as_str()))
        .collect()
}

fn escape(text: &str) -> String {
    let mut res = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            _ => res.push(c),
        }
    }
    res
}
