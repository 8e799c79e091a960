use crate::engine::{
    Compilation, Driver, Engine, Instance, Job, ProcessingMode, TranslationUnit, FRONTEND_TOOL,
};
use crate::predefines::{BUILTIN_MARKER, COMMAND_LINE_MARKER};
use crate::scan;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Options that consume the following argument.
const VALUE_OPTIONS: &[&str] = &["-o", "-isystem", "-target", "-D", "-I", "-U"];

/// The reference parsing engine bundled with the binary. It implements the
/// engine seam with a structural scanner: no macro expansion and no semantic
/// analysis, just driver planning, predefine synthesis and top-level
/// declaration scanning.
pub struct BuiltinEngine;

impl Engine for BuiltinEngine {
    fn driver(&self) -> Box<dyn Driver> {
        Box::new(BuiltinDriver::new())
    }

    fn create_instance(&self, args: &[String]) -> Result<Box<dyn Instance>, String> {
        Ok(Box::new(BuiltinInstance::from_args(args)?))
    }
}

pub struct BuiltinDriver {
    resource_dir: PathBuf,
}

impl BuiltinDriver {
    fn new() -> Self {
        // Headers shipped with the engine live next to the binary. The
        // directory may not exist; the runner substitutes a fallback then.
        let resource_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("lib")))
            .unwrap_or_else(|| PathBuf::from("lib"));
        Self { resource_dir }
    }
}

impl Driver for BuiltinDriver {
    fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    fn set_resource_dir(&mut self, dir: PathBuf) {
        self.resource_dir = dir;
    }

    fn build_compilation(&mut self, args: &[String]) -> Result<Compilation, String> {
        let mut common = Vec::new();
        let mut inputs = Vec::new();
        let mut show_jobs = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "-###" {
                show_jobs = true;
                continue;
            }
            if !arg.starts_with('-') {
                inputs.push(arg.clone());
                continue;
            }
            common.push(arg.clone());
            if VALUE_OPTIONS.contains(&arg.as_str()) {
                match iter.next() {
                    Some(value) => common.push(value.clone()),
                    None => return Err(format!("argument to '{arg}' is missing")),
                }
            }
        }

        if inputs.is_empty() {
            return Err("no input files".to_string());
        }

        let mut jobs = Vec::new();
        for input in inputs {
            if !Path::new(&input).is_file() {
                return Err(format!("no such file or directory: '{input}'"));
            }
            let mut job_args = common.clone();
            job_args.push(input);
            jobs.push(Job {
                tool: FRONTEND_TOOL.to_string(),
                args: job_args,
            });
        }

        Ok(Compilation { jobs, show_jobs })
    }
}

#[derive(Debug)]
pub struct BuiltinInstance {
    mode: ProcessingMode,
    input: String,
    target: Option<String>,
    defines: Vec<String>,
    undef: bool,
    output_file: Option<String>,
    skip_function_bodies: bool,
    has_diagnostics: bool,
    source: Option<String>,
    predefines: String,
}

impl BuiltinInstance {
    fn from_args(args: &[String]) -> Result<Self, String> {
        let mut mode = ProcessingMode::ParseOnly;
        let mut input = None;
        let mut target = None;
        let mut defines = Vec::new();
        let mut undef = false;
        let mut output_file = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value_of = |arg: &String| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| format!("argument to '{arg}' is missing"))
            };
            match arg.as_str() {
                "-E" => mode = ProcessingMode::PreprocessOnly,
                "-fsyntax-only" => mode = ProcessingMode::ParseOnly,
                "-S" => mode = ProcessingMode::EmitAssembly,
                "-c" => mode = ProcessingMode::EmitObject,
                "-undef" => undef = true,
                "-nostdinc" => {}
                "-target" => target = Some(value_of(arg)?),
                // Header search directories are accepted for driver
                // compatibility; the structural scanner never opens them.
                "-isystem" | "-I" | "-U" => {
                    let _ = value_of(arg)?;
                }
                "-D" => defines.push(value_of(arg)?),
                "-o" => output_file = Some(value_of(arg)?),
                _ if arg.starts_with("-D") => defines.push(arg[2..].to_string()),
                _ if arg.starts_with("-I") || arg.starts_with("-U") => {}
                _ if arg.starts_with('-') => {
                    return Err(format!("unknown argument: '{arg}'"));
                }
                _ => input = Some(arg.clone()),
            }
        }

        Ok(Self {
            mode,
            input: input.ok_or_else(|| "no input file".to_string())?,
            target,
            defines,
            undef,
            output_file,
            skip_function_bodies: false,
            has_diagnostics: false,
            source: None,
            predefines: String::new(),
        })
    }

    fn synthesize_predefines(&self) -> String {
        let mut text = String::from(BUILTIN_MARKER);
        // Forced even under -undef, like the macros every hosted C
        // implementation must provide.
        text.push_str("#define __STDC__ 1\n");
        text.push_str("#define __STDC_HOSTED__ 1\n");
        if !self.undef {
            text.push_str("#define __ccdump__ 1\n");
            text.push_str("#define __STDC_VERSION__ 201112L\n");
            if let Some(target) = &self.target {
                let arch: String = target
                    .split('-')
                    .next()
                    .unwrap_or(target)
                    .chars()
                    .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                    .collect();
                text.push_str(&format!("#define __{arch}__ 1\n"));
            }
        }
        text.push_str(COMMAND_LINE_MARKER);
        for define in &self.defines {
            let (name, value) = define
                .split_once('=')
                .unwrap_or((define.as_str(), "1"));
            text.push_str(&format!("#define {name} {value}\n"));
        }
        text
    }
}

impl Instance for BuiltinInstance {
    fn create_diagnostics(&mut self) -> bool {
        self.has_diagnostics = true;
        true
    }

    fn mode(&self) -> ProcessingMode {
        self.mode
    }

    fn input_file(&self) -> &str {
        &self.input
    }

    fn set_skip_function_bodies(&mut self, skip: bool) {
        self.skip_function_bodies = skip;
    }

    fn set_output_file(&mut self, path: Option<&str>) {
        self.output_file = path.map(String::from);
    }

    fn begin_source_file(&mut self) -> Result<(), String> {
        if !self.has_diagnostics {
            return Err("no diagnostics engine".to_string());
        }
        let source = fs::read_to_string(&self.input)
            .map_err(|err| format!("cannot open '{}': {err}", self.input))?;
        self.source = Some(source);
        self.predefines = self.synthesize_predefines();
        Ok(())
    }

    fn predefines(&self) -> String {
        self.predefines.clone()
    }

    fn set_predefines(&mut self, text: String) {
        self.predefines = text;
    }

    fn create_default_output_file(&mut self, extension: &str) -> Result<Box<dyn Write>, String> {
        let path = match self.output_file.as_deref() {
            Some("-") => return Ok(Box::new(io::stdout())),
            Some(path) => PathBuf::from(path),
            None => Path::new(&self.input).with_extension(extension),
        };
        match fs::File::create(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(err) => Err(format!("cannot open output file '{}': {err}", path.display())),
        }
    }

    fn print_preprocessed(&mut self) -> Result<(), String> {
        let mut out: Box<dyn Write> = match self.output_file.as_deref() {
            None | Some("-") => Box::new(io::stdout()),
            Some(path) => match fs::File::create(path) {
                Ok(file) => Box::new(file),
                Err(err) => return Err(format!("cannot open output file '{path}': {err}")),
            },
        };
        let source = self
            .source
            .as_deref()
            .ok_or_else(|| "no source file opened".to_string())?;
        write!(out, "{}", self.predefines)
            .and_then(|_| writeln!(out, "# 1 \"{}\"", self.input))
            .and_then(|_| write!(out, "{source}"))
            .map_err(|err| format!("cannot write preprocessed output: {err}"))
    }

    fn parse_syntax_only(&mut self) -> Result<(), String> {
        self.parse().map(|_| ())
    }

    fn parse(&mut self) -> Result<TranslationUnit, String> {
        let source = self
            .source
            .as_deref()
            .ok_or_else(|| "no source file opened".to_string())?;
        scan::scan_translation_unit(&self.input, source, self.skip_function_bodies)
    }
}
