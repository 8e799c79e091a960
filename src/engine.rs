use std::io::Write;
use std::path::{Path, PathBuf};

/// Tool identity of the front-end jobs we expect the driver to plan.
pub const FRONTEND_TOOL: &str = "cc1";

/// Processing mode resolved by the engine from a job's argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingMode {
    PreprocessOnly,
    ParseOnly,
    EmitAssembly,
    EmitObject,
}

impl ProcessingMode {
    pub const fn describe(&self) -> &'static str {
        match self {
            ProcessingMode::PreprocessOnly => "preprocess-only",
            ProcessingMode::ParseOnly => "parse-only",
            ProcessingMode::EmitAssembly => "emit-assembly",
            ProcessingMode::EmitObject => "emit-object",
        }
    }
}

/// One planned invocation of a tool over one translation unit.
#[derive(Debug, Clone)]
pub struct Job {
    pub tool: String,
    pub args: Vec<String>,
}

impl Job {
    pub fn command_line(&self) -> String {
        let mut res = self.tool.clone();
        for arg in &self.args {
            res.push(' ');
            res.push_str(arg);
        }
        res
    }
}

/// The driver's plan for one logical invocation.
#[derive(Debug)]
pub struct Compilation {
    pub jobs: Vec<Job>,
    /// The argument list asked to print the planned jobs instead of running
    /// them ("-###").
    pub show_jobs: bool,
}

/// Driver logic of the parsing engine: expands one logical invocation into
/// per-file compilation jobs.
pub trait Driver {
    fn resource_dir(&self) -> &Path;
    fn set_resource_dir(&mut self, dir: PathBuf);
    fn build_compilation(&mut self, args: &[String]) -> Result<Compilation, String>;
}

/// A freshly constructed engine for exactly one job. Instances are never
/// reused across jobs; engine-internal state (macro tables, diagnostic
/// counters) must not leak between translation units.
pub trait Instance: std::fmt::Debug {
    fn create_diagnostics(&mut self) -> bool;
    fn mode(&self) -> ProcessingMode;
    fn input_file(&self) -> &str;
    fn set_skip_function_bodies(&mut self, skip: bool);
    fn set_output_file(&mut self, path: Option<&str>);
    /// Open the main source file and compute the predefine text block. Runs
    /// before any user source text is lexed.
    fn begin_source_file(&mut self) -> Result<(), String>;
    fn predefines(&self) -> String;
    fn set_predefines(&mut self, text: String);
    /// Create the output stream for this job, named after the input file with
    /// the given extension unless an explicit output target is set.
    fn create_default_output_file(&mut self, extension: &str) -> Result<Box<dyn Write>, String>;
    fn print_preprocessed(&mut self) -> Result<(), String>;
    fn parse_syntax_only(&mut self) -> Result<(), String>;
    fn parse(&mut self) -> Result<TranslationUnit, String>;
}

/// Entry points of the generic parsing engine.
pub trait Engine {
    fn driver(&self) -> Box<dyn Driver>;
    fn create_instance(&self, args: &[String]) -> Result<Box<dyn Instance>, String>;
}

/// Completed parse structure handed to the structured-output serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    pub main_file: String,
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub kind: DeclKind,
    pub name: String,
    /// Names of other entities this declaration refers to.
    pub refs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Typedef,
    Struct,
    Union,
    Enum,
    Function,
    Variable,
}

impl DeclKind {
    pub const fn element(&self) -> &'static str {
        match self {
            DeclKind::Typedef => "Typedef",
            DeclKind::Struct => "Struct",
            DeclKind::Union => "Union",
            DeclKind::Enum => "Enum",
            DeclKind::Function => "Function",
            DeclKind::Variable => "Variable",
        }
    }
}
