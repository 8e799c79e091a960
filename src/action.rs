use crate::diag::Diagnostics;
use crate::engine::{Instance, ProcessingMode};
use crate::options::Options;
use crate::output;
use crate::predefines::update_predefines;

/// The closed set of front-end actions a job can execute.
#[derive(Debug, PartialEq, Eq)]
pub enum FrontendAction<'o> {
    /// Emit preprocessed source text.
    PrintPreprocessed,
    /// Parse and discard, for pure syntax validation.
    SyntaxOnly,
    /// Parse and serialize the completed translation unit.
    Dump { start_names: &'o [String] },
}

/// Map the engine's resolved processing mode to the action to execute.
pub fn create_action<'o>(
    mode: ProcessingMode,
    opts: &'o Options,
) -> Result<FrontendAction<'o>, String> {
    match mode {
        ProcessingMode::PreprocessOnly => Ok(FrontendAction::PrintPreprocessed),
        ProcessingMode::ParseOnly if opts.dump => Ok(FrontendAction::Dump {
            start_names: &opts.start_names,
        }),
        ProcessingMode::ParseOnly => Ok(FrontendAction::SyntaxOnly),
        other => Err(format!("unsupported action: {}", other.describe())),
    }
}

impl FrontendAction<'_> {
    /// Run this action on one freshly configured engine instance. The
    /// predefine patch is a shared pre-step: it must happen after the engine
    /// has computed its predefine block but before any user source is lexed.
    pub fn execute(&self, ci: &mut dyn Instance, opts: &Options, diags: &Diagnostics) -> bool {
        if let Err(message) = ci.begin_source_file() {
            diags.report(&message);
            return false;
        }

        if opts.have_cc {
            let patched = update_predefines(&ci.predefines(), &opts.predefines);
            ci.set_predefines(patched);
        }

        let res = match self {
            FrontendAction::PrintPreprocessed => ci.print_preprocessed(),
            FrontendAction::SyntaxOnly => ci.parse_syntax_only(),
            FrontendAction::Dump { start_names } => Self::dump(ci, start_names),
        };

        match res {
            Ok(()) => true,
            Err(message) => {
                diags.report(&message);
                false
            }
        }
    }

    fn dump(ci: &mut dyn Instance, start_names: &[String]) -> Result<(), String> {
        // No output stream means no consumer for the parse; fail the job.
        let mut out = ci.create_default_output_file("xml")?;
        let tu = ci.parse()?;
        output::output_xml(&tu, out.as_mut(), start_names)
            .map_err(|err| format!("cannot write output for '{}': {err}", ci.input_file()))
    }
}
