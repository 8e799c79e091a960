use crate::action::create_action;
use crate::diag::Diagnostics;
use crate::engine::{Engine, Instance, Job, FRONTEND_TOOL};
use crate::options::Options;
use crate::translate::translate_args;
use std::io::{self, Write};

/// Translate the argument list for compiler emulation and run every job the
/// engine's driver plans from it. Returns the process exit code.
pub fn run(engine: &dyn Engine, args: &[String], opts: &Options) -> i32 {
    let args = translate_args(args, opts);
    run_impl(engine, &args, opts)
}

fn run_impl(engine: &dyn Engine, args: &[String], opts: &Options) -> i32 {
    // Diagnostics engine for driver planning only; every job constructs
    // its own.
    let diags = Diagnostics::new();

    let mut driver = engine.driver();
    let discovered = driver.resource_dir();
    if !(discovered.is_absolute() && discovered.is_dir()) {
        if let Some(fallback) = &opts.resource_dir {
            driver.set_resource_dir(fallback.clone());
        }
    }

    // Tell the driver not to plan anything past syntax parsing.
    let mut planning_args = args.to_vec();
    planning_args.push(if opts.pp_only { "-E" } else { "-fsyntax-only" }.to_string());

    let compilation = match driver.build_compilation(&planning_args) {
        Ok(compilation) => compilation,
        Err(message) => {
            diags.report(&message);
            return 1;
        }
    };

    // For '-###' just print the planned jobs and exit early.
    if compilation.show_jobs {
        let stderr = io::stderr();
        let mut stderr = stderr.lock();
        for job in &compilation.jobs {
            let _ = writeln!(stderr, "{}", job.command_line());
        }
        return 0;
    }

    // An explicit output target is only meaningful for one translation unit.
    if opts.output_file.is_some() && compilation.jobs.len() > 1 {
        diags.report("cannot specify -o when generating multiple output files");
        return 1;
    }

    // Run every planned job; a failing job does not stop its siblings.
    let mut result = true;
    for job in &compilation.jobs {
        result = run_job(engine, job, opts, &diags) && result;
    }

    if result {
        0
    } else {
        1
    }
}

fn run_job(engine: &dyn Engine, job: &Job, opts: &Options, diags: &Diagnostics) -> bool {
    if job.tool != FRONTEND_TOOL {
        diags.report_command(
            "expected a front-end compile job",
            &job.command_line(),
            "not a compile job",
        );
        return false;
    }

    let mut ci = match engine.create_instance(&job.args) {
        Ok(ci) => ci,
        Err(message) => {
            diags.report(&message);
            return false;
        }
    };

    run_instance(ci.as_mut(), opts)
}

fn run_instance(ci: &mut dyn Instance, opts: &Options) -> bool {
    // This job's own diagnostics, separate from the planning engine's.
    let diags = Diagnostics::new();
    if !ci.create_diagnostics() {
        return false;
    }

    // Only interface-level structure is produced; function bodies are never
    // needed.
    ci.set_skip_function_bodies(true);
    ci.set_output_file(opts.output_file.as_deref());

    match create_action(ci.mode(), opts) {
        Ok(action) => action.execute(ci, opts, &diags),
        Err(message) => {
            diags.report(&message);
            false
        }
    }
}
