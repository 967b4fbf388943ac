//! Command-line front end: loads a JSON declaration file, binds it and
//! reports the resolved type parameters.

pub mod args;
pub mod driver;
pub mod project_file;
pub mod report;

use anyhow::{Context, Result};
use std::io::Write;

use args::{CheckArgs, CliArgs, Command, OutputFormat, ResolveArgs};
use driver::DriverOptions;
use report::Reporter;

pub const EXIT_SUCCESS: i32 = 0;
/// At least one declared type failed to bind.
pub const EXIT_INVALID_DECLARATIONS: i32 = 1;

/// Run a parsed command, writing its output to `out`. Returns the process
/// exit code.
pub fn run(args: &CliArgs, out: &mut impl Write) -> Result<i32> {
    match &args.command {
        Command::Resolve(resolve) => run_resolve(resolve, out),
        Command::Check(check) => run_check(check, out),
    }
}

fn run_resolve(args: &ResolveArgs, out: &mut impl Write) -> Result<i32> {
    let project = project_file::load(&args.file)?.into_project(!args.no_core_library)?;
    let reports = driver::resolve_project(
        &project,
        &DriverOptions {
            type_filter: args.type_name.as_deref(),
            strict_reference_kind: args.strict_reference_kind,
        },
    )?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports).context("failed to encode report")?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Text => {
            let reporter = Reporter::new(!args.no_color);
            write!(out, "{}", reporter.render(&reports))?;
        }
    }
    Ok(exit_code(&reports))
}

fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<i32> {
    let project = project_file::load(&args.file)?.into_project(!args.no_core_library)?;
    let reports = driver::resolve_project(&project, &DriverOptions::default())?;

    let reporter = Reporter::new(!args.no_color);
    write!(
        out,
        "{}",
        reporter.render_errors(&args.file.display().to_string(), &reports)
    )?;
    writeln!(out, "{}", reporter.summary(&reports))?;
    Ok(exit_code(&reports))
}

fn exit_code(reports: &[driver::TypeReport]) -> i32 {
    if reports.iter().any(driver::TypeReport::is_error) {
        EXIT_INVALID_DECLARATIONS
    } else {
        EXIT_SUCCESS
    }
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "../tests/cli_tests.rs"]
mod cli_tests;
