use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;

use gres_cli::args::CliArgs;

fn main() -> Result<()> {
    // Initialize tracing if GRES_LOG or RUST_LOG is set (zero cost otherwise).
    // Supports GRES_LOG_FORMAT=tree|json|text (see src/tracing_config.rs).
    gres::tracing_config::init_tracing();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let args = CliArgs::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let code = gres_cli::run(&args, &mut out)?;
    drop(out);

    if code != gres_cli::EXIT_SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}
