use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the gres binary.
#[derive(Parser, Debug)]
#[command(
    name = "gres",
    version,
    about = "Resolve generic type parameters of C#-style declarations"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bind a declaration file and print every type parameter's reference
    /// kind, effective base class and interface set.
    Resolve(ResolveArgs),
    /// Bind a declaration file and report invalid declarations.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// JSON declaration file.
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only report the type with this name (`Ns.Name` or `Name`).
    #[arg(long = "type")]
    pub type_name: Option<String>,

    /// Classify parameters by their `class` / `struct` flags only.
    #[arg(long)]
    pub strict_reference_kind: bool,

    /// Do not load the built-in core library (`System.Object`, ...).
    #[arg(long)]
    pub no_core_library: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON declaration file.
    pub file: PathBuf,

    /// Do not load the built-in core library (`System.Object`, ...).
    #[arg(long)]
    pub no_core_library: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
