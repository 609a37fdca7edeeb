mod command;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use mockgen_argparse::args::ParseOutcome;
use mockgen_argparse::registry::Registry;
use mockgen_config::{
    Environment, GenerateOptions, GlobalOptions, InstallOptions, LogLevel, MetagenerateOptions,
    UninstallOptions,
};
use tracing_subscriber::{EnvFilter, fmt};

use crate::command::CommandOptions;

#[derive(Parser)]
#[command(name = "mockgen")]
#[command(version, about = "Resolve mockgen command configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate mocks for a set of targets
    #[command(disable_help_flag = true)]
    Generate(CommandArgs),

    /// Install a Run Script Phase that generates mocks
    #[command(disable_help_flag = true)]
    Install(CommandArgs),

    /// Remove mockgen Run Script Phases
    #[command(disable_help_flag = true)]
    Uninstall(CommandArgs),

    /// Generate source files for benchmarking
    #[command(disable_help_flag = true)]
    Metagenerate(CommandArgs),
}

#[derive(Args)]
struct CommandArgs {
    /// Command options (see `mockgen <command> --help`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OPTIONS")]
    args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let env = Environment::from_process();

    match cli.command {
        Commands::Generate(args) => run::<GenerateOptions>(&args.args, &env),
        Commands::Install(args) => run::<InstallOptions>(&args.args, &env),
        Commands::Uninstall(args) => run::<UninstallOptions>(&args.args, &env),
        Commands::Metagenerate(args) => run::<MetagenerateOptions>(&args.args, &env),
    }
}

fn run<C: CommandOptions>(argv: &[String], env: &Environment) -> Result<()> {
    let mut registry = Registry::new(format!("mockgen {}", C::NAME)).with_summary(C::SUMMARY);
    let global = GlobalOptions::register(&mut registry).context("invalid option declarations")?;
    let options = C::register(&mut registry).context("invalid option declarations")?;

    let matches = match registry.parse(argv)? {
        ParseOutcome::Matches(m) => m,
        ParseOutcome::Help(text) => {
            print!("{text}");
            return Ok(());
        }
    };
    if let Some(extra) = matches.rest().first() {
        bail!("unexpected argument: {extra}");
    }

    let level = global.resolve(&matches)?;
    init_tracing(level);
    tracing::debug!(command = C::NAME, %level, "resolving configuration");

    let config = options.resolve(&matches, env)?;
    let json = serde_json::to_string_pretty(&config).context("failed to serialize configuration")?;
    println!("{json}");
    Ok(())
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
