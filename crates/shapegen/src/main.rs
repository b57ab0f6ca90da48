use clap::{Parser, Subcommand};
use shapegen::commands::{self, CompileArgs, SchemaKind};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn print_banner() {
    use owo_colors::{OwoColorize, XtermColors};

    let teal = XtermColors::from(37);
    let amber = XtermColors::from(214);

    println!();
    println!(
        "  {}{}",
        "shape".color(teal).bold(),
        "gen".color(amber).bold()
    );
    println!(
        "  {}",
        "object graphs in, structural declarations out".dimmed()
    );
    println!("  v{}", env!("CARGO_PKG_VERSION"));
    println!();
}

/// Shapegen CLI - compile type universes into structural declaration models
#[derive(Parser)]
#[command(name = "shapegen")]
#[command(about = "Compile type universes into structural declaration models", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (SHAPEGEN_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Subcommand)]
enum Commands {
    /// Compile root types of a universe into a declaration model
    Compile {
        /// Path to shapegen.toml or legacy shapegen.json
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Universe JSON file (overrides [input].universe)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Root type identity; repeatable (overrides [input].roots)
        #[arg(short, long = "root")]
        roots: Vec<String>,
        /// Output file (overrides [output].path; stdout when neither is set)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the JSON Schema of an input format
    Schema {
        /// Which document to describe
        #[arg(value_enum, default_value_t = SchemaKind::Universe)]
        kind: SchemaKind,
        /// Output file path (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without compiling
    CheckConfig {
        /// Path to shapegen.toml or legacy shapegen.json
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SHAPEGEN_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() == 1
        || args.iter().any(|a| a == "--help" || a == "-h")
        || args.iter().any(|a| a == "--version" || a == "-V")
    {
        print_banner();
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let start_dir = std::env::current_dir()
        .map_err(|err| miette::miette!("Failed to get current directory: {err}"))?;

    match cli.command {
        Commands::Compile {
            config,
            input,
            roots,
            output,
            compact,
        } => commands::run_compile(
            CompileArgs {
                config,
                input,
                roots,
                output,
                compact,
            },
            &start_dir,
        )?,
        Commands::Schema { kind, output } => commands::run_schema(kind, output)?,
        Commands::CheckConfig { config } => commands::run_check_config(config, &start_dir)?,
    }
    Ok(())
}
