mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    dispatch, init, move_node, mutate, pages, preview, tree, DispatchArgs, InitArgs, MoveArgs,
    MutateArgs, PagesArgs, PreviewArgs, TreeArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - edit page markup with stable node ids
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and a seeded site
    Init(InitArgs),

    /// List the site's pages and their routes
    Pages(PagesArgs),

    /// Print a page's node tree
    Tree(TreeArgs),

    /// Move a node before, after or inside another node
    Move(MoveArgs),

    /// Apply a JSON mutation to a page
    Mutate(MutateArgs),

    /// Apply a JSON store action to the site
    Dispatch(DispatchArgs),

    /// Render a page's preview document
    Preview(PreviewArgs),
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match command {
        Command::Init(args) => init(args, &cwd),
        Command::Pages(args) => pages(args, &cwd),
        Command::Tree(args) => tree(args, &cwd),
        Command::Move(args) => move_node(args, &cwd),
        Command::Mutate(args) => mutate(args, &cwd),
        Command::Dispatch(args) => dispatch(args, &cwd),
        Command::Preview(args) => preview(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
