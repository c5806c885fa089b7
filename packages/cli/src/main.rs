mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, check, color, delete, image, init, label, move_node, note, reorder, show, AddArgs,
    CheckArgs, ColorArgs, DeleteArgs, DocArgs, ImageArgs, InitArgs, LabelArgs, MoveArgs, NoteArgs,
    ReorderArgs, ShowArgs,
};
use tracing_subscriber::EnvFilter;

/// mindplan - outline and mind-map editing from the terminal
#[derive(Parser, Debug)]
#[command(name = "mindplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    doc: DocArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and an outline holding only a root
    Init(InitArgs),

    /// Print the outline as a tree
    Show(ShowArgs),

    /// Add a child node
    Add(AddArgs),

    /// Change a node's label
    Label(LabelArgs),

    /// Set or clear a node's color
    Color(ColorArgs),

    /// Delete a node and everything below it
    Delete(DeleteArgs),

    /// Move a node under a new parent
    Move(MoveArgs),

    /// Swap a node with its previous or next sibling
    Reorder(ReorderArgs),

    /// Manage node notes
    Note(NoteArgs),

    /// Manage node images
    Image(ImageArgs),

    /// Validate the outline file
    Check(CheckArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let doc = &cli.doc;
    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Show(args) => show(args, doc, &cwd),
        Command::Add(args) => add(args, doc, &cwd),
        Command::Label(args) => label(args, doc, &cwd),
        Command::Color(args) => color(args, doc, &cwd),
        Command::Delete(args) => delete(args, doc, &cwd),
        Command::Move(args) => move_node(args, doc, &cwd),
        Command::Reorder(args) => reorder(args, doc, &cwd),
        Command::Note(args) => note(args, doc, &cwd),
        Command::Image(args) => image(args, doc, &cwd),
        Command::Check(args) => check(args, doc, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
