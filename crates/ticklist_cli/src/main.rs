//! ticklist CLI entry point.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ticklist_cli::controller::Controller;
use ticklist_cli::render::render;
use ticklist_core::TaskId;

#[derive(Parser)]
#[command(name = "ticklist", about = "Minimal task list client", version)]
struct Cli {
    /// Use the single-file JSON store at FILE instead of a server.
    #[arg(long, value_name = "FILE", global = true)]
    local: Option<PathBuf>,

    /// Base URL of the ticklist server.
    #[arg(
        long,
        value_name = "URL",
        default_value = "http://127.0.0.1:3000",
        global = true
    )]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all tasks, newest first.
    List,
    /// Add a new task.
    Add { title: String },
    /// Flip a task's completed flag.
    Toggle { id: String },
    /// Rename a task.
    Rename { id: String, title: String },
    /// Delete a task.
    Rm { id: String },
    /// Check that the backend answers.
    Ping,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let controller = match &cli.local {
        Some(path) => Controller::local(path.clone()),
        None => Controller::remote(cli.server.clone()),
    };

    let view = match &cli.command {
        Command::List => controller.list(),
        Command::Add { title } => controller.add(title),
        Command::Toggle { id } => controller.toggle(&TaskId::parse(id)),
        Command::Rename { id, title } => controller.rename(&TaskId::parse(id), title),
        Command::Rm { id } => controller.remove(&TaskId::parse(id)),
        Command::Ping => match controller.ping() {
            Ok(answer) => {
                println!("{answer}");
                return Ok(());
            }
            Err(err) => anyhow::bail!(err),
        },
    };

    render(&view);
    if view.last_error.is_some() {
        std::process::exit(1);
    }
    Ok(())
}
