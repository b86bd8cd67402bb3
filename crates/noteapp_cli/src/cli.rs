//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use noteapp_core::config::DB_PATH_ENV;
use noteapp_core::{NoteColor, NoteId, SortKey};
use std::path::PathBuf;

/// noteapp - sortable notes backed by SQLite
#[derive(Parser, Debug)]
#[command(name = "noteapp", version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = DB_PATH_ENV)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List notes in the selected order
    #[command(name = "list", alias = "ls")]
    List(ListArgs),

    /// Show one note
    Show(ShowArgs),

    /// Create a note
    Add(AddArgs),

    /// Change fields of an existing note
    Edit(EditArgs),

    /// Delete a note (no-op for unknown ids)
    #[command(alias = "rm")]
    Delete(ShowArgs),

    /// Print core health and version
    Ping,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Sort key: title, timestamp or color
    #[arg(long, default_value = "title")]
    pub sort: SortKey,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    pub id: NoteId,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    /// color_1..color_5 or 1..5
    #[arg(long, default_value = "color_1")]
    pub color: NoteColor,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: NoteId,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub color: Option<NoteColor>,
}
