//! Terminal front end over the note use-cases.
//!
//! # Responsibility
//! - Map subcommands onto the same use-cases and view-models the mobile shell
//!   uses.
//! - Keep output deterministic for scripting (`list --json`).

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AddArgs, Cli, Command, EditArgs, ListArgs};
use noteapp_core::db::open_db;
use noteapp_core::{
    AddEditNoteEvent, AddEditNoteViewModel, AppConfig, Note, NoteOrder, NoteService, NotesEvent,
    NotesViewModel, SortMode, SqliteNoteRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    noteapp_core::init_logging_from_config(&config).context("failed to initialize logging")?;

    if let Command::Ping = cli.command {
        println!("noteapp_core ping={}", noteapp_core::ping());
        println!("noteapp_core version={}", noteapp_core::core_version());
        return Ok(());
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let service = NoteService::new(SqliteNoteRepository::try_new(conn)?);
    log::debug!("event=cli_start module=cli status=ok");

    match cli.command {
        Command::List(args) => list(service, &args),
        Command::Show(args) => {
            let note = service.get_note_by_id(args.id)?;
            print_note(&note);
            Ok(())
        }
        Command::Add(args) => add(service, args),
        Command::Edit(args) => edit(service, args),
        Command::Delete(args) => {
            let mut vm = NotesViewModel::new(service);
            vm.on_event(NotesEvent::DeleteNote(Note {
                id: args.id,
                ..Note::default()
            }))?;
            match vm.recently_deleted() {
                Some(note) => println!("deleted {}", note.id),
                None => println!("nothing to delete for {}", args.id),
            }
            Ok(())
        }
        Command::Ping => Ok(()),
    }
}

fn list(service: NoteService<SqliteNoteRepository>, args: &ListArgs) -> Result<()> {
    let mode = if args.desc {
        SortMode::Descending
    } else {
        SortMode::Ascending
    };
    let mut vm = NotesViewModel::with_order(service, NoteOrder::new(args.sort, mode));
    let notes = vm.ui_state().notes;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    for note in &notes {
        println!(
            "{:>5}  {:<8}  {:>14}  {}",
            note.id,
            note.color.as_str(),
            note.timestamp,
            note.title
        );
    }
    Ok(())
}

fn add(service: NoteService<SqliteNoteRepository>, args: AddArgs) -> Result<()> {
    let mut vm = AddEditNoteViewModel::new(service, Note::default());
    vm.on_event(AddEditNoteEvent::EnteredTitle(args.title))?;
    vm.on_event(AddEditNoteEvent::EnteredContent(args.content))?;
    vm.on_event(AddEditNoteEvent::ChangeColor(args.color))?;
    let id = vm.save()?;
    println!("created {id}");
    Ok(())
}

fn edit(service: NoteService<SqliteNoteRepository>, args: EditArgs) -> Result<()> {
    let mut vm = AddEditNoteViewModel::load(service, args.id)?;
    if let Some(title) = args.title {
        vm.on_event(AddEditNoteEvent::EnteredTitle(title))?;
    }
    if let Some(content) = args.content {
        vm.on_event(AddEditNoteEvent::EnteredContent(content))?;
    }
    if let Some(color) = args.color {
        vm.on_event(AddEditNoteEvent::ChangeColor(color))?;
    }
    let id = vm.save()?;
    println!("updated {id}");
    Ok(())
}

fn print_note(note: &Note) {
    println!("id:        {}", note.id);
    println!("title:     {}", note.title);
    println!("color:     {}", note.color);
    println!("timestamp: {}", note.timestamp);
    println!();
    println!("{}", note.content);
}
