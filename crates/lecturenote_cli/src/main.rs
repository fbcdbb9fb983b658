//! Command-line entry point over `lecturenote_core`.
//!
//! # Responsibility
//! - Exercise the store end to end from a shell (list/create/delete/import).
//! - Keep output plain and line-oriented for scripting.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use lecturenote_core::{init_logging, LibraryService, NewClass, NotebookStore, StoreConfig};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "lecturenote", version, about = "Classes, lecture decks and slide notes")]
struct Cli {
    /// Database file; defaults to LECTURENOTE_DB_PATH or the temp directory.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true, env = "LECTURENOTE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List classes, most recently updated first.
    Classes,
    /// Create a class.
    AddClass {
        name: String,
        year: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a class. Its lectures are kept.
    DeleteClass { class_id: Uuid },
    /// List the lectures of a class.
    Lectures { class_id: Uuid },
    /// Import a PDF file as a new lecture.
    ImportLecture {
        class_id: Uuid,
        name: String,
        pdf: PathBuf,
    },
    /// Print a lecture with its authored slide notes.
    ShowLecture { class_id: Uuid, lecture_id: Uuid },
    /// Set the note of one slide.
    Note {
        lecture_id: Uuid,
        slide: u32,
        markup: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = StoreConfig::from_env();
    if let Some(path) = cli.db.clone() {
        config = config.with_db_path(path);
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    if let Some(log_dir) = cli.log_dir.as_ref() {
        init_logging(&config.log_level, log_dir)
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    }
    log::debug!("event=cli_start module=cli command={}", command_name(&cli.command));

    let library = LibraryService::new(NotebookStore::from_config(&config));
    run(&library, cli.command).await
}

async fn run(library: &LibraryService, command: Command) -> Result<()> {
    match command {
        Command::Classes => {
            for class in library.classes_recent_first().await {
                println!(
                    "{}\t{}\t{}\t{}",
                    class.id,
                    class.name,
                    class.year,
                    class.updated_at.to_rfc3339()
                );
            }
        }
        Command::AddClass {
            name,
            year,
            description,
        } => {
            let mut new_class = NewClass::new(name, year);
            new_class.description = description;
            let class = library.create_class(new_class).await?;
            println!("{}", class.id);
        }
        Command::DeleteClass { class_id } => {
            library.delete_class(class_id).await?;
            println!("deleted class {class_id}");
        }
        Command::Lectures { class_id } => {
            for lecture in library.lectures_for_class(class_id).await {
                println!(
                    "{}\t{}\tnotes={}\t{}",
                    lecture.id,
                    lecture.name,
                    lecture.notes.authored_slides().len(),
                    lecture.updated_at.to_rfc3339()
                );
            }
        }
        Command::ImportLecture {
            class_id,
            name,
            pdf,
        } => {
            let bytes = std::fs::read(&pdf)
                .with_context(|| format!("failed to read `{}`", pdf.display()))?;
            let lecture = library.import_lecture(class_id, &name, &bytes).await?;
            println!("{}", lecture.id);
        }
        Command::ShowLecture {
            class_id,
            lecture_id,
        } => {
            let view = library.open_lecture(class_id, lecture_id).await;
            let Some(lecture) = view.lecture else {
                bail!("lecture not found: {lecture_id}");
            };
            let class_name = view
                .class
                .map(|class| class.name)
                .unwrap_or_else(|| "(deleted class)".to_string());
            println!("{} / {}", class_name, lecture.name);
            for slide in lecture.notes.authored_slides() {
                let text = lecture.notes.plain_text(slide).unwrap_or_default();
                println!("[slide {slide}] {text}");
            }
        }
        Command::Note {
            lecture_id,
            slide,
            markup,
        } => {
            let lecture = library.save_slide_note(lecture_id, slide, markup).await?;
            println!(
                "saved slide {slide}; {} slide(s) with notes",
                lecture.notes.authored_slides().len()
            );
        }
    }

    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Classes => "classes",
        Command::AddClass { .. } => "add-class",
        Command::DeleteClass { .. } => "delete-class",
        Command::Lectures { .. } => "lectures",
        Command::ImportLecture { .. } => "import-lecture",
        Command::ShowLecture { .. } => "show-lecture",
        Command::Note { .. } => "note",
    }
}
