//! Tactic board CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tc_core::{load_document_json, save_document_json, EditorConfig};
use tc_cli::{create_document, delete_from_library, list_library, play_document, DocumentSummary};

#[derive(Parser)]
#[command(name = "tc")]
#[command(about = "Create, inspect and play tactic board documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fresh document with both default formations
    New {
        /// Document title
        #[arg(long, default_value = "Untitled")]
        title: String,

        /// Output JSON file path
        #[arg(long)]
        out: PathBuf,
    },

    /// Print a summary of a document or database export
    Inspect {
        /// Input JSON file path
        file: PathBuf,

        /// Pick a tactic from an export by id
        #[arg(long)]
        tactic_id: Option<String>,

        /// Pick a tactic from an export by position
        #[arg(long, default_value_t = 0)]
        index: usize,
    },

    /// Play a document headlessly, printing one render state per line
    Play {
        /// Input JSON file path
        file: PathBuf,

        /// Simulated display refresh rate
        #[arg(long, default_value_t = 30.0)]
        fps: f64,

        #[arg(long)]
        tactic_id: Option<String>,

        #[arg(long, default_value_t = 0)]
        index: usize,
    },

    /// Rewrite frames so every frame carries exactly the frame-0 players
    Canonicalize {
        /// Input JSON file path
        file: PathBuf,

        /// Output JSON file path
        #[arg(long)]
        out: PathBuf,
    },

    /// Print the JSON Schema of the document format
    Schema,

    /// List documents in a library file
    List {
        #[arg(long)]
        store: PathBuf,
    },

    /// Delete a document from a library file
    Delete {
        #[arg(long)]
        store: PathBuf,

        #[arg(long)]
        id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = EditorConfig::from_env()?;

    match cli.command {
        Commands::New { title, out } => {
            let doc = create_document(&title, config)?;
            save_document_json(&doc, &out)?;
            println!("Created {} at {}", doc.meta.tactic_id, out.display());
        }

        Commands::Inspect { file, tactic_id, index } => {
            let doc = load_document_json(&file, tactic_id.as_deref(), index)?;
            let summary = DocumentSummary::of(&doc);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::Play { file, fps, tactic_id, index } => {
            let doc = load_document_json(&file, tactic_id.as_deref(), index)?;
            for state in play_document(doc, config, fps)? {
                println!("{}", serde_json::to_string(&state)?);
            }
        }

        Commands::Canonicalize { file, out } => {
            let doc = load_document_json(&file, None, 0)?;
            let canonical = doc.canonicalized();
            save_document_json(&canonical, &out)?;
            println!("Wrote {} frames to {}", canonical.frames.len(), out.display());
        }

        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&tc_core::document_schema())?);
        }

        Commands::List { store } => {
            for summary in list_library(&store) {
                println!("{}\t{}\t{} frames", summary.tactic_id, summary.title, summary.frames);
            }
        }

        Commands::Delete { store, id } => {
            let remaining = delete_from_library(&store, &id);
            println!("Deleted {}; {} documents remain", id, remaining.len());
        }
    }

    Ok(())
}
