use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use mindplan_editor::Mutation;

use super::{commit, saved, DocArgs};

#[derive(Args, Debug)]
pub struct NoteArgs {
    #[command(subcommand)]
    pub command: NoteCommand,
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Attach a new note to a node
    Add {
        node: String,
        content: String,

        /// Background color (defaults to the configured note color)
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Replace a note's content (and optionally its color)
    Edit {
        node: String,
        note: String,
        content: String,

        #[arg(short, long)]
        color: Option<String>,
    },

    /// Remove a note
    Rm { node: String, note: String },

    /// List the notes of a node
    List { node: String },
}

pub fn note(args: NoteArgs, doc: &DocArgs, cwd: &str) -> Result<()> {
    let mut document = doc.open(cwd)?;

    match args.command {
        NoteCommand::Add {
            node,
            content,
            color,
        } => {
            let Some(note_id) = document.add_annotation(&node, &content, color.as_deref())? else {
                return Err(anyhow::anyhow!("No node with id {}", node));
            };
            document.save()?;
            saved(&format!("Added note {} to {}", note_id.bright_white(), node), &document);
        }
        NoteCommand::Edit {
            node,
            note,
            content,
            color,
        } => {
            let mutation = Mutation::EditAnnotation {
                node_id: node.clone(),
                annotation_id: note.clone(),
                content,
                background_color: color,
            };
            if commit(&mut document, mutation)?.changed {
                saved(&format!("Edited note {} on {}", note, node), &document);
            }
        }
        NoteCommand::Rm { node, note } => {
            let mutation = Mutation::DeleteAnnotation {
                node_id: node.clone(),
                annotation_id: note.clone(),
            };
            if commit(&mut document, mutation)?.changed {
                saved(&format!("Removed note {} from {}", note, node), &document);
            }
        }
        NoteCommand::List { node } => {
            let Some(target) = document.locate(&node) else {
                return Err(anyhow::anyhow!("No node with id {}", node));
            };
            if target.comments().is_empty() {
                println!("{}", "No notes".dimmed());
            }
            for annotation in target.comments() {
                println!(
                    "{} {} {}",
                    annotation.id.dimmed(),
                    annotation.created_at.format("%Y-%m-%d %H:%M").to_string().cyan(),
                    annotation.content
                );
            }
        }
    }

    Ok(())
}
