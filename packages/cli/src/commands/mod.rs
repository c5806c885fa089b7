pub mod check;
pub mod edit;
pub mod image;
pub mod init;
pub mod note;
pub mod show;

pub use check::{check, CheckArgs};
pub use edit::{
    add, color, delete, label, move_node, reorder, AddArgs, ColorArgs, DeleteArgs, LabelArgs,
    MoveArgs, ReorderArgs,
};
pub use image::{image, ImageArgs};
pub use init::{init, InitArgs};
pub use note::{note, NoteArgs};
pub use show::{show, ShowArgs};

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use mindplan_editor::{Document, Mutation, MutationResult};
use tracing::{debug, info};

use crate::config::Config;

/// Global options naming the outline and config to use
#[derive(Args, Debug, Clone, Default)]
pub struct DocArgs {
    /// Outline file (defaults to the one named in the config)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Config file (defaults to mindplan.config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl DocArgs {
    pub fn load_config(&self, cwd: &str) -> Result<Config> {
        Config::load(cwd, self.config.as_deref())
    }

    pub fn document_path(&self, config: &Config, cwd: &str) -> PathBuf {
        match &self.file {
            Some(file) => PathBuf::from(cwd).join(file),
            None => config.get_document_path(cwd),
        }
    }

    /// Load the outline this invocation works on
    pub fn open(&self, cwd: &str) -> Result<Document> {
        let config = self.load_config(cwd)?;
        let path = self.document_path(&config, cwd);
        debug!(path = %path.display(), "Opening outline");
        Document::load(path.clone(), config.editor)
            .with_context(|| format!("Failed to open {}", path.display()))
    }
}

/// Apply one mutation and save. An unchanged tree is reported, not saved.
pub(crate) fn commit(doc: &mut Document, mutation: Mutation) -> Result<MutationResult> {
    let name = mutation.name();
    let node_id = mutation.node_id().to_string();
    let result = doc
        .apply(mutation)
        .map_err(|e| anyhow::anyhow!("{} rejected: {}", name, e))?;

    if result.changed {
        doc.save()?;
        info!(mutation = name, node_id = %node_id, version = result.version, "Committed");
    } else {
        debug!(mutation = name, node_id = %node_id, "Nothing to commit");
        println!("{} Nothing changed (unknown id or already in place)", "⚠️".yellow());
    }
    Ok(result)
}

pub(crate) fn saved(what: &str, doc: &Document) {
    println!(
        "  {} {} (version {}) → {}",
        "✓".green(),
        what,
        doc.version,
        doc.path.display()
    );
}
