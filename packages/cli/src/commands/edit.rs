//! Structural edits: one mutation per invocation.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use mindplan_editor::{Mutation, NodeColor, SiblingDirection};

use super::{commit, saved, DocArgs};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Parent node id
    pub parent: String,

    /// Label of the new node (defaults to the configured label)
    pub label: Option<String>,
}

#[derive(Args, Debug)]
pub struct LabelArgs {
    pub node: String,

    pub label: String,
}

#[derive(Args, Debug)]
pub struct ColorArgs {
    pub node: String,

    /// Palette token or CSS color; omit to clear
    pub color: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub node: String,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Node to move
    pub node: String,

    /// New parent
    pub target: String,
}

#[derive(Args, Debug)]
pub struct ReorderArgs {
    pub node: String,

    #[arg(value_enum)]
    pub direction: Direction,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for SiblingDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => SiblingDirection::Previous,
            Direction::Down => SiblingDirection::Next,
        }
    }
}

pub fn add(args: AddArgs, doc: &DocArgs, cwd: &str) -> Result<()> {
    let mut document = doc.open(cwd)?;

    let Some(child_id) = document.insert_child(&args.parent)? else {
        return Err(anyhow::anyhow!("No node with id {}", args.parent));
    };
    if let Some(label) = args.label {
        document.apply(Mutation::SetLabel {
            node_id: child_id.clone(),
            label,
        })?;
    }
    document.save()?;

    saved(&format!("Added {}", child_id.bright_white()), &document);
    Ok(())
}

pub fn label(args: LabelArgs, doc: &DocArgs, cwd: &str) -> Result<()> {
    let mut document = doc.open(cwd)?;
    let result = commit(
        &mut document,
        Mutation::SetLabel {
            node_id: args.node.clone(),
            label: args.label,
        },
    )?;
    if result.changed {
        saved(&format!("Relabeled {}", args.node), &document);
    }
    Ok(())
}

pub fn color(args: ColorArgs, doc: &DocArgs, cwd: &str) -> Result<()> {
    let mut document = doc.open(cwd)?;
    let result = commit(
        &mut document,
        Mutation::SetColor {
            node_id: args.node.clone(),
            color: args.color.map(NodeColor::from),
        },
    )?;
    if result.changed {
        saved(&format!("Recolored {}", args.node), &document);
    }
    Ok(())
}

pub fn delete(args: DeleteArgs, doc: &DocArgs, cwd: &str) -> Result<()> {
    let mut document = doc.open(cwd)?;
    let removed = document.locate(&args.node).map(|n| n.subtree_size()).unwrap_or(0);

    let result = commit(
        &mut document,
        Mutation::DeleteSubtree {
            node_id: args.node.clone(),
        },
    )?;
    if result.changed {
        saved(&format!("Deleted {} ({} nodes)", args.node, removed), &document);
    }
    Ok(())
}

pub fn move_node(args: MoveArgs, doc: &DocArgs, cwd: &str) -> Result<()> {
    let mut document = doc.open(cwd)?;
    let result = commit(
        &mut document,
        Mutation::Reparent {
            source_id: args.node.clone(),
            target_id: args.target.clone(),
        },
    )?;
    if result.changed {
        saved(&format!("Moved {} under {}", args.node, args.target), &document);
    }
    Ok(())
}

pub fn reorder(args: ReorderArgs, doc: &DocArgs, cwd: &str) -> Result<()> {
    let mut document = doc.open(cwd)?;
    let result = commit(
        &mut document,
        Mutation::Reorder {
            node_id: args.node.clone(),
            direction: args.direction.into(),
        },
    )?;
    if result.changed {
        saved(&format!("Reordered {}", args.node), &document);
    }
    Ok(())
}
