use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mindplan_model::{collect_ids, depth_of, validate_tree, Node};
use std::fs;

use super::DocArgs;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// List every node id with its depth
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn check(args: CheckArgs, doc: &DocArgs, cwd: &str) -> Result<()> {
    let config = doc.load_config(cwd)?;
    let path = doc.document_path(&config, cwd);

    println!("🔍 {} {}", "Checking".green().bold(), path.display());

    let source = fs::read_to_string(&path)?;
    let root: Node = serde_json::from_str(&source)?;

    if let Err(e) = validate_tree(&root) {
        println!("   {} {}", "✗".red(), e);
        return Err(anyhow::anyhow!("{} is not a valid outline", path.display()));
    }

    let ids = collect_ids(&root);
    let mut max_depth = 0;
    for id in &ids {
        let depth = depth_of(&root, id).unwrap_or(0);
        max_depth = max_depth.max(depth);
        if args.verbose {
            println!("   {}{}", "  ".repeat(depth), id.dimmed());
        }
    }

    println!("   {} {} nodes, depth {}", "✓".green(), ids.len(), max_depth);
    Ok(())
}
