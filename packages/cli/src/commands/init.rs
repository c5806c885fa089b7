use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mindplan_editor::Document;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Label of the root node
    #[arg(short, long, default_value = "My plan")]
    pub title: String,

    /// Outline file to create
    #[arg(short, long, default_value = "mindplan.json")]
    pub document: String,

    /// Force overwrite existing files
    #[arg(long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing mindplan outline...".bright_blue().bold());

    let config = Config {
        document: args.document.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let document_path = config.get_document_path(cwd);
    if !document_path.exists() || args.force {
        let mut doc = Document::create(document_path, &args.title, config.editor)?;
        doc.save()?;
        println!("  {} Created {} (root {})", "✓".green(), args.document, doc.root().id.dimmed());
    }

    println!();
    println!("{}", "✅ Outline ready!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: mindplan show --ids");
    println!("  2. Run: mindplan add <parent-id> \"First topic\"");

    Ok(())
}
