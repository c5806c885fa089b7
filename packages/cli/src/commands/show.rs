use anyhow::Result;
use clap::Args;
use colored::{ColoredString, Colorize};
use mindplan_editor::{Document, Node, NodeColor};
use mindplan_model::default_color_for_depth;

use super::DocArgs;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print node ids next to labels
    #[arg(short, long)]
    pub ids: bool,

    /// Print annotation contents under each node
    #[arg(short, long)]
    pub notes: bool,

    /// Stop descending below this depth
    #[arg(short, long)]
    pub depth: Option<usize>,
}

pub fn show(args: ShowArgs, doc: &DocArgs, cwd: &str) -> Result<()> {
    let document = doc.open(cwd)?;
    println!("{}", document.path.display().to_string().dimmed());
    print_node(document.root(), 0, &args, &document);
    Ok(())
}

fn print_node(node: &Node, depth: usize, args: &ShowArgs, document: &Document) {
    let color = node
        .color
        .clone()
        .or_else(|| default_color_for_depth(depth, &document.config().depth_palette));

    let mut line = format!(
        "{}{} {}",
        "  ".repeat(depth),
        bullet(depth),
        paint(&node.label, color.as_ref())
    );
    if args.ids {
        line.push_str(&format!(" {}", node.id.dimmed()));
    }
    if !node.comments().is_empty() {
        line.push_str(&format!(" {}", format!("[{} notes]", node.comments().len()).yellow()));
    }
    if let Some(image) = &node.image {
        let badge = format!("[image {:?} x{}]", image.position, image.scale);
        line.push_str(&format!(" {}", badge.cyan()));
    }
    println!("{}", line);

    if args.notes {
        for note in node.comments() {
            println!("{}    {} {}", "  ".repeat(depth), "✎".yellow(), note.content.italic());
        }
    }

    if args.depth.is_some_and(|max| depth >= max) {
        if !node.children.is_empty() {
            let hidden = format!("… {} more", node.subtree_size() - 1);
            println!("{}    {}", "  ".repeat(depth), hidden.dimmed());
        }
        return;
    }

    for child in &node.children {
        print_node(child, depth + 1, args, document);
    }
}

fn bullet(depth: usize) -> &'static str {
    match depth {
        0 => "◉",
        1 => "●",
        _ => "○",
    }
}

/// Render a label in its node color
fn paint(label: &str, color: Option<&NodeColor>) -> ColoredString {
    match color {
        Some(NodeColor::Literal(css)) => match hex_rgb(css) {
            Some((r, g, b)) => label.truecolor(r, g, b),
            None => label.normal(),
        },
        Some(NodeColor::Palette(token)) => match token.as_str() {
            "root" => label.magenta().bold(),
            "primary" => label.blue(),
            "secondary" => label.green(),
            "tertiary" => label.yellow(),
            _ => label.normal(),
        },
        None => label.normal(),
    }
}

/// `#rgb` or `#rrggbb`
fn hex_rgb(css: &str) -> Option<(u8, u8, u8)> {
    let hex = css.trim().strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut chars = hex.chars().map(|c| c.to_string().repeat(2));
            Some((channel(&chars.next()?)?, channel(&chars.next()?)?, channel(&chars.next()?)?))
        }
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}
