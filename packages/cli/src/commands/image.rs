use anyhow::Result;
use clap::{Args, Subcommand};
use mindplan_editor::{Attachment, ImagePosition, Mutation};

use super::{commit, saved, DocArgs};

#[derive(Args, Debug)]
pub struct ImageArgs {
    #[command(subcommand)]
    pub command: ImageCommand,
}

#[derive(Subcommand, Debug)]
pub enum ImageCommand {
    /// Attach an already-hosted image to a node
    Set {
        node: String,
        url: String,

        /// top, bottom, left or right
        #[arg(short, long, default_value = "top")]
        position: ImagePosition,

        #[arg(short, long, default_value_t = Attachment::DEFAULT_SCALE)]
        scale: f64,
    },

    /// Move the image around the label
    Position { node: String, position: ImagePosition },

    /// Resize the image (clamped to the configured range)
    Scale { node: String, scale: f64 },

    /// Detach the image
    Rm { node: String },
}

pub fn image(args: ImageArgs, doc: &DocArgs, cwd: &str) -> Result<()> {
    let mut document = doc.open(cwd)?;

    let (node, mutation) = match args.command {
        ImageCommand::Set {
            node,
            url,
            position,
            scale,
        } => {
            let image = Attachment::new(url, position, scale, document.config().scale_range);
            (node.clone(), Mutation::SetImage { node_id: node, image })
        }
        ImageCommand::Position { node, position } => {
            (node.clone(), Mutation::SetImagePosition { node_id: node, position })
        }
        ImageCommand::Scale { node, scale } => {
            (node.clone(), Mutation::SetImageScale { node_id: node, scale })
        }
        ImageCommand::Rm { node } => (node.clone(), Mutation::RemoveImage { node_id: node }),
    };

    if commit(&mut document, mutation)?.changed {
        let image = document.locate(&node).and_then(|n| n.image.clone());
        let what = match image {
            Some(image) => format!(
                "Image on {} at {:?}, scale {}",
                node, image.position, image.scale
            ),
            None => format!("Removed image from {}", node),
        };
        saved(&what, &document);
    }
    Ok(())
}
