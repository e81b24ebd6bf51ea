use std::path::PathBuf;

use clap::{Parser, Subcommand};
use edit::EditField;
use famtree_core::{Config, DisplayPreset, FamilySession, MemberId};

mod edit;
mod logging;
mod output;
mod tui;

#[derive(Parser)]
#[command(name = "famtree")]
#[command(about = "Browse and edit a family tree", long_about = None)]
struct Cli {
    /// Config file to use instead of the default locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tree below a member
    Tree {
        /// Member to root the tree at
        #[arg(long)]
        root: Option<String>,
        /// Layout preset: desktop or touch
        #[arg(long)]
        preset: Option<DisplayPreset>,
        /// Print node positions and connectors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one member and their relatives
    Show {
        /// Member id
        id: String,
    },
    /// List all members
    List,
    /// Edit a member of the built-in family and show the result
    ///
    /// An empty value clears optional fields. Changes are not saved.
    Edit {
        /// Member id
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Birth date, YYYY-MM-DD
        #[arg(long)]
        born: Option<String>,
        /// Death date, YYYY-MM-DD
        #[arg(long)]
        died: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        /// Comma-separated parent ids
        #[arg(long)]
        parents: Option<String>,
        /// Comma-separated spouse ids
        #[arg(long)]
        spouses: Option<String>,
    },
    /// Open the interactive tree view
    Tui {
        /// Member to root the tree at
        #[arg(long)]
        root: Option<String>,
        /// Layout preset: desktop or touch
        #[arg(long)]
        preset: Option<DisplayPreset>,
    },
    /// Print the default configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let interactive = matches!(cli.command, Commands::Tui { .. });
    logging::init(&config.logging, interactive)?;

    match cli.command {
        Commands::Tree { root, preset, json } => {
            apply_view_flags(&mut config, root, preset);
            let session = FamilySession::seeded(&config);
            if json {
                println!("{}", output::layout_json(&session)?);
            } else {
                print!("{}", output::tree_outline(&session));
            }
        }
        Commands::Show { id } => {
            let session = FamilySession::seeded(&config);
            let details = output::member_details(session.store(), &MemberId::from(id.as_str()))
                .ok_or_else(|| format!("No member with id '{}'", id))?;
            print!("{}", details);
        }
        Commands::List => {
            let session = FamilySession::seeded(&config);
            print!("{}", output::member_list(session.store()));
        }
        Commands::Edit {
            id,
            name,
            born,
            died,
            location,
            bio,
            parents,
            spouses,
        } => {
            let mut session = FamilySession::seeded(&config);
            let member_id = MemberId::from(id.as_str());
            if !session.store().contains(&member_id) {
                return Err(format!("No member with id '{}'", id).into());
            }

            let fields = [
                (EditField::Name, name),
                (EditField::Born, born),
                (EditField::Died, died),
                (EditField::Location, location),
                (EditField::Bio, bio),
                (EditField::Parents, parents),
                (EditField::Spouses, spouses),
            ];
            let edits: Vec<(EditField, &str)> = fields
                .iter()
                .filter_map(|(field, value)| value.as_deref().map(|v| (*field, v)))
                .collect();

            let patch = edit::build_patch(session.store(), &member_id, &edits)?;
            session.update(&member_id, patch);
            if let Some(details) = output::member_details(session.store(), &member_id) {
                print!("{}", details);
            }
        }
        Commands::Tui { root, preset } => {
            apply_view_flags(&mut config, root, preset);
            let session = FamilySession::seeded(&config);
            tui::run(session).await?;
        }
        Commands::Config => {
            print!("{}", Config::default_config_string());
        }
    }

    Ok(())
}

/// Command-line flags win over the loaded configuration.
fn apply_view_flags(config: &mut Config, root: Option<String>, preset: Option<DisplayPreset>) {
    if let Some(root) = root {
        config.tree.root = Some(root);
    }
    if let Some(preset) = preset {
        config.display.preset = preset;
    }
}
